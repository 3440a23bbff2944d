//! Session controller.
//!
//! [`EtchCore`] owns every piece of mutable session state: grid size and
//! layout, grid content, the last pointer position, the coordinate mapper and
//! the session state. It never touches a timer or the DOM. Each handler
//! returns the [`Action`]s the host must carry out, including scheduling and
//! cancelling the next tick, so the whole session can be driven from tests.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use crate::config::EtchConfig;
use crate::debug::DebugSnapshot;
use crate::dimension::{GridRequest, GridSize};
use crate::grid::{GridState, RegenScope, Regeneration};
use crate::idle::{IdleDetector, ResetPolicy, SessionState, TickVerdict};
use crate::layout::{Layout, LayoutPolicy, StyleDirective};
use crate::mapper::{CellPosition, CoordinateMapper, Point, SurfaceBounds};
use crate::render::{CellScope, RowCells};

/// Identifies one scheduled tick. Only the most recently scheduled token is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickToken(u64);

/// Pointer input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Enter(Point),
    Move(Point),
    Leave(Point),
}

/// Cursor shown over the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Default,
    Crosshair,
}

impl Cursor {
    #[must_use]
    pub fn css(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Crosshair => "crosshair",
        }
    }
}

/// Effects returned from handlers for the host to process, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Call [`EtchCore::on_tick`] with `token` after `delay_ms`.
    ScheduleTick { token: TickToken, delay_ms: u32 },
    /// Drop any pending tick.
    CancelTick,
    SetCursor(Cursor),
    /// Show or hide the pause overlay.
    SetPaused(bool),
    ApplyStyle(StyleDirective),
    /// Resize and pad the surface.
    ApplyLayout(Layout),
    ClearCells(CellScope),
    CreateCells(RowCells),
    /// Only emitted when debug is enabled.
    PublishDebug(DebugSnapshot),
}

/// Core session state, independent of any browser API.
#[derive(Debug)]
pub struct EtchCore {
    config: EtchConfig,
    detector: IdleDetector,
    state: SessionState,
    layout: Layout,
    grid: GridState,
    mapper: CoordinateMapper,
    surface: SurfaceBounds,
    pointer: Point,
    next_token: u64,
    live_token: Option<TickToken>,
    /// The mapper was reset by a regeneration; the next tick re-seeds it
    /// without counting as movement.
    reseed: bool,
}

impl Default for EtchCore {
    fn default() -> Self {
        Self::new(EtchConfig::default())
    }
}

impl EtchCore {
    #[must_use]
    pub fn new(config: EtchConfig) -> Self {
        Self {
            config,
            detector: IdleDetector::new(config.idle_ticks),
            state: SessionState::Idle,
            layout: Layout::new(GridSize::default(), LayoutPolicy::Percentage),
            grid: GridState::Uninitialized,
            mapper: CoordinateMapper::new(),
            surface: SurfaceBounds::default(),
            pointer: Point::default(),
            next_token: 0,
            live_token: None,
            reseed: false,
        }
    }

    // --- Surface / grid ---

    /// Update the surface bounding box in page coordinates.
    pub fn set_surface(&mut self, bounds: SurfaceBounds) {
        self.surface = bounds;
    }

    /// Lay out a new grid and rebuild every cell.
    pub fn generate_grid(&mut self, request: GridRequest, policy: LayoutPolicy) -> Vec<Action> {
        self.layout = Layout::for_request(request, policy);
        self.mapper.reset();
        self.reseed = self.state.is_tracking();
        tracing::debug!(
            columns = self.layout.grid.columns,
            rows = self.layout.grid.rows,
            ?policy,
            "generating grid"
        );
        let regen = self.grid.regenerate(self.layout.grid, RegenScope::Full);
        self.render_actions(regen)
    }

    /// Rebuild a single 1-indexed row of the current grid.
    ///
    /// Falls back to a full rebuild when the grid has not been created yet.
    pub fn regenerate_row(&mut self, row: u32) -> Vec<Action> {
        let regen = self.grid.regenerate(self.layout.grid, RegenScope::Row(row));
        self.render_actions(regen)
    }

    fn render_actions(&self, regen: Regeneration) -> Vec<Action> {
        let mut actions = Vec::with_capacity(regen.rows.len() + 3);
        if regen.clear == Some(CellScope::All) {
            actions.push(Action::ApplyStyle(self.layout.style()));
            actions.push(Action::ApplyLayout(self.layout));
        }
        actions.extend(regen.clear.map(Action::ClearCells));
        actions.extend(regen.rows.into_iter().map(Action::CreateCells));
        actions
    }

    // --- Pointer input ---

    /// Dispatch a pointer event to its handler.
    pub fn on_pointer(&mut self, event: PointerEvent) -> Vec<Action> {
        match event {
            PointerEvent::Enter(pos) => self.on_pointer_enter(pos),
            PointerEvent::Move(pos) => self.on_pointer_move(pos),
            PointerEvent::Leave(pos) => self.on_pointer_leave(pos),
        }
    }

    /// Pointer entered the surface: arm the detector and run the first tick
    /// without letting the initial position count as movement.
    pub fn on_pointer_enter(&mut self, pos: Point) -> Vec<Action> {
        self.pointer = pos;
        if self.state.is_tracking() {
            return Vec::new();
        }

        let mut actions = Vec::new();
        if self.state == SessionState::Paused {
            actions.push(Action::SetPaused(false));
        }
        tracing::debug!(from = ?self.state, "session started");
        self.state = self.detector.arm();
        self.reseed = false;
        actions.push(Action::SetCursor(Cursor::Crosshair));
        actions.extend(self.tick(ResetPolicy::Suppress));
        actions
    }

    /// Pointer moved. Only the raw position is stored; the next tick does the work.
    pub fn on_pointer_move(&mut self, pos: Point) -> Vec<Action> {
        if self.state.is_tracking() {
            self.pointer = pos;
        }
        Vec::new()
    }

    /// Pointer left the surface: record the final position and stop ticking.
    ///
    /// A paused session stays paused until the next enter.
    pub fn on_pointer_leave(&mut self, pos: Point) -> Vec<Action> {
        self.pointer = pos;
        self.mapper.update(self.pointer, self.surface, self.cell_size());

        let mut actions = Vec::new();
        if self.state.is_tracking() {
            tracing::debug!("session stopped");
            self.live_token = None;
            self.reseed = false;
            self.state = SessionState::Idle;
            actions.push(Action::CancelTick);
            actions.push(Action::SetCursor(Cursor::Default));
        }
        actions.extend(self.debug_action());
        actions
    }

    // --- Ticks ---

    /// Scheduled tick fired. Ticks whose token is no longer live are ignored.
    pub fn on_tick(&mut self, token: TickToken) -> Vec<Action> {
        if self.live_token != Some(token) || !self.state.is_tracking() {
            tracing::warn!(?token, live = ?self.live_token, "stale tick ignored");
            return Vec::new();
        }
        self.live_token = None;
        let policy = if std::mem::take(&mut self.reseed) { ResetPolicy::Suppress } else { ResetPolicy::ResetOnMove };
        self.tick(policy)
    }

    fn tick(&mut self, policy: ResetPolicy) -> Vec<Action> {
        let update = self.mapper.update(self.pointer, self.surface, self.cell_size());
        let verdict = self.detector.tick(self.state.countdown(), update.cell_changed, policy);
        tracing::trace!(?update, ?verdict, "tick");

        let mut actions = Vec::new();
        match verdict {
            TickVerdict::Continue { countdown } => {
                self.state = SessionState::Tracking { countdown };
                let token = self.issue_token();
                actions.push(Action::ScheduleTick { token, delay_ms: self.config.poll_delay_ms });
            }
            TickVerdict::Exhausted => {
                tracing::debug!("session paused");
                self.state = SessionState::Paused;
                self.live_token = None;
                actions.push(Action::SetPaused(true));
                actions.push(Action::SetCursor(Cursor::Default));
            }
        }
        actions.extend(self.debug_action());
        actions
    }

    fn issue_token(&mut self) -> TickToken {
        self.next_token += 1;
        let token = TickToken(self.next_token);
        self.live_token = Some(token);
        token
    }

    fn debug_action(&self) -> Option<Action> {
        self.config.debug.then(|| Action::PublishDebug(self.snapshot()))
    }

    // --- Queries ---

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn config(&self) -> EtchConfig {
        self.config
    }

    #[must_use]
    pub fn layout(&self) -> Layout {
        self.layout
    }

    #[must_use]
    pub fn grid(&self) -> &GridState {
        &self.grid
    }

    /// Pixel cell size for the current layout and surface.
    #[must_use]
    pub fn cell_size(&self) -> u32 {
        self.layout.cell_size_for(self.surface.width)
    }

    #[must_use]
    pub fn surface_position(&self) -> Option<Point> {
        self.mapper.surface_position()
    }

    #[must_use]
    pub fn cell_position(&self) -> Option<CellPosition> {
        self.mapper.cell_position()
    }

    /// Current state as seen by the debug readout.
    #[must_use]
    pub fn snapshot(&self) -> DebugSnapshot {
        DebugSnapshot {
            poll_active: self.state.is_tracking(),
            countdown: self.state.countdown(),
            surface_position: self.mapper.surface_position(),
            cell_size: self.cell_size(),
            cell_position: self.mapper.cell_position(),
        }
    }
}

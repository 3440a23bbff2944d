//! Browser shell: binds [`EtchCore`] to the page.
//!
//! This module is the only place that touches `web_sys`. It measures the
//! surface, forwards mouse events, owns the tick timer and applies every
//! [`Action`] the core returns. The timer is a `gloo_timers` [`Timeout`];
//! dropping it cancels the pending tick, which is how [`Action::CancelTick`]
//! is honored.
//!
//! Errors inside event and timer callbacks have nowhere to propagate to, so
//! they are logged at the callback boundary.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_timers::callback::Timeout;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, MouseEvent, Node, Window};

use crate::config::EtchConfig;
use crate::consts::PAUSED_BORDER_COLOR;
use crate::debug::DebugSnapshot;
use crate::dimension::GridRequest;
use crate::engine::{Action, EtchCore, PointerEvent, TickToken};
use crate::layout::{Layout, LayoutPolicy};
use crate::mapper::{Point, SurfaceBounds};
use crate::render::{CellScope, RowCells, placeholder_shade};

/// Failures of the browser shell.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("missing element #{0}")]
    MissingElement(&'static str),
    #[error("DOM call failed: {0}")]
    Dom(String),
    #[error("snapshot serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl From<JsValue> for EngineError {
    fn from(value: JsValue) -> Self {
        Self::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<EngineError> for JsValue {
    fn from(err: EngineError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

type MouseListener = Closure<dyn FnMut(MouseEvent)>;

/// The etch pad mounted on the current page.
#[wasm_bindgen]
pub struct Engine {
    shell: Rc<RefCell<Shell>>,
    // Kept alive for as long as the engine is.
    _listeners: Vec<MouseListener>,
}

#[wasm_bindgen]
impl Engine {
    /// Mount on the current page, reading the debug flag from the query string.
    ///
    /// # Errors
    ///
    /// Fails when the page lacks one of the expected elements.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<Engine, JsValue> {
        let window = web_sys::window().ok_or(EngineError::NoWindow)?;
        let search = window.location().search()?;
        Ok(Self::mount(EtchConfig::from_query(&search))?)
    }

    /// Regenerate the grid. `size` drives the column count; rows follow the aspect ratio.
    ///
    /// # Errors
    ///
    /// Fails when a DOM update fails.
    #[wasm_bindgen(js_name = generateGrid)]
    pub fn generate_grid(&self, size: Option<f64>) -> Result<(), JsValue> {
        let request = size.map_or(GridRequest::Default, GridRequest::Size);
        Ok(self.generate(request)?)
    }

    /// Last state as JSON, for ad-hoc inspection from the console.
    ///
    /// # Errors
    ///
    /// Fails if the snapshot cannot be serialized.
    #[wasm_bindgen(js_name = debugJson)]
    pub fn debug_json(&self) -> Result<String, JsValue> {
        let snapshot = self.shell.borrow().core.snapshot();
        Ok(serde_json::to_string(&snapshot).map_err(EngineError::from)?)
    }
}

impl Engine {
    /// Mount with an explicit configuration and draw the default grid.
    ///
    /// # Errors
    ///
    /// Fails when the page lacks one of the expected elements or a DOM call fails.
    pub fn mount(config: EtchConfig) -> Result<Self, EngineError> {
        let dom = Dom::find(config)?;
        let shell = Rc::new(RefCell::new(Shell {
            core: EtchCore::new(config),
            dom,
            pending: None,
            rng: SmallRng::seed_from_u64(js_sys::Date::now().to_bits()),
        }));
        let listeners = attach_listeners(&shell)?;
        let engine = Self { shell, _listeners: listeners };
        engine.generate(GridRequest::Default)?;
        Ok(engine)
    }

    /// Regenerate the grid for `request`, laid out against the measured screen width.
    ///
    /// # Errors
    ///
    /// Fails when a DOM update fails.
    pub fn generate(&self, request: GridRequest) -> Result<(), EngineError> {
        let actions = {
            let mut shell = self.shell.borrow_mut();
            let policy = LayoutPolicy::from_width(shell.dom.available_width()?);
            let actions = shell.core.generate_grid(request, policy);
            shell.refresh_bounds()?;
            actions
        };
        apply(&self.shell, actions)?;
        // Bounds change once the new layout is applied.
        self.shell.borrow_mut().refresh_bounds()
    }

    /// Rebuild a single 1-indexed row.
    ///
    /// # Errors
    ///
    /// Fails when a DOM update fails.
    pub fn regenerate_row(&self, row: u32) -> Result<(), EngineError> {
        let actions = self.shell.borrow_mut().core.regenerate_row(row);
        apply(&self.shell, actions)
    }
}

// =============================================================================
// SHELL STATE
// =============================================================================

struct Shell {
    core: EtchCore,
    dom: Dom,
    pending: Option<Timeout>,
    rng: SmallRng,
}

impl Shell {
    fn refresh_bounds(&mut self) -> Result<(), EngineError> {
        let bounds = self.dom.surface_bounds()?;
        self.core.set_surface(bounds);
        Ok(())
    }
}

/// Carry out `actions` in order.
fn apply(shell: &Rc<RefCell<Shell>>, actions: Vec<Action>) -> Result<(), EngineError> {
    for action in actions {
        match action {
            Action::ScheduleTick { token, delay_ms } => {
                let weak = Rc::downgrade(shell);
                let timeout = Timeout::new(delay_ms, move || fire_tick(&weak, token));
                shell.borrow_mut().pending = Some(timeout);
            }
            Action::CancelTick => {
                shell.borrow_mut().pending = None;
            }
            other => {
                let mut guard = shell.borrow_mut();
                let Shell { dom, rng, .. } = &mut *guard;
                dom.apply(other, rng)?;
            }
        }
    }
    Ok(())
}

fn fire_tick(weak: &Weak<RefCell<Shell>>, token: TickToken) {
    let Some(shell) = weak.upgrade() else {
        return;
    };
    if let Err(err) = run_tick(&shell, token) {
        tracing::error!(%err, "tick failed");
    }
}

fn run_tick(shell: &Rc<RefCell<Shell>>, token: TickToken) -> Result<(), EngineError> {
    let actions = {
        let mut guard = shell.borrow_mut();
        guard.refresh_bounds()?;
        guard.core.on_tick(token)
    };
    apply(shell, actions)
}

fn attach_listeners(shell: &Rc<RefCell<Shell>>) -> Result<Vec<MouseListener>, EngineError> {
    let (area, document) = {
        let guard = shell.borrow();
        (guard.dom.area.clone(), guard.dom.document.clone())
    };

    let enter = pointer_listener(shell, PointerEvent::Enter);
    area.add_event_listener_with_callback("mouseenter", enter.as_ref().unchecked_ref())?;
    let leave = pointer_listener(shell, PointerEvent::Leave);
    area.add_event_listener_with_callback("mouseleave", leave.as_ref().unchecked_ref())?;
    let moved = pointer_listener(shell, PointerEvent::Move);
    document.add_event_listener_with_callback("mousemove", moved.as_ref().unchecked_ref())?;

    Ok(vec![enter, leave, moved])
}

fn pointer_listener(shell: &Rc<RefCell<Shell>>, kind: fn(Point) -> PointerEvent) -> MouseListener {
    let weak = Rc::downgrade(shell);
    Closure::new(move |event: MouseEvent| {
        let Some(shell) = weak.upgrade() else {
            return;
        };
        let pos = Point::new(f64::from(event.page_x()), f64::from(event.page_y()));
        if let Err(err) = handle_pointer(&shell, kind(pos)) {
            tracing::error!(%err, "pointer event failed");
        }
    })
}

fn handle_pointer(shell: &Rc<RefCell<Shell>>, event: PointerEvent) -> Result<(), EngineError> {
    let actions = {
        let mut guard = shell.borrow_mut();
        if !matches!(event, PointerEvent::Move(_)) {
            guard.refresh_bounds()?;
        }
        guard.core.on_pointer(event)
    };
    apply(shell, actions)
}

// =============================================================================
// DOM
// =============================================================================

struct Dom {
    window: Window,
    document: Document,
    /// Container of the cells; its box is the drawing surface.
    pixels: HtmlElement,
    /// Element receiving enter/leave events.
    area: HtmlElement,
    pause: HtmlElement,
    borders: HtmlElement,
    /// Element whose parent bounds the available width.
    screen: HtmlElement,
    style: Element,
    debug: Option<DebugPanel>,
}

impl Dom {
    fn find(config: EtchConfig) -> Result<Self, EngineError> {
        let window = web_sys::window().ok_or(EngineError::NoWindow)?;
        let document = window.document().ok_or(EngineError::NoDocument)?;

        let style = document.create_element("style")?;
        document.head().ok_or(EngineError::MissingElement("head"))?.append_child(&style)?;

        let container = by_id(&document, "debug")?;
        let debug = if config.debug {
            Some(DebugPanel::find(&document, container, config)?)
        } else {
            container.style().set_property("display", "none")?;
            None
        };

        let dom = Self {
            pixels: by_id(&document, "pixels")?,
            area: by_id(&document, "screen-area")?,
            pause: by_id(&document, "screen-pause")?,
            borders: by_id(&document, "screen-borders")?,
            screen: by_id(&document, "screen")?,
            style,
            debug,
            window,
            document,
        };
        if let Some(panel) = &dom.debug {
            let width = dom.available_width()?.unwrap_or(0);
            panel.screen_width.set_inner_text(&width.to_string());
        }
        Ok(dom)
    }

    /// Width the grid may occupy: the screen's parent minus its horizontal padding.
    /// `None` when the page has not been laid out yet.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn available_width(&self) -> Result<Option<u32>, EngineError> {
        let Some(parent) = self.screen.parent_element() else {
            return Ok(None);
        };
        let padding = match self.window.get_computed_style(&parent)? {
            Some(style) => px_value(&style.get_property_value("padding-left")?),
            None => 0.0,
        };
        let width = f64::from(parent.client_width()) - padding * 2.0;
        Ok((width >= 1.0).then(|| width.floor() as u32))
    }

    /// Surface box in page coordinates.
    fn surface_bounds(&self) -> Result<SurfaceBounds, EngineError> {
        let rect = self.pixels.get_bounding_client_rect();
        let scroll_x = self.window.scroll_x()?;
        let scroll_y = self.window.scroll_y()?;
        Ok(SurfaceBounds::new(rect.left() + scroll_x, rect.top() + scroll_y, rect.width(), rect.height()))
    }

    fn apply(&self, action: Action, rng: &mut SmallRng) -> Result<(), EngineError> {
        match action {
            Action::SetCursor(cursor) => {
                if let Some(body) = self.document.body() {
                    body.style().set_property("cursor", cursor.css())?;
                }
            }
            Action::SetPaused(paused) => {
                let (display, border) = if paused { ("block", PAUSED_BORDER_COLOR) } else { ("none", "transparent") };
                self.pause.style().set_property("display", display)?;
                self.borders.style().set_property("background-color", border)?;
            }
            Action::ApplyStyle(directive) => self.style.set_inner_html(&directive.css_rule()),
            Action::ApplyLayout(layout) => self.apply_layout(&layout)?,
            Action::ClearCells(scope) => self.clear_cells(scope)?,
            Action::CreateCells(row) => self.create_cells(&row, rng)?,
            Action::PublishDebug(snapshot) => {
                if let Some(panel) = &self.debug {
                    panel.show(&snapshot);
                }
            }
            // Timer actions are handled by the shell before reaching the DOM.
            Action::ScheduleTick { .. } | Action::CancelTick => {}
        }
        Ok(())
    }

    fn apply_layout(&self, layout: &Layout) -> Result<(), EngineError> {
        let surface = layout.surface_style();
        let pixels = self.pixels.style();
        pixels.set_property("width", &surface.width)?;
        pixels.set_property("padding", "0px")?;
        let area = self.area.style();
        area.set_property("width", &surface.width)?;
        area.set_property("height", &surface.height)?;
        let pad = surface.frame_padding;
        area.set_property("padding-top", &format!("{}px", pad.top))?;
        area.set_property("padding-right", &format!("{}px", pad.right))?;
        area.set_property("padding-bottom", &format!("{}px", pad.bottom))?;
        area.set_property("padding-left", &format!("{}px", pad.left))?;
        Ok(())
    }

    fn clear_cells(&self, scope: CellScope) -> Result<(), EngineError> {
        match scope {
            CellScope::All => self.pixels.set_inner_html(""),
            CellScope::Row(row) => {
                let cells = self.pixels.query_selector_all(&row_selector(row))?;
                for i in 0..cells.length() {
                    if let Some(cell) = cells.item(i) {
                        self.pixels.remove_child(&cell)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn create_cells(&self, row: &RowCells, rng: &mut SmallRng) -> Result<(), EngineError> {
        // Keep rows in order when a single row is recreated.
        let anchor = self.pixels.query_selector(&row_selector(row.row + 1))?;
        let anchor: Option<&Node> = anchor.as_ref().map(AsRef::as_ref);
        for desc in &row.cells {
            let cell = self.document.create_element("div")?;
            cell.set_attribute("data-row", &desc.row.to_string())?;
            cell.set_attribute("data-col", &desc.col.to_string())?;
            cell.class_list().add_1("pixel")?;
            if let Some(html) = cell.dyn_ref::<HtmlElement>() {
                html.style().set_property("background-color", &placeholder_shade(rng))?;
            }
            self.pixels.insert_before(&cell, anchor)?;
        }
        Ok(())
    }
}

fn by_id(document: &Document, id: &'static str) -> Result<HtmlElement, EngineError> {
    let el = document.get_element_by_id(id).ok_or(EngineError::MissingElement(id))?;
    el.dyn_into::<HtmlElement>().map_err(|_| EngineError::MissingElement(id))
}

fn row_selector(row: u32) -> String {
    format!("[data-row=\"{row}\"]")
}

fn px_value(raw: &str) -> f64 {
    raw.trim().trim_end_matches("px").parse::<f64>().unwrap_or(0.0)
}

// =============================================================================
// DEBUG PANEL
// =============================================================================

struct DebugPanel {
    screen_width: HtmlElement,
    poll_status: HtmlElement,
    poll_count: HtmlElement,
    cursor_pos: HtmlElement,
    pixel_size: HtmlElement,
    pixel_pos: HtmlElement,
}

impl DebugPanel {
    fn find(document: &Document, container: HtmlElement, config: EtchConfig) -> Result<Self, EngineError> {
        container.style().set_property("display", "block")?;
        by_id(document, "poll-delay")?.set_inner_text(&config.poll_delay_ms.to_string());
        Ok(Self {
            screen_width: by_id(document, "screen-width")?,
            poll_status: by_id(document, "poll-status")?,
            poll_count: by_id(document, "poll-count")?,
            cursor_pos: by_id(document, "cursor-pos")?,
            pixel_size: by_id(document, "pixel-size")?,
            pixel_pos: by_id(document, "pixel-pos")?,
        })
    }

    fn show(&self, snapshot: &DebugSnapshot) {
        self.poll_status.set_inner_text(snapshot.poll_status());
        self.poll_count.set_inner_text(&snapshot.countdown.to_string());
        self.cursor_pos.set_inner_text(&snapshot.cursor_text());
        self.pixel_size.set_inner_text(&snapshot.cell_size_text());
        self.pixel_pos.set_inner_text(&snapshot.cell_text());
    }
}

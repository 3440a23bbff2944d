//! Pointer-to-cell coordinate mapping.
//!
//! Raw pointer positions arrive in page coordinates. They are first made
//! relative to the drawing surface and clamped into its bounds, then turned
//! into a 1-indexed cell position using the current cell size. The stateful
//! [`CoordinateMapper`] remembers the last values so callers can tell a
//! cell change apart from sub-cell jitter.

#[cfg(test)]
#[path = "mapper_test.rs"]
mod mapper_test;

use serde::Serialize;

/// A point in page or surface space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Bounding box of the drawing surface in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfaceBounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl SurfaceBounds {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }
}

/// A 1-indexed cell address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellPosition {
    pub col: u32,
    pub row: u32,
}

/// Make `pointer` relative to the surface and clamp it into `[0, width] × [0, height]`.
///
/// NaN coordinates clamp to the far edge; a negative extent is treated as zero.
#[must_use]
pub fn to_surface_relative(pointer: Point, bounds: SurfaceBounds) -> Point {
    Point {
        x: clamp_axis(pointer.x - bounds.left, bounds.width),
        y: clamp_axis(pointer.y - bounds.top, bounds.height),
    }
}

fn clamp_axis(v: f64, extent: f64) -> f64 {
    v.min(extent).max(0.0)
}

/// Cell under a surface-relative position: `round(v / cell_size) + 1` per axis.
///
/// Exact half-cell positions round to even, so a pointer sitting halfway
/// into the first cell still maps to cell 1.
#[must_use]
pub fn to_cell_position(relative: Point, cell_size: u32) -> CellPosition {
    let size = f64::from(cell_size.max(1));
    CellPosition { col: axis_cell(relative.x, size), row: axis_cell(relative.y, size) }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn axis_cell(v: f64, size: f64) -> u32 {
    // `as` saturates: negative or NaN input lands on cell 1.
    ((v / size).round_ties_even() as u32).saturating_add(1)
}

/// What changed during a [`CoordinateMapper::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MapUpdate {
    /// The surface-relative position moved.
    pub surface_changed: bool,
    /// The pointer is over a different cell.
    pub cell_changed: bool,
}

/// Change-detecting mapper holding the last computed positions.
#[derive(Debug, Clone, Default)]
pub struct CoordinateMapper {
    surface: Option<Point>,
    cell: Option<CellPosition>,
}

impl CoordinateMapper {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute both positions from a raw pointer position.
    ///
    /// The cell is only recomputed when the surface-relative position moved;
    /// the first update always reports both as changed.
    pub fn update(&mut self, pointer: Point, bounds: SurfaceBounds, cell_size: u32) -> MapUpdate {
        let surface = to_surface_relative(pointer, bounds);
        if self.surface == Some(surface) {
            return MapUpdate::default();
        }
        self.surface = Some(surface);

        let cell = to_cell_position(surface, cell_size);
        let cell_changed = self.cell != Some(cell);
        self.cell = Some(cell);
        MapUpdate { surface_changed: true, cell_changed }
    }

    /// Forget stored positions, e.g. after the cell size changed.
    pub fn reset(&mut self) {
        self.surface = None;
        self.cell = None;
    }

    /// Last surface-relative position, if any.
    #[must_use]
    pub fn surface_position(&self) -> Option<Point> {
        self.surface
    }

    /// Last cell position, if any.
    #[must_use]
    pub fn cell_position(&self) -> Option<CellPosition> {
        self.cell
    }
}

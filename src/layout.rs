//! Layout pass: cell size, rendered extent and centering padding.
//!
//! Two interchangeable policies exist. When the available surface width is
//! known up front the grid is laid out in absolute pixels: cells are
//! `cell_size × cell_size` squares and any slack is split into padding so the
//! grid sits centered. When the width is unknown, cells are sized as a
//! percentage of the surface (`100 / columns %`) and the pixel cell size is
//! derived later from the measured surface width.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use serde::Serialize;

use crate::dimension::{GridRequest, GridSize};

/// Padding around the rendered grid, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Padding {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Padding {
    /// Split `available - rendered` into left/right halves, left taking the
    /// smaller half. Vertical padding mirrors horizontal.
    #[must_use]
    pub fn centering(available: u32, rendered: u32) -> Self {
        let slack = available.saturating_sub(rendered);
        let left = slack / 2;
        let right = slack - left;
        Self { left, right, top: left, bottom: right }
    }
}

/// Compute the pixel size of one cell: `max(1, floor(width / columns))`.
#[must_use]
pub fn cell_size(available_width: u32, columns: u32) -> u32 {
    (available_width / columns.max(1)).max(1)
}

/// How the available width is known when laying out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutPolicy {
    /// Width measured up front; lay out in absolute pixels.
    Absolute { available_width: u32 },
    /// Width unknown; lay out in percentages of the surface.
    Percentage,
}

impl LayoutPolicy {
    /// Pick the policy from an optional measured width.
    #[must_use]
    pub fn from_width(available_width: Option<u32>) -> Self {
        match available_width {
            Some(available_width) => Self::Absolute { available_width },
            None => Self::Percentage,
        }
    }
}

/// Unit of a [`StyleDirective`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SizingMode {
    Absolute,
    Percentage,
}

/// Instruction to the renderer describing how big one cell is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StyleDirective {
    pub mode: SizingMode,
    /// Pixels for [`SizingMode::Absolute`], percent for [`SizingMode::Percentage`].
    pub value: f64,
}

impl StyleDirective {
    /// CSS rule that renders every `.pixel` as a square of this size.
    ///
    /// Height comes from `padding-bottom`, which resolves against the
    /// container width in both modes and therefore keeps cells square.
    #[must_use]
    pub fn css_rule(&self) -> String {
        let unit = match self.mode {
            SizingMode::Absolute => "px",
            SizingMode::Percentage => "%",
        };
        let v = self.value;
        format!(".pixel {{ width: {v}{unit}; padding-bottom: {v}{unit}; box-sizing: border-box; }}")
    }
}

/// Policy-specific sizing of a layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Sizing {
    Absolute {
        cell_size: u32,
        rendered_width: u32,
        rendered_height: u32,
        padding: Padding,
    },
    Percentage {
        /// Width of one cell as a percentage of the surface width.
        percent: f64,
    },
}

/// CSS box values for the surface and its frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceStyle {
    pub width: String,
    pub height: String,
    /// Padding for the frame; the surface itself is never padded.
    pub frame_padding: Padding,
}

/// Result of a layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Layout {
    pub grid: GridSize,
    pub sizing: Sizing,
}

impl Layout {
    /// Lay out an already-validated grid.
    #[must_use]
    pub fn new(grid: GridSize, policy: LayoutPolicy) -> Self {
        let sizing = match policy {
            LayoutPolicy::Absolute { available_width } => {
                let cell_size = cell_size(available_width, grid.columns);
                // Saturates: huge widths with many rows exceed u32.
                let rendered_width = cell_size.saturating_mul(grid.columns);
                let rendered_height = cell_size.saturating_mul(grid.rows);
                Sizing::Absolute {
                    cell_size,
                    rendered_width,
                    rendered_height,
                    padding: Padding::centering(available_width, rendered_width),
                }
            }
            LayoutPolicy::Percentage => Sizing::Percentage { percent: 100.0 / f64::from(grid.columns) },
        };
        Self { grid, sizing }
    }

    /// Lay out a grid request.
    #[must_use]
    pub fn for_request(request: GridRequest, policy: LayoutPolicy) -> Self {
        Self::new(GridSize::from_request(request), policy)
    }

    /// Pixel cell size to use for coordinate mapping on a surface of the given width.
    ///
    /// Absolute layouts ignore the width; percentage layouts derive the size
    /// from it with the same formula as the absolute pass.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn cell_size_for(&self, surface_width: f64) -> u32 {
        match self.sizing {
            Sizing::Absolute { cell_size, .. } => cell_size,
            Sizing::Percentage { .. } => {
                let width = if surface_width.is_finite() { surface_width.max(0.0) as u32 } else { 0 };
                cell_size(width, self.grid.columns)
            }
        }
    }

    /// Box styles for the surface and the frame around it.
    ///
    /// Centering padding goes on the frame only, so the surface's bounding
    /// box starts at the first cell.
    #[must_use]
    pub fn surface_style(&self) -> SurfaceStyle {
        match self.sizing {
            Sizing::Absolute { rendered_width, rendered_height, padding, .. } => SurfaceStyle {
                width: format!("{rendered_width}px"),
                height: format!("{rendered_height}px"),
                frame_padding: padding,
            },
            Sizing::Percentage { .. } => SurfaceStyle {
                width: "100%".to_string(),
                height: "auto".to_string(),
                frame_padding: Padding::default(),
            },
        }
    }

    /// Style directive for the renderer.
    #[must_use]
    pub fn style(&self) -> StyleDirective {
        match self.sizing {
            Sizing::Absolute { cell_size, .. } => {
                StyleDirective { mode: SizingMode::Absolute, value: f64::from(cell_size) }
            }
            Sizing::Percentage { percent } => StyleDirective { mode: SizingMode::Percentage, value: percent },
        }
    }
}

/// Validate the requested axes and lay them out under `policy`.
///
/// A missing axis is derived from the other through the aspect ratio.
#[must_use]
pub fn compute_layout(requested_columns: Option<f64>, requested_rows: Option<f64>, policy: LayoutPolicy) -> Layout {
    Layout::for_request(GridRequest::Explicit { columns: requested_columns, rows: requested_rows }, policy)
}

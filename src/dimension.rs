//! Grid dimension normalization.
//!
//! Every grid size that reaches the layout pass goes through [`validate`],
//! so a [`GridSize`] is always within `[MIN_DIMENSION, MAX_DIMENSION]` on
//! both axes. Callers never see a failure: missing or non-numeric input falls
//! back to the default, everything else is rounded and clamped.

#[cfg(test)]
#[path = "dimension_test.rs"]
mod dimension_test;

use serde::Serialize;

use crate::consts::{ASPECT_RATIO, DEFAULT_DIMENSION, MAX_DIMENSION, MIN_DIMENSION};

/// Validated grid dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridSize {
    pub columns: u32,
    pub rows: u32,
}

impl GridSize {
    /// Validate both axes of a requested size.
    #[must_use]
    pub fn new(columns: Option<f64>, rows: Option<f64>) -> Self {
        Self { columns: validate(columns), rows: validate(rows) }
    }

    /// Resolve and validate a grid request.
    #[must_use]
    pub fn from_request(request: GridRequest) -> Self {
        let (columns, rows) = request.raw_dimensions();
        Self::new(columns, rows)
    }

    /// Total number of cells.
    #[must_use]
    pub fn cell_count(self) -> usize {
        self.columns as usize * self.rows as usize
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::from_request(GridRequest::Default)
    }
}

/// Normalize a requested dimension.
///
/// `None` and NaN yield [`DEFAULT_DIMENSION`]. Any other value is rounded to
/// the nearest integer (half away from zero) and clamped into
/// `[MIN_DIMENSION, MAX_DIMENSION]`; infinities clamp to the nearest bound.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn validate(dim: Option<f64>) -> u32 {
    match dim {
        Some(d) if !d.is_nan() => d.round().clamp(f64::from(MIN_DIMENSION), f64::from(MAX_DIMENSION)) as u32,
        _ => DEFAULT_DIMENSION,
    }
}

/// A request to (re)generate the grid.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GridRequest {
    /// Use the default size on the column axis.
    #[default]
    Default,
    /// A single size driving the column axis; rows follow the aspect ratio.
    Size(f64),
    /// Explicit axes. A missing axis is derived from the other through the
    /// aspect ratio; if both are missing this behaves like [`GridRequest::Default`].
    Explicit { columns: Option<f64>, rows: Option<f64> },
}

impl GridRequest {
    /// Raw (pre-validation) column and row values for this request.
    ///
    /// A `Size` of zero or NaN counts as "no size".
    #[must_use]
    pub fn raw_dimensions(self) -> (Option<f64>, Option<f64>) {
        let default = f64::from(DEFAULT_DIMENSION);
        match self {
            Self::Default => (Some(default), Some(rows_for(default))),
            Self::Size(size) if size == 0.0 || size.is_nan() => (Some(default), Some(rows_for(default))),
            Self::Size(size) => (Some(size), Some(rows_for(size))),
            Self::Explicit { columns: Some(c), rows: Some(r) } => (Some(c), Some(r)),
            Self::Explicit { columns: Some(c), rows: None } => (Some(c), Some(rows_for(c))),
            Self::Explicit { columns: None, rows: Some(r) } => (Some(columns_for(r)), Some(r)),
            Self::Explicit { columns: None, rows: None } => Self::Default.raw_dimensions(),
        }
    }
}

fn rows_for(columns: f64) -> f64 {
    (columns * ASPECT_RATIO).round()
}

fn columns_for(rows: f64) -> f64 {
    (rows / ASPECT_RATIO).round()
}

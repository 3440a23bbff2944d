//! Render-side vocabulary shared by the core and the browser shell.
//!
//! The core never touches the DOM. It describes which cells to clear and
//! create; the shell materializes them. Placeholder shading is cosmetic and
//! lives here so the shell and tests draw it the same way.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use rand::Rng;
use serde::Serialize;

use crate::consts::PLACEHOLDER_MAX_ALPHA;

/// One cell to create, addressed 1-indexed like [`crate::mapper::CellPosition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellSpec {
    pub row: u32,
    pub col: u32,
}

/// All cells of one grid row, in column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowCells {
    pub row: u32,
    pub cells: Vec<CellSpec>,
}

impl RowCells {
    /// Cells `1..=columns` of `row`.
    #[must_use]
    pub fn new(row: u32, columns: u32) -> Self {
        Self { row, cells: (1..=columns).map(|col| CellSpec { row, col }).collect() }
    }

    /// Number of cells to create.
    #[must_use]
    pub fn count(&self) -> usize {
        self.cells.len()
    }
}

/// Which visual cells to drop before recreating them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CellScope {
    All,
    Row(u32),
}

/// Alpha in `[0, PLACEHOLDER_MAX_ALPHA)` for a freshly created cell.
pub fn placeholder_alpha<R: Rng>(rng: &mut R) -> f64 {
    rng.random_range(0.0..PLACEHOLDER_MAX_ALPHA)
}

/// CSS background for a freshly created cell.
pub fn placeholder_shade<R: Rng>(rng: &mut R) -> String {
    format!("rgba(0, 0, 0, {})", placeholder_alpha(rng))
}

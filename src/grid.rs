//! Logical grid content and regeneration planning.
//!
//! The grid is either not created yet or populated with one value per cell.
//! Regeneration zeroes the affected cells and returns a [`Regeneration`]
//! telling the renderer what to clear and what to create. A single-row
//! regeneration produces exactly the row a full regeneration would.

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;

use crate::dimension::GridSize;
use crate::render::{CellScope, RowCells};

/// Cell values of a populated grid, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellGrid {
    size: GridSize,
    cells: Vec<u8>,
}

impl CellGrid {
    /// All-zero grid of the given size.
    #[must_use]
    pub fn zeroed(size: GridSize) -> Self {
        Self { size, cells: vec![0; size.cell_count()] }
    }

    #[must_use]
    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Value at a 1-indexed cell, if it exists.
    #[must_use]
    pub fn get(&self, col: u32, row: u32) -> Option<u8> {
        self.index(col, row).and_then(|i| self.cells.get(i).copied())
    }

    /// Row-major cell values.
    #[must_use]
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    fn index(&self, col: u32, row: u32) -> Option<usize> {
        let in_range = (1..=self.size.columns).contains(&col) && (1..=self.size.rows).contains(&row);
        in_range.then(|| (row as usize - 1) * self.size.columns as usize + (col as usize - 1))
    }

    fn zero_row(&mut self, row: u32) {
        let columns = self.size.columns as usize;
        let start = (row as usize - 1) * columns;
        if let Some(slice) = self.cells.get_mut(start..start + columns) {
            slice.fill(0);
        }
    }
}

/// Whether the grid exists yet.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GridState {
    #[default]
    Uninitialized,
    Populated(CellGrid),
}

/// What to regenerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegenScope {
    /// Every row.
    Full,
    /// A single 1-indexed row.
    Row(u32),
}

/// Render work produced by a regeneration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Regeneration {
    /// Cells to clear first, if any.
    pub clear: Option<CellScope>,
    /// Rows to create, in order.
    pub rows: Vec<RowCells>,
}

impl GridState {
    /// The populated grid, if any.
    #[must_use]
    pub fn grid(&self) -> Option<&CellGrid> {
        match self {
            Self::Uninitialized => None,
            Self::Populated(grid) => Some(grid),
        }
    }

    /// Reset content for `scope` and plan the matching render work.
    ///
    /// A row regeneration on a grid that does not exist yet, or whose size
    /// differs from `size`, becomes a full regeneration. A row outside the
    /// grid produces no work.
    pub fn regenerate(&mut self, size: GridSize, scope: RegenScope) -> Regeneration {
        let RegenScope::Row(row) = scope else {
            return self.regenerate_full(size);
        };
        if !matches!(self, Self::Populated(grid) if grid.size == size) {
            tracing::debug!(row, "grid not populated at this size, regenerating in full");
            return self.regenerate_full(size);
        }
        if !(1..=size.rows).contains(&row) {
            tracing::warn!(row, rows = size.rows, "row regeneration outside grid ignored");
            return Regeneration::default();
        }
        if let Self::Populated(grid) = self {
            grid.zero_row(row);
        }
        Regeneration { clear: Some(CellScope::Row(row)), rows: vec![RowCells::new(row, size.columns)] }
    }

    fn regenerate_full(&mut self, size: GridSize) -> Regeneration {
        *self = Self::Populated(CellGrid::zeroed(size));
        Regeneration {
            clear: Some(CellScope::All),
            rows: (1..=size.rows).map(|row| RowCells::new(row, size.columns)).collect(),
        }
    }
}

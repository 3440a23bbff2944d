//! Snapshots for the diagnostic readout.
//!
//! The readout is a pure sink: it renders what the session publishes and
//! never feeds back. Text helpers keep the panel format in one place.

#[cfg(test)]
#[path = "debug_test.rs"]
mod debug_test;

use serde::Serialize;

use crate::mapper::{CellPosition, Point};

/// State published after every tick and on pointer-leave.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DebugSnapshot {
    /// Ticks are running.
    pub poll_active: bool,
    /// Ticks left before pausing; zero when not tracking.
    pub countdown: u32,
    /// Pointer relative to the surface, once known.
    pub surface_position: Option<Point>,
    /// Pixel size of one cell.
    pub cell_size: u32,
    /// Cell under the pointer, once known.
    pub cell_position: Option<CellPosition>,
}

impl DebugSnapshot {
    #[must_use]
    pub fn poll_status(&self) -> &'static str {
        if self.poll_active { "Active" } else { "Inactive" }
    }

    #[must_use]
    pub fn cursor_text(&self) -> String {
        match self.surface_position {
            Some(p) => format!("x: {}, y: {}", p.x, p.y),
            None => "x: -, y: -".to_string(),
        }
    }

    #[must_use]
    pub fn cell_size_text(&self) -> String {
        format!("{0}x{0}", self.cell_size)
    }

    #[must_use]
    pub fn cell_text(&self) -> String {
        match self.cell_position {
            Some(c) => format!("x: {}, y: {}", c.col, c.row),
            None => "x: -, y: -".to_string(),
        }
    }
}

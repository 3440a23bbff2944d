//! Shared numeric constants for the etch pad core.

// ── Grid dimensions ─────────────────────────────────────────────

/// Grid dimension used when a request does not name one.
pub const DEFAULT_DIMENSION: u32 = 64;

/// Smallest accepted grid dimension (columns or rows).
pub const MIN_DIMENSION: u32 = 2;

/// Largest accepted grid dimension (columns or rows).
pub const MAX_DIMENSION: u32 = 128;

/// Height-to-width ratio of the drawable area (108 mm by 154 mm on the real toy).
pub const ASPECT_RATIO: f64 = 0.65;

// ── Idle polling ────────────────────────────────────────────────

/// Delay between idle-check ticks, in milliseconds.
pub const POLL_DELAY_MS: u32 = 100;

/// Ticks without a cell change before the session pauses.
pub const IDLE_TICKS: u32 = 20;

// ── Rendering ───────────────────────────────────────────────────

/// Upper bound (exclusive) of the placeholder shade alpha for fresh cells.
pub const PLACEHOLDER_MAX_ALPHA: f64 = 0.1;

/// Background of the surface borders while paused.
pub const PAUSED_BORDER_COLOR: &str = "rgba(0,0,0,0.8)";

//! Idle detection: a countdown advanced by fixed-cadence ticks.
//!
//! The detector never owns a timer. The session arms it on pointer-enter and
//! feeds it one [`IdleDetector::tick`] per poll interval with the answer to
//! "did the pointer land on a different cell since the last tick?". Movement
//! re-arms the countdown; running out of ticks pauses the session. Because
//! ticks run at a fixed cadence, a pause always resolves within
//! `idle_ticks × poll_delay` of the last cell change no matter how many raw
//! pointer events arrived in between.

#[cfg(test)]
#[path = "idle_test.rs"]
mod idle_test;

use serde::Serialize;

use crate::consts::IDLE_TICKS;

/// Lifecycle of a drawing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum SessionState {
    /// Pointer is off the surface; no ticks are scheduled.
    #[default]
    Idle,
    /// Pointer is over the surface and ticks are running.
    Tracking {
        /// Ticks left before pausing.
        countdown: u32,
    },
    /// Countdown ran out; waits for the next pointer-enter.
    Paused,
}

impl SessionState {
    /// Whether ticks are currently running.
    #[must_use]
    pub fn is_tracking(self) -> bool {
        matches!(self, Self::Tracking { .. })
    }

    /// Current countdown; zero outside of tracking.
    #[must_use]
    pub fn countdown(self) -> u32 {
        match self {
            Self::Tracking { countdown } => countdown,
            Self::Idle | Self::Paused => 0,
        }
    }
}

/// How a tick treats a cell change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetPolicy {
    /// A cell change re-arms the countdown.
    ResetOnMove,
    /// Ignore cell changes on this tick (the first tick of a session).
    Suppress,
}

/// Outcome of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickVerdict {
    /// Keep polling; the next tick should be scheduled.
    Continue { countdown: u32 },
    /// The countdown is exhausted; the session pauses.
    Exhausted,
}

/// Countdown state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdleDetector {
    idle_ticks: u32,
}

impl Default for IdleDetector {
    fn default() -> Self {
        Self::new(IDLE_TICKS)
    }
}

impl IdleDetector {
    /// Detector that pauses after `idle_ticks` ticks without a cell change.
    ///
    /// A value of zero is raised to one so a session always gets at least one tick.
    #[must_use]
    pub fn new(idle_ticks: u32) -> Self {
        Self { idle_ticks: idle_ticks.max(1) }
    }

    /// Configured countdown length.
    #[must_use]
    pub fn idle_ticks(&self) -> u32 {
        self.idle_ticks
    }

    /// State of a freshly armed session.
    #[must_use]
    pub fn arm(&self) -> SessionState {
        SessionState::Tracking { countdown: self.idle_ticks }
    }

    /// Advance one tick from `countdown`.
    #[must_use]
    pub fn tick(&self, countdown: u32, cell_changed: bool, policy: ResetPolicy) -> TickVerdict {
        let countdown = if cell_changed && policy == ResetPolicy::ResetOnMove { self.idle_ticks } else { countdown };
        if countdown <= 1 {
            return TickVerdict::Exhausted;
        }
        TickVerdict::Continue { countdown: countdown - 1 }
    }
}

//! Session configuration.
//!
//! Defaults poll every 100 ms and pause after 20 idle polls. The debug
//! readout is switched on from the page query string, read once at startup.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::consts::{IDLE_TICKS, POLL_DELAY_MS};

/// Errors raised while building a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("poll delay must be at least 1 ms")]
    ZeroPollDelay,
    #[error("idle countdown must be at least 1 tick")]
    ZeroIdleTicks,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EtchConfig {
    /// Publish debug snapshots.
    pub debug: bool,
    /// Delay between idle-check ticks.
    pub poll_delay_ms: u32,
    /// Ticks without a cell change before pausing.
    pub idle_ticks: u32,
}

impl Default for EtchConfig {
    fn default() -> Self {
        Self { debug: false, poll_delay_ms: POLL_DELAY_MS, idle_ticks: IDLE_TICKS }
    }
}

impl EtchConfig {
    /// Build a config from a page query string such as `?debug=true`.
    ///
    /// Debug is enabled only by the exact value `true`; every other parameter
    /// is ignored.
    #[must_use]
    pub fn from_query(search: &str) -> Self {
        Self { debug: query_flag(search, "debug"), ..Self::default() }
    }

    /// Override the polling cadence.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if either value is zero.
    pub fn with_timing(self, poll_delay_ms: u32, idle_ticks: u32) -> Result<Self, ConfigError> {
        if poll_delay_ms == 0 {
            return Err(ConfigError::ZeroPollDelay);
        }
        if idle_ticks == 0 {
            return Err(ConfigError::ZeroIdleTicks);
        }
        Ok(Self { poll_delay_ms, idle_ticks, ..self })
    }

    /// Toggle debug snapshots.
    #[must_use]
    pub fn with_debug(self, debug: bool) -> Self {
        Self { debug, ..self }
    }
}

/// Whether `key=true` appears in the query string. The first occurrence wins.
fn query_flag(search: &str, key: &str) -> bool {
    search
        .trim_start_matches('?')
        .split('&')
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .find(|(k, _)| *k == key)
        .is_some_and(|(_, v)| v == "true")
}

//! Configuration types and defaults for setupvisor.
//!
//! Keeps schema definitions in one place for easier auditing.

use serde::{Deserialize, Serialize};

/// Top-level configuration loaded from config.toml.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub supervisor: SupervisorConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct GeneralConfig {
    pub log_level: Option<String>,
}

/// Timing and display settings for supervised actions.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct SupervisorConfig {
    /// Period of the simulated progress tick while the action runs.
    pub tick_interval_ms: u64,
    /// Period of the catch-up animation after a successful action.
    pub catch_up_interval_ms: u64,
    /// Maximum used when the caller does not expose its own progress maximum.
    pub progress_maximum: u32,
    /// Advisory duration shown in the wait banner. Not enforced.
    pub expected_minutes: u32,
}

impl SupervisorConfig {
    pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1000;
    pub const DEFAULT_CATCH_UP_INTERVAL_MS: u64 = 5;
    pub const DEFAULT_PROGRESS_MAXIMUM: u32 = 100;
    pub const DEFAULT_EXPECTED_MINUTES: u32 = 5;
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: Self::DEFAULT_TICK_INTERVAL_MS,
            catch_up_interval_ms: Self::DEFAULT_CATCH_UP_INTERVAL_MS,
            progress_maximum: Self::DEFAULT_PROGRESS_MAXIMUM,
            expected_minutes: Self::DEFAULT_EXPECTED_MINUTES,
        }
    }
}

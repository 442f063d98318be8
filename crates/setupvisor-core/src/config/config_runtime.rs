//! Validation and runtime conversions for configuration values.

use std::time::Duration;

use super::{Config, ConfigError, SupervisorConfig};

impl Config {
    /// Reject values the supervisor cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.supervisor.validate()
    }
}

impl SupervisorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "supervisor.tick_interval_ms must be positive".to_string(),
            ));
        }
        if self.catch_up_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "supervisor.catch_up_interval_ms must be positive".to_string(),
            ));
        }
        if self.progress_maximum == 0 {
            return Err(ConfigError::Invalid(
                "supervisor.progress_maximum must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        // Zero periods would make tokio intervals panic; clamp to 1ms.
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    pub fn catch_up_interval(&self) -> Duration {
        Duration::from_millis(self.catch_up_interval_ms.max(1))
    }
}

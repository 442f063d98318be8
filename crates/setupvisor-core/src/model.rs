//! Progress and outcome types shared by the supervisor and its callers.

use crate::SupervisorConfig;

/// Outcome of a supervised action: `Ok(())` on success, the action's own error otherwise.
pub type ActionResult<E> = Result<(), E>;

/// Snapshot of a progress indicator as the presentation layer holds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressState {
    pub value: u32,
    pub maximum: u32,
    pub visible: bool,
}

impl ProgressState {
    pub fn with_maximum(maximum: u32) -> Self {
        Self {
            value: 0,
            maximum,
            visible: false,
        }
    }

    /// Steps left before the indicator reads full; zero once value reaches maximum.
    pub fn remaining(&self) -> u32 {
        self.maximum.saturating_sub(self.value)
    }

    /// Whether the value lies within `0..=maximum` with a positive maximum.
    pub fn at_rest_bounded(&self) -> bool {
        self.maximum > 0 && self.value <= self.maximum
    }

    /// Completed fraction in `0.0..=1.0`, saturating when the value overshoots.
    pub fn ratio(&self) -> f64 {
        if self.maximum == 0 {
            return 0.0;
        }
        (f64::from(self.value) / f64::from(self.maximum)).min(1.0)
    }
}

impl Default for ProgressState {
    fn default() -> Self {
        Self::with_maximum(SupervisorConfig::DEFAULT_PROGRESS_MAXIMUM)
    }
}

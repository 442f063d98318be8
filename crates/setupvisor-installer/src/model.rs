//! Shared installer types for step selection and progress reporting.

use std::time::Duration;

use crate::actions::StepKind;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StepStatus {
    Pending,
    Running,
    Done,
    Failed,
}

pub struct ActionStep {
    pub name: &'static str,
    pub status: StepStatus,
}

/// Knobs for the simulated server.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationOptions {
    /// Step that fails instead of completing.
    pub fail_at: Option<StepKind>,
    /// Step during which the server reports itself busy.
    pub busy_at: Option<StepKind>,
    /// How long the busy period lasts.
    pub busy_for: Duration,
}

impl SimulationOptions {
    pub const DEFAULT_FAIL_STEP: StepKind = StepKind::InstallContainer;
    pub const DEFAULT_BUSY_STEP: StepKind = StepKind::WaitPackageManager;
    pub const DEFAULT_BUSY_SECS: u64 = 8;

    pub fn toggle_failure(&mut self) {
        self.fail_at = match self.fail_at {
            Some(_) => None,
            None => Some(Self::DEFAULT_FAIL_STEP),
        };
    }

    pub fn toggle_busy(&mut self) {
        self.busy_at = match self.busy_at {
            Some(_) => None,
            None => Some(Self::DEFAULT_BUSY_STEP),
        };
    }
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            fail_at: None,
            busy_at: None,
            busy_for: Duration::from_secs(Self::DEFAULT_BUSY_SECS),
        }
    }
}

//! Step planning for the server configuration flow.

use std::time::Duration;

use clap::ValueEnum;

use crate::model::{ActionStep, StepStatus};

use super::ConfigureError;

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum StepKind {
    Connect,
    CheckServer,
    WaitPackageManager,
    InstallContainer,
    ConfigureFirewall,
    StartService,
}

impl StepKind {
    pub fn label(self) -> &'static str {
        match self {
            StepKind::Connect => "Connect to server",
            StepKind::CheckServer => "Check server",
            StepKind::WaitPackageManager => "Wait for package manager",
            StepKind::InstallContainer => "Install container",
            StepKind::ConfigureFirewall => "Configure firewall",
            StepKind::StartService => "Start service",
        }
    }

    /// Simulated time the step takes on the server.
    pub fn duration(self) -> Duration {
        let secs = match self {
            StepKind::Connect => 2,
            StepKind::CheckServer => 3,
            StepKind::WaitPackageManager => 4,
            StepKind::InstallContainer => 20,
            StepKind::ConfigureFirewall => 5,
            StepKind::StartService => 3,
        };
        Duration::from_secs(secs)
    }

    /// Error the step reports when told to fail.
    pub fn failure(self) -> ConfigureError {
        match self {
            StepKind::Connect => ConfigureError::ConnectionFailed,
            StepKind::CheckServer => ConfigureError::UnsupportedServer,
            StepKind::WaitPackageManager => ConfigureError::PackageManagerLocked,
            StepKind::InstallContainer => ConfigureError::ContainerInstallFailed,
            StepKind::ConfigureFirewall => ConfigureError::FirewallFailed,
            StepKind::StartService => ConfigureError::ServiceStartFailed,
        }
    }
}

pub fn build_plan() -> Vec<StepKind> {
    vec![
        StepKind::Connect,
        StepKind::CheckServer,
        StepKind::WaitPackageManager,
        StepKind::InstallContainer,
        StepKind::ConfigureFirewall,
        StepKind::StartService,
    ]
}

pub fn steps_from_plan(plan: &[StepKind]) -> Vec<ActionStep> {
    plan.iter()
        .map(|kind| ActionStep {
            name: kind.label(),
            status: StepStatus::Pending,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_connects_first_and_starts_service_last() {
        let plan = build_plan();
        assert_eq!(plan.first(), Some(&StepKind::Connect));
        assert_eq!(plan.last(), Some(&StepKind::StartService));
        assert!(plan.contains(&StepKind::WaitPackageManager));
    }

    #[test]
    fn steps_start_pending_with_labels() {
        let steps = steps_from_plan(&build_plan());
        assert_eq!(steps.len(), 6);
        assert!(steps.iter().all(|step| step.status == StepStatus::Pending));
        assert_eq!(steps[3].name, "Install container");
    }

    #[test]
    fn simulated_plan_fits_under_default_maximum() {
        // The tick reaches about one unit per simulated second.
        let total: Duration = build_plan().into_iter().map(StepKind::duration).sum();
        assert!(total < Duration::from_secs(100));
    }
}

//! Simulated remote server used as the supervised action.
//!
//! Each step sleeps for its simulated duration. The server can be told to
//! hold its package manager busy during one step, which it announces through
//! the shared busy signal, and to fail at one step.

use thiserror::Error;
use tokio::time::sleep;
use tracing::{debug, info};

use setupvisor_core::BusySignal;

use crate::events::WorkerEvent;
use crate::model::SimulationOptions;

use super::StepKind;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum ConfigureError {
    #[error("SSH connection to the server failed")]
    ConnectionFailed,
    #[error("the server runs an unsupported distribution")]
    UnsupportedServer,
    #[error("the server package manager stayed locked")]
    PackageManagerLocked,
    #[error("container installation failed")]
    ContainerInstallFailed,
    #[error("firewall configuration failed")]
    FirewallFailed,
    #[error("service failed to start")]
    ServiceStartFailed,
}

pub async fn configure_server(
    plan: &[StepKind],
    options: &SimulationOptions,
    busy: &BusySignal,
    report: impl Fn(WorkerEvent),
) -> Result<(), ConfigureError> {
    for (index, step) in plan.iter().enumerate() {
        report(WorkerEvent::StepStarted(index));
        info!(step = step.label(), "step started");

        if options.busy_at == Some(*step) {
            report(WorkerEvent::LogLine(
                "Server package manager is busy with other software".to_string(),
            ));
            busy.set_busy(true);
            sleep(options.busy_for).await;
            busy.set_busy(false);
            report(WorkerEvent::LogLine("Server package manager is free".to_string()));
        }

        sleep(step.duration()).await;

        if options.fail_at == Some(*step) {
            let err = step.failure();
            report(WorkerEvent::StepFailed(index, err.to_string()));
            return Err(err);
        }
        debug!(step = step.label(), "step completed");
        report(WorkerEvent::StepCompleted(index));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::time::Duration;

    use tokio::time::Instant;

    use super::*;
    use crate::actions::build_plan;

    #[tokio::test(start_paused = true)]
    async fn clean_run_completes_every_step() {
        let plan = build_plan();
        let busy = BusySignal::new();
        let events = RefCell::new(Vec::new());

        let result = configure_server(&plan, &SimulationOptions::default(), &busy, |event| {
            events.borrow_mut().push(event)
        })
        .await;

        assert_eq!(result, Ok(()));
        let completed = events
            .borrow()
            .iter()
            .filter(|event| matches!(event, WorkerEvent::StepCompleted(_)))
            .count();
        assert_eq!(completed, plan.len());
    }

    #[tokio::test(start_paused = true)]
    async fn failing_step_stops_the_plan() {
        let plan = build_plan();
        let busy = BusySignal::new();
        let options = SimulationOptions {
            fail_at: Some(StepKind::CheckServer),
            ..SimulationOptions::default()
        };
        let events = RefCell::new(Vec::new());

        let result =
            configure_server(&plan, &options, &busy, |event| events.borrow_mut().push(event))
                .await;

        assert_eq!(result, Err(ConfigureError::UnsupportedServer));
        assert_eq!(
            events.into_inner(),
            vec![
                WorkerEvent::StepStarted(0),
                WorkerEvent::StepCompleted(0),
                WorkerEvent::StepStarted(1),
                WorkerEvent::StepFailed(
                    1,
                    "the server runs an unsupported distribution".to_string()
                ),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn busy_step_holds_the_signal() {
        let plan = [StepKind::WaitPackageManager];
        let busy = BusySignal::new();
        let mut sub = busy.subscribe();
        let options = SimulationOptions {
            busy_at: Some(StepKind::WaitPackageManager),
            busy_for: Duration::from_secs(3),
            ..SimulationOptions::default()
        };
        let start = Instant::now();

        let run = configure_server(&plan, &options, &busy, |_| {});
        let watch = async {
            let first = sub.changed().await;
            let second = sub.changed().await;
            (first, second)
        };
        let (result, (first, second)) = tokio::join!(run, watch);

        assert_eq!(result, Ok(()));
        assert_eq!(first, Some(true));
        assert_eq!(second, Some(false));
        assert!(!busy.is_busy());
        assert!(start.elapsed() >= Duration::from_secs(3) + StepKind::WaitPackageManager.duration());
    }
}

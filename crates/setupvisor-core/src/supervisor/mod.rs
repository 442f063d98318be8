//! Supervision of one long-running, fallible action with simulated progress.
//!
//! The real progress of the action cannot be observed, so the supervisor
//! ticks the progress value on a timer while the action runs, pauses that
//! tick while a [`BusySignal`] reports the shared dependency as busy, and
//! sweeps the value to its maximum once the action succeeds.

#[path = "supervisor_busy.rs"]
mod supervisor_busy;
#[path = "supervisor_effects.rs"]
mod supervisor_effects;
#[path = "supervisor_session.rs"]
mod supervisor_session;

use std::fmt::Display;
use std::future::Future;

use tracing::{info, warn};

use crate::util::log_snippet;
use crate::{ActionResult, SupervisorConfig};

pub use supervisor_busy::{BusySignal, BusySubscription};
pub use supervisor_effects::{
    Effects, GetValueFn, PageEffects, ProgressEffects, SetValueFn, TextFn, ToggleFn,
    WidgetEffects,
};

use supervisor_session::SupervisionSession;

/// Wait banner text once the action has finished.
pub const FINISHED_MESSAGE: &str = "Operation finished";
/// Busy banner text while the shared dependency is occupied.
pub const BUSY_MESSAGE: &str = "The server is currently busy installing other software. \
Installation will pause until the server finishes installing other software";
/// First line of the error notice; the error description follows on the next line.
pub const ERROR_PREFIX: &str = "Error occurred while configuring server.";

/// Drives one action at a time; `run` takes `&mut self`, so a second call
/// cannot start while one is outstanding.
#[derive(Debug, Clone, Default)]
pub struct ActionSupervisor {
    config: SupervisorConfig,
}

impl ActionSupervisor {
    pub fn new(config: SupervisorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SupervisorConfig {
        &self.config
    }

    /// Wait banner text shown while the action runs.
    pub fn wait_message(&self) -> String {
        let minutes = self.config.expected_minutes;
        let unit = if minutes == 1 { "minute" } else { "minutes" };
        format!("Please wait, configuring process may take up to {minutes} {unit}")
    }

    /// Runs `action` to completion while driving `effects`.
    ///
    /// The action, the progress tick and the busy handler share the calling
    /// task; nothing is spawned. The action's result is returned unchanged
    /// after the page has been restored.
    pub async fn run<F, Fut, E>(
        &mut self,
        action: F,
        effects: &Effects<'_>,
        busy: Option<&BusySignal>,
    ) -> ActionResult<E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ActionResult<E>>,
        E: Display,
    {
        let wait_message = self.wait_message();
        let mut session = SupervisionSession::start(&self.config, effects, busy, &wait_message);
        info!(
            maximum = session.maximum(),
            busy_observed = effects.busy_info.has_text() && busy.is_some(),
            "supervised action started"
        );

        let action = action();
        tokio::pin!(action);
        let result = loop {
            tokio::select! {
                biased;
                result = &mut action => break result,
                event = session.next_event() => session.handle(event),
            }
        };
        session.release_busy();

        match &result {
            Ok(()) => {
                session.succeed().await;
                info!(value = session.value(), "supervised action finished");
            }
            Err(err) => {
                warn!(error = %log_snippet(&err.to_string()), "supervised action failed");
                session.fail(err);
            }
        }
        result
    }
}

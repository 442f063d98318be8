//! Events emitted by the simulated server while the supervised action runs.

#[derive(Clone, Debug, PartialEq)]
pub enum WorkerEvent {
    StepStarted(usize),
    StepCompleted(usize),
    StepFailed(usize, String),
    LogLine(String),
}

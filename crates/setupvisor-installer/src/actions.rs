//! Server configuration steps run under the action supervisor.

#[path = "actions_plan.rs"]
mod actions_plan;
#[path = "actions_simulate.rs"]
mod actions_simulate;

pub use actions_plan::{build_plan, steps_from_plan, StepKind};
pub use actions_simulate::{configure_server, ConfigureError};

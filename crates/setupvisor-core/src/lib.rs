//! Shared types, configuration, and the action supervisor for setupvisor.

pub mod config;
pub mod model;
pub mod supervisor;
pub mod util;

pub use config::*;
pub use model::*;
pub use supervisor::*;
pub use util::log_snippet;

//! Configuration module wiring for setupvisor.
//!
//! Keeps config types, I/O, and validation in separate files.

mod config_io;
mod config_runtime;
mod config_types;

pub use config_io::ConfigError;
pub use config_types::*;

//! Configuration module for the directory CLI.
//! Reads settings from the environment and wires the query service.
mod dependencies;
mod settings;

pub use dependencies::Dependencies;
pub use settings::{DatabaseConfig, LogFormat, Settings, DEFAULT_MAX_CONNECTIONS};

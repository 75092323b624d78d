//! # Directory CLI
//!
//! Command-line front end for the organization directory. Each invocation reads its
//! configuration from the environment, runs one query against PostgreSQL and prints
//! the result as JSON.
//!
//! ## Modules
//!
//! - [`config`]: Settings and dependency initialization
//! - [`commands`]: Subcommands and their execution
//! - [`errors`]: Error types for the binary

pub mod commands;
pub mod config;
pub mod errors;

pub use commands::{Cli, Command};
pub use config::{Dependencies, LogFormat, Settings};
pub use errors::CliError;

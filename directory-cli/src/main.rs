//! Directory CLI Main Entry Point
//!
//! Runs a single directory query against PostgreSQL and prints the result as JSON.

use clap::Parser;
use directory_cli::{commands, Cli, CliError, Dependencies, LogFormat, Settings};
use dotenv::dotenv;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging. Logs go to stderr so stdout carries only query output.
fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("directory=info,directory_query=info,directory_repository=info")
    });

    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_target(true)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(true)
                        .with_writer(std::io::stderr)
                        .pretty(),
                )
                .init();
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    dotenv().ok();

    init_tracing(LogFormat::from_env());

    let cli = Cli::parse();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return Err(e);
        }
    };

    let deps = match Dependencies::new(&settings).await {
        Ok(deps) => {
            info!("Dependencies initialized successfully");
            deps
        }
        Err(e) => {
            error!(error = %e, "Failed to initialize dependencies");
            return Err(e);
        }
    };

    match commands::execute(&deps.service, &cli.command).await {
        Ok(value) => {
            println!("{}", commands::render(&value, cli.pretty)?);
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Query failed");
            Err(e)
        }
    }
}

//! Trak CLI Binary
//!
//! Command-line interface for the Trak project-tracking service.

use anyhow::anyhow;
use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};
use trak::cli::{map_error, Cli, RunContext};
use trak::config::ConfigLoader;
use trak::logging::{init_logging, LoggingConfig};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let logging_config = build_logging_config(&cli);
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    info!("Trak CLI starting");

    match run(&cli) {
        Ok(output) => {
            info!("Command completed successfully");
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("Command failed: {err}");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<String> {
    let context = RunContext::new(cli.config.clone()).map_err(|e| anyhow!("{}", map_error(&e)))?;
    let output = context
        .execute(&cli.command)
        .map_err(|e| anyhow!("{}", map_error(&e)))?;
    Ok(output)
}

/// Build logging configuration from CLI args, environment, and config file.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    let mut config = if let Some(ref config_path) = cli.config {
        ConfigLoader::load_from_file(config_path)
            .ok()
            .map(|c| c.logging)
            .unwrap_or_default()
    } else {
        ConfigLoader::load()
            .ok()
            .map(|c| c.logging)
            .unwrap_or_default()
    };

    if cli.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }

    config
}

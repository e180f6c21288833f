//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `vanish` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger and HTTP client initialization
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use vanish::app::run_command;
use vanish::config::Opt;
use vanish::initialization::{init_client, init_logger_with};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; flags and the environment still apply
    let _ = dotenvy::dotenv();

    let opt = Opt::parse();

    let config = match opt.to_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("vanish error: {:#}", e);
            process::exit(2);
        }
    };
    if let Err(e) = config.validate() {
        eprintln!("vanish error: {}", e);
        process::exit(2);
    }

    init_logger_with(config.log_level.into(), config.log_format)
        .context("Failed to initialize logger")?;

    let client = init_client(&config).context("Failed to initialize HTTP client")?;

    if let Err(e) = run_command(opt.command, &config, client).await {
        eprintln!("vanish error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}

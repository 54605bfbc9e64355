//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `flight_scrape` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use flight_scrape::initialization::{init_header_source, init_logger_with};
use flight_scrape::{run_scrape, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists)
    // Try the current directory first, then the executable's directory
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    let source = init_header_source(&config);
    let output_dir = config.output_dir.clone();

    match run_scrape(config, source).await {
        Ok(report) => {
            // The run summary itself is logged by the library
            println!(
                "{} CSV file{} saved in {}",
                report.files.len(),
                if report.files.len() == 1 { "" } else { "s" },
                output_dir.display()
            );
            if report.dates_failed > 0 {
                process::exit(1);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("flight_scrape error: {:#}", e);
            process::exit(1);
        }
    }
}

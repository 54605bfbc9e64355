//! Logger initialization.
//!
//! Plain lines read `HH:MM:SS ✈️ target [LEVEL] message`; JSON lines are one
//! object per record with `ts` (epoch millis), `level`, `target` and `msg`.

use std::io::Write;

use crate::config::LogFormat;
use crate::error_handling::InitializationError;
use colored::*;
use log::{Level, LevelFilter};
use serde_json::json;

/// HTTP and WebDriver internals are capped at `info` whatever level is requested.
const QUIET_MODULES: [&str; 4] = ["reqwest", "hyper", "hyper_util", "fantoccini"];

/// Initializes the logger with the specified level and format.
///
/// `RUST_LOG` is read first, then `level` overrides it for this crate and as
/// the global default.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
///
/// # Examples
///
/// ```bash
/// # Override with CLI args (takes precedence)
/// RUST_LOG=debug flight_scrape --log-level info
///
/// # Per-module filtering via RUST_LOG
/// RUST_LOG=flight_scrape=debug,fantoccini=debug flight_scrape
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    colored::control::set_override(true);

    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(level);
    for module in QUIET_MODULES {
        builder.filter_module(module, level.min(LevelFilter::Info));
    }
    builder.filter_module(env!("CARGO_CRATE_NAME"), level);

    match format {
        LogFormat::Json => builder.format(|buf, record| {
            let line = json_line(
                chrono::Utc::now().timestamp_millis(),
                record.level(),
                record.target(),
                &record.args().to_string(),
            );
            writeln!(buf, "{}", line)
        }),
        LogFormat::Plain => builder.format(|buf, record| {
            let clock = chrono::Local::now().format("%H:%M:%S").to_string();
            writeln!(
                buf,
                "{} {} {} [{}] {}",
                clock.dimmed(),
                level_marker(record.level()),
                record.target().cyan(),
                colored_level(record.level()),
                record.args()
            )
        }),
    };

    // try_init: tests may initialize the logger more than once
    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}

fn json_line(ts_millis: i64, level: Level, target: &str, msg: &str) -> String {
    json!({
        "ts": ts_millis,
        "level": level.as_str(),
        "target": target,
        "msg": msg,
    })
    .to_string()
}

fn level_marker(level: Level) -> &'static str {
    match level {
        Level::Error => "❌",
        Level::Warn => "⚠️",
        Level::Info => "✈️",
        Level::Debug => "🔍",
        Level::Trace => "🔬",
    }
}

fn colored_level(level: Level) -> ColoredString {
    let label = level.as_str();
    match level {
        Level::Error => label.red(),
        Level::Warn => label.yellow(),
        Level::Info => label.green(),
        Level::Debug => label.blue(),
        Level::Trace => label.purple(),
    }
}

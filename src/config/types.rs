//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use clap::{Parser, ValueEnum};

use crate::config::constants::*;
use crate::error_handling::RetryPolicy;
use crate::search::PayloadDate;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Scrape configuration.
///
/// Parsed from the command line by `main`, or constructed programmatically
/// from [`Config::default`], whose values match the CLI defaults.
///
/// # Examples
///
/// ```bash
/// # ORD -> ATH for the next 89 days, headers minted through chromedriver
/// flight_scrape
///
/// # A different route, a shorter window, headers from a file
/// flight_scrape --origin SFO --destination NRT --days 14 --headers-file headers.json
///
/// # Send each loop date in the payload instead of the pinned date
/// flight_scrape --search-each-date
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "flight_scrape",
    about = "Scrapes airline fare availability for a window of dates into per-date CSV files."
)]
pub struct Config {
    /// Origin airport code sent in the search payload
    #[arg(long, default_value = DEFAULT_ORIGIN)]
    pub origin: String,

    /// Destination airport code sent in the search payload
    #[arg(long, default_value = DEFAULT_DESTINATION)]
    pub destination: String,

    /// First day of the window is the day after this date (default: today)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Number of days to search
    #[arg(long, default_value_t = DEFAULT_WINDOW_DAYS)]
    pub days: u32,

    /// Directory receiving one CSV file per date
    #[arg(long, value_parser, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Flight search endpoint
    #[arg(long, env = "FLIGHT_SCRAPE_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Departure date embedded in every payload (ignored with --search-each-date)
    #[arg(long, default_value = DEFAULT_PINNED_DEPART_DATE)]
    pub pinned_depart_date: NaiveDate,

    /// Send each loop date in the payload instead of the pinned date
    #[arg(long)]
    pub search_each_date: bool,

    /// Read headers from a JSON object file instead of driving a browser
    #[arg(long, value_parser)]
    pub headers_file: Option<PathBuf>,

    /// WebDriver endpoint used for header capture
    #[arg(long, env = "WEBDRIVER_URL", default_value = DEFAULT_WEBDRIVER_URL)]
    pub webdriver_url: String,

    /// Run the capture browser without a window
    #[arg(long)]
    pub headless: bool,

    /// Origin typed into the booking form during header capture
    #[arg(long, default_value = DEFAULT_FORM_ORIGIN)]
    pub form_origin: String,

    /// Destination typed into the booking form during header capture
    #[arg(long, default_value = DEFAULT_FORM_DESTINATION)]
    pub form_destination: String,

    /// Upper bound on the wait for the search request during header capture
    #[arg(long, default_value_t = DEFAULT_CAPTURE_TIMEOUT_SECS)]
    pub capture_timeout_seconds: u64,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Maximum search attempts per date (initial attempt + retries)
    #[arg(long, default_value_t = RETRY_MAX_ATTEMPTS)]
    pub max_attempts: usize,

    /// Delay before the first retry in milliseconds (doubles per retry)
    #[arg(long, default_value_t = RETRY_INITIAL_DELAY_MS)]
    pub retry_initial_delay_ms: u64,

    /// Record a failed date and move on instead of aborting the run
    #[arg(long)]
    pub continue_on_error: bool,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Config {
    /// Departure date policy for the search payload.
    pub fn payload_date(&self) -> PayloadDate {
        if self.search_each_date {
            PayloadDate::PerRequest
        } else {
            PayloadDate::Pinned(self.pinned_depart_date)
        }
    }

    /// Retry policy applied to every search.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts.max(1),
            initial_delay_ms: self.retry_initial_delay_ms,
            max_delay: Duration::from_secs(RETRY_MAX_DELAY_SECS),
        }
    }

    /// Start of the date window, defaulting to the local date.
    pub fn start_date_or_today(&self) -> NaiveDate {
        self.start_date.unwrap_or_else(|| Local::now().date_naive())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            destination: DEFAULT_DESTINATION.to_string(),
            start_date: None,
            days: DEFAULT_WINDOW_DAYS,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            api_url: DEFAULT_API_URL.to_string(),
            pinned_depart_date: DEFAULT_PINNED_DEPART_DATE
                .parse()
                .unwrap_or_default(),
            search_each_date: false,
            headers_file: None,
            webdriver_url: DEFAULT_WEBDRIVER_URL.to_string(),
            headless: false,
            form_origin: DEFAULT_FORM_ORIGIN.to_string(),
            form_destination: DEFAULT_FORM_DESTINATION.to_string(),
            capture_timeout_seconds: DEFAULT_CAPTURE_TIMEOUT_SECS,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            max_attempts: RETRY_MAX_ATTEMPTS,
            retry_initial_delay_ms: RETRY_INITIAL_DELAY_MS,
            continue_on_error: false,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}

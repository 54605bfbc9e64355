//! Tests for CLI parsing.

use chrono::NaiveDate;
use clap::Parser;
use flight_scrape::config::{LogFormat, LogLevel};
use flight_scrape::{Config, PayloadDate};
use std::path::PathBuf;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[test]
fn test_defaults_reproduce_fixed_run() {
    let config = Config::try_parse_from(["flight_scrape"]).expect("defaults parse");
    assert_eq!(config.origin, "ORD");
    assert_eq!(config.destination, "ATH");
    assert_eq!(config.days, 89);
    assert_eq!(config.output_dir, PathBuf::from("data"));
    assert_eq!(config.payload_date(), PayloadDate::Pinned(date(2024, 2, 15)));
    assert!(config.headers_file.is_none());
    assert!(!config.continue_on_error);
    assert!(matches!(config.log_level, LogLevel::Info));
    assert!(matches!(config.log_format, LogFormat::Plain));
}

#[test]
fn test_route_and_window_flags() {
    let config = Config::try_parse_from([
        "flight_scrape",
        "--origin",
        "SFO",
        "--destination",
        "NRT",
        "--start-date",
        "2024-06-01",
        "--days",
        "14",
        "--output-dir",
        "/tmp/fares",
    ])
    .expect("flags parse");
    assert_eq!(config.origin, "SFO");
    assert_eq!(config.destination, "NRT");
    assert_eq!(config.start_date_or_today(), date(2024, 6, 1));
    assert_eq!(config.days, 14);
    assert_eq!(config.output_dir, PathBuf::from("/tmp/fares"));
}

#[test]
fn test_search_each_date_switches_payload_policy() {
    let config = Config::try_parse_from(["flight_scrape", "--search-each-date"])
        .expect("flag parses");
    assert_eq!(config.payload_date(), PayloadDate::PerRequest);

    let pinned = Config::try_parse_from(["flight_scrape", "--pinned-depart-date", "2024-07-04"])
        .expect("flag parses");
    assert_eq!(pinned.payload_date(), PayloadDate::Pinned(date(2024, 7, 4)));
}

#[test]
fn test_retry_flags_build_policy() {
    let config = Config::try_parse_from([
        "flight_scrape",
        "--max-attempts",
        "0",
        "--retry-initial-delay-ms",
        "200",
    ])
    .expect("flags parse");
    let policy = config.retry_policy();
    assert_eq!(policy.max_attempts, 1, "at least one attempt is always made");
    assert_eq!(policy.initial_delay_ms, 200);
}

#[test]
fn test_header_source_flags() {
    let config = Config::try_parse_from([
        "flight_scrape",
        "--headers-file",
        "headers.json",
        "--webdriver-url",
        "http://localhost:4444",
        "--headless",
        "--log-format",
        "json",
        "--log-level",
        "debug",
    ])
    .expect("flags parse");
    assert_eq!(config.headers_file, Some(PathBuf::from("headers.json")));
    assert_eq!(config.webdriver_url, "http://localhost:4444");
    assert!(config.headless);
    assert!(matches!(config.log_format, LogFormat::Json));
    assert!(matches!(config.log_level, LogLevel::Debug));
}

#[test]
fn test_invalid_values_rejected() {
    assert!(Config::try_parse_from(["flight_scrape", "--start-date", "06/01/2024"]).is_err());
    assert!(Config::try_parse_from(["flight_scrape", "--days", "-1"]).is_err());
    assert!(Config::try_parse_from(["flight_scrape", "--log-level", "verbose"]).is_err());
}

//! Application initialization and resource setup.
//!
//! This module provides functions to initialize shared resources:
//! - Logger
//! - HTTP client
//! - Header source (browser or headers file)
//!
//! All initialization functions return proper error types for error handling.

mod client;
mod logger;

use std::time::Duration;

pub use client::init_client;
pub use logger::init_logger_with;

use crate::config::Config;
use crate::error_handling::HeaderCaptureError;
use crate::headers::{BrowserHeaderSource, BrowserOptions, FileHeaderSource, HeaderSet, HeaderSource};

/// Header source selected by the configuration.
pub enum ConfiguredHeaderSource {
    /// Headers minted through a WebDriver-controlled browser
    Browser(BrowserHeaderSource),
    /// Headers read from a JSON file
    File(FileHeaderSource),
}

impl HeaderSource for ConfiguredHeaderSource {
    async fn fetch_headers(&mut self) -> Result<HeaderSet, HeaderCaptureError> {
        match self {
            ConfiguredHeaderSource::Browser(source) => source.fetch_headers().await,
            ConfiguredHeaderSource::File(source) => source.fetch_headers().await,
        }
    }
}

/// Initializes the header source.
///
/// A configured `--headers-file` wins; otherwise headers are captured through
/// the WebDriver endpoint.
pub fn init_header_source(config: &Config) -> ConfiguredHeaderSource {
    match &config.headers_file {
        Some(path) => ConfiguredHeaderSource::File(FileHeaderSource::new(path.clone())),
        None => ConfiguredHeaderSource::Browser(BrowserHeaderSource::new(BrowserOptions {
            webdriver_url: config.webdriver_url.clone(),
            headless: config.headless,
            form_origin: config.form_origin.clone(),
            form_destination: config.form_destination.clone(),
            capture_timeout: Duration::from_secs(config.capture_timeout_seconds),
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_headers_file_selects_file_source() {
        let config = Config {
            headers_file: Some(PathBuf::from("headers.json")),
            ..Default::default()
        };
        assert!(matches!(
            init_header_source(&config),
            ConfiguredHeaderSource::File(_)
        ));
    }

    #[test]
    fn test_browser_is_default_source() {
        assert!(matches!(
            init_header_source(&Config::default()),
            ConfiguredHeaderSource::Browser(_)
        ));
    }
}

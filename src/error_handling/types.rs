//! Error type definitions.
//!
//! This module defines the error types used throughout the application and the
//! failure kinds they are counted under.

use std::path::PathBuf;

use fantoccini::error::{CmdError, NewSessionError};
use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Error types for header capture.
#[derive(Error, Debug)]
pub enum HeaderCaptureError {
    /// The WebDriver session could not be started.
    #[error("WebDriver session error: {0}")]
    Session(#[from] NewSessionError),

    /// A WebDriver command failed (navigation, element lookup, script).
    #[error("WebDriver command error: {0}")]
    Command(#[from] CmdError),

    /// The search request never showed up in the page's traffic.
    #[error("no request matching '{marker}' observed within {waited_secs}s")]
    RequestNotObserved {
        /// URL substring that was polled for
        marker: String,
        /// Seconds spent polling
        waited_secs: u64,
    },

    /// The headers file could not be read.
    #[error("failed to read headers file {}: {source}", path.display())]
    HeadersFile {
        /// Path of the headers file
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The headers file is not a JSON object of strings.
    #[error("invalid headers file {}: {source}", path.display())]
    HeadersFileFormat {
        /// Path of the headers file
        path: PathBuf,
        /// Underlying parse error
        source: serde_json::Error,
    },

    /// Capture finished but produced no usable header.
    #[error("captured header set is empty")]
    Empty,
}

/// Error types for a single flight search.
#[derive(Error, Debug)]
pub enum SearchError {
    /// Transport failure: timeout, connection refused, reset, body read error.
    #[error("network error: {0}")]
    Network(#[from] ReqwestError),

    /// The endpoint rejected the current header set.
    #[error("request rejected with status {status}, headers need refreshing")]
    Authentication {
        /// HTTP status code (401 or 403)
        status: u16,
    },

    /// Any other non-success status.
    #[error("unexpected status {status}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
    },

    /// The body was not valid JSON.
    #[error("malformed response body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    /// Refreshing headers failed.
    #[error("header refresh failed: {0}")]
    HeaderCapture(#[from] HeaderCaptureError),

    /// Every attempt allowed by the retry policy failed.
    #[error("search failed after {attempts} attempts: {last}")]
    RetriesExhausted {
        /// Attempts made
        attempts: usize,
        /// Failure of the final attempt
        last: Box<SearchError>,
    },
}

impl SearchError {
    /// Failure kind this error is counted under.
    ///
    /// `RetriesExhausted` reports the kind of its final attempt.
    pub fn kind(&self) -> FailureKind {
        match self {
            SearchError::Network(_) => FailureKind::Network,
            SearchError::Authentication { .. } => FailureKind::Authentication,
            SearchError::HttpStatus { .. } => FailureKind::HttpStatus,
            SearchError::MalformedBody(_) => FailureKind::MalformedBody,
            SearchError::HeaderCapture(_) => FailureKind::HeaderCapture,
            SearchError::RetriesExhausted { last, .. } => last.kind(),
        }
    }

    /// Whether another attempt with fresh headers may succeed.
    ///
    /// Rate limiting (429) and server errors (5xx) are retried; other status
    /// codes are permanent.
    pub fn is_retriable(&self) -> bool {
        match self {
            SearchError::Network(_)
            | SearchError::Authentication { .. }
            | SearchError::MalformedBody(_) => true,
            SearchError::HttpStatus { status } => {
                *status == crate::config::HTTP_STATUS_TOO_MANY_REQUESTS
                    || (500..600).contains(status)
            }
            SearchError::HeaderCapture(_) | SearchError::RetriesExhausted { .. } => false,
        }
    }
}

/// Error types for record extraction.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExtractError {
    /// The response has no flight list at `data.Trips[0].Flights`.
    #[error("response has no flight list at data.Trips[0].Flights")]
    MissingFlights,
}

/// Kinds of failure counted during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum FailureKind {
    /// Transport failure talking to the search endpoint
    Network,
    /// 401 or 403 from the search endpoint
    Authentication,
    /// Any other non-success status
    HttpStatus,
    /// Response body that is not JSON
    MalformedBody,
    /// Header set could not be minted
    HeaderCapture,
    /// Response without a flight list
    Extraction,
    /// CSV file could not be written
    Export,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FailureKind {
    /// Human-readable label used in the run statistics.
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Network => "Network error",
            FailureKind::Authentication => "Rejected headers (401/403)",
            FailureKind::HttpStatus => "Unexpected HTTP status",
            FailureKind::MalformedBody => "Malformed response body",
            FailureKind::HeaderCapture => "Header capture failure",
            FailureKind::Extraction => "Unexpected response shape",
            FailureKind::Export => "CSV export failure",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn malformed() -> SearchError {
        SearchError::from(serde_json::from_str::<serde_json::Value>("<html>").unwrap_err())
    }

    #[test]
    fn test_all_failure_kinds_have_string_representation() {
        for kind in FailureKind::iter() {
            assert!(!kind.as_str().is_empty(), "{:?} should have a label", kind);
        }
    }

    #[test]
    fn test_authentication_is_retriable() {
        let err = SearchError::Authentication { status: 403 };
        assert!(err.is_retriable());
        assert_eq!(err.kind(), FailureKind::Authentication);
    }

    #[test]
    fn test_status_retriability() {
        assert!(SearchError::HttpStatus { status: 429 }.is_retriable());
        assert!(SearchError::HttpStatus { status: 500 }.is_retriable());
        assert!(SearchError::HttpStatus { status: 503 }.is_retriable());
        assert!(!SearchError::HttpStatus { status: 400 }.is_retriable());
        assert!(!SearchError::HttpStatus { status: 404 }.is_retriable());
    }

    #[test]
    fn test_malformed_body_is_retriable() {
        let err = malformed();
        assert!(err.is_retriable());
        assert_eq!(err.kind(), FailureKind::MalformedBody);
    }

    #[test]
    fn test_header_capture_is_final() {
        let err = SearchError::from(HeaderCaptureError::Empty);
        assert!(!err.is_retriable());
        assert_eq!(err.kind(), FailureKind::HeaderCapture);
    }

    #[test]
    fn test_exhausted_reports_last_kind() {
        let err = SearchError::RetriesExhausted {
            attempts: 3,
            last: Box::new(malformed()),
        };
        assert_eq!(err.kind(), FailureKind::MalformedBody);
        assert!(!err.is_retriable());
        assert!(err.to_string().starts_with("search failed after 3 attempts"));
    }

    #[test]
    fn test_request_not_observed_message() {
        let err = HeaderCaptureError::RequestNotObserved {
            marker: "FetchFlights".to_string(),
            waited_secs: 60,
        };
        assert_eq!(
            err.to_string(),
            "no request matching 'FetchFlights' observed within 60s"
        );
    }
}

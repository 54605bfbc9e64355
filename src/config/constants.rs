//! Configuration constants.
//!
//! This module defines the constants used throughout the application:
//! endpoints, browser form selectors, settle delays, retry parameters and
//! the defaults the CLI falls back to.

use std::time::Duration;

// Search endpoint
/// Flight search endpoint queried with one POST per date.
pub const DEFAULT_API_URL: &str = "https://www.united.com/api/flight/FetchFlights";
/// Substring identifying the search request in captured browser traffic.
pub const SEARCH_PATH_MARKER: &str = "FetchFlights";

// Defaults mirrored by the CLI
/// Origin airport code searched by default.
pub const DEFAULT_ORIGIN: &str = "ORD";
/// Destination airport code searched by default.
pub const DEFAULT_DESTINATION: &str = "ATH";
/// Number of days searched, starting the day after the start date.
pub const DEFAULT_WINDOW_DAYS: u32 = 89;
/// Directory receiving the per-date CSV files.
pub const DEFAULT_OUTPUT_DIR: &str = "data";
/// Departure date embedded in every payload unless per-date search is enabled.
///
/// Results for every loop date reflect this single date while it is in effect.
/// Use `--search-each-date` to send the loop date instead.
pub const DEFAULT_PINNED_DEPART_DATE: &str = "2024-02-15";

// Browser header capture
/// Homepage opened to mint a fresh header set.
pub const HOME_URL: &str = "https://www.united.com/";
/// Default WebDriver endpoint (a locally running chromedriver).
pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:9515";
/// Element id of the booking form's origin field.
pub const ORIGIN_INPUT_ID: &str = "bookFlightOriginInput";
/// Element id of the booking form's destination field.
pub const DESTINATION_INPUT_ID: &str = "bookFlightDestinationInput";
/// Submit button of the booking form.
pub const FIND_FLIGHTS_BUTTON_SELECTOR: &str = "#bookFlightForm button[type='submit']";
/// Origin typed into the booking form while capturing headers.
pub const DEFAULT_FORM_ORIGIN: &str = "NYC";
/// Destination typed into the booking form while capturing headers.
pub const DEFAULT_FORM_DESTINATION: &str = "DXB";
/// Wait after loading the homepage before touching the form.
pub const PAGE_SETTLE_DELAY: Duration = Duration::from_secs(5);
/// Wait after typing into each airport field so the autocomplete settles.
pub const FIELD_SETTLE_DELAY: Duration = Duration::from_secs(2);
/// Wait after submitting the form before polling for the search request.
pub const SUBMIT_SETTLE_DELAY: Duration = Duration::from_secs(10);
/// Interval between polls for the captured search request.
pub const CAPTURE_POLL_INTERVAL: Duration = Duration::from_secs(1);
/// Upper bound on the wait for the captured search request.
pub const DEFAULT_CAPTURE_TIMEOUT_SECS: u64 = 60;

// HTTP
/// Per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

// Retry strategy
/// Maximum number of search attempts (initial attempt + retries)
pub const RETRY_MAX_ATTEMPTS: usize = 5;
/// Delay in milliseconds before the first retry; doubles on each later retry
pub const RETRY_INITIAL_DELAY_MS: u64 = 500;
/// Maximum delay between retries in seconds
pub const RETRY_MAX_DELAY_SECS: u64 = 15;

// HTTP status codes (for clarity and consistency)
/// Rate limiting status, retried like a server error.
pub const HTTP_STATUS_TOO_MANY_REQUESTS: u16 = 429;

/// Request headers that the HTTP client manages itself and that must not be
/// replayed from a captured browser request.
pub const TRANSPORT_MANAGED_HEADERS: &[&str] =
    &["host", "content-length", "connection", "accept-encoding"];

//! flight_scrape library: date-window flight fare scraping
//!
//! This library searches an airline's flight-search endpoint for one route over a
//! window of departure dates. Request headers are minted by a live browser session
//! (or read from a file), every priced fare product is flattened into a
//! [`FlightRecord`], and each date's unique records are written to their own CSV.
//!
//! # Example
//!
//! ```no_run
//! use flight_scrape::initialization::init_header_source;
//! use flight_scrape::{run_scrape, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     origin: "ORD".to_string(),
//!     destination: "ATH".to_string(),
//!     days: 7,
//!     ..Default::default()
//! };
//!
//! let source = init_header_source(&config);
//! let report = run_scrape(config, source).await?;
//! println!("Searched {} dates: {} succeeded, {} failed",
//!          report.dates_total, report.dates_succeeded, report.dates_failed);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Browser header capture additionally
//! needs a WebDriver endpoint (for example `chromedriver --port=9515`).

#![warn(missing_docs)]

mod app;
pub mod config;
pub mod error_handling;
pub mod export;
pub mod extract;
pub mod headers;
pub mod initialization;
pub mod search;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use extract::{extract_records, Extraction, FlightRecord};
pub use headers::{HeaderSet, HeaderSource};
pub use run::{run_scrape, ScrapeReport};
pub use search::{PayloadDate, SearchClient, SearchRequest};

// Internal run module (contains the per-date scrape loop)
mod run {
    use anyhow::{Context, Result};
    use chrono::NaiveDate;
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::time::Instant;

    use log::{debug, error, info, warn};

    use crate::app::{date_window, log_progress, print_error_statistics, print_simple_summary};
    use crate::config::Config;
    use crate::error_handling::{FailureKind, ProcessingStats};
    use crate::export::{output_path, write_records_csv};
    use crate::extract::extract_records;
    use crate::headers::HeaderSource;
    use crate::initialization::init_client;
    use crate::search::{PayloadDate, SearchClient, SearchRequest};

    /// Results of a scrape run.
    #[derive(Debug, Clone)]
    pub struct ScrapeReport {
        /// Number of dates in the window
        pub dates_total: usize,
        /// Dates whose CSV was written
        pub dates_succeeded: usize,
        /// Dates that failed (only non-zero with `--continue-on-error`)
        pub dates_failed: usize,
        /// Records written across all files
        pub records_written: usize,
        /// Files written, in date order
        pub files: Vec<PathBuf>,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    /// Runs a scrape with the provided configuration and header source.
    ///
    /// Dates are processed one at a time, each fully (search, extract, write)
    /// before the next begins.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The HTTP client cannot be built
    /// - The initial header set cannot be obtained
    /// - Any date fails and `continue_on_error` is off
    pub async fn run_scrape<S: HeaderSource>(config: Config, source: S) -> Result<ScrapeReport> {
        let start_time = Instant::now();
        let stats = Arc::new(ProcessingStats::new());

        let http = init_client(&config).context("Failed to initialize HTTP client")?;
        let date_policy = config.payload_date();
        if let PayloadDate::Pinned(pinned) = date_policy {
            warn!(
                "Every search sends departure date {}; output files are still named per loop date. \
                 Pass --search-each-date to search each date instead.",
                pinned
            );
        }

        let mut client = SearchClient::new(
            http,
            config.api_url.clone(),
            date_policy,
            config.retry_policy(),
            source,
            Arc::clone(&stats),
        );
        client
            .prime()
            .await
            .context("Failed to obtain initial request headers")?;
        if let Some(headers) = client.headers() {
            info!("Captured {} request headers", headers.len());
        }

        let dates = date_window(config.start_date_or_today(), config.days);
        let dates_total = dates.len();
        info!(
            "Scraping {} -> {} for {} date{}",
            config.origin,
            config.destination,
            dates_total,
            if dates_total == 1 { "" } else { "s" }
        );

        let mut files = Vec::with_capacity(dates_total);
        let mut records_written = 0;
        let mut dates_failed = 0;

        for (index, date) in dates.into_iter().enumerate() {
            info!("Searching {} -> {} for {}", config.origin, config.destination, date);
            match scrape_date(&mut client, &config, &stats, date).await {
                Ok((path, written)) => {
                    info!("Saved {} records to {}", written, path.display());
                    records_written += written;
                    files.push(path);
                }
                Err(e) if config.continue_on_error => {
                    error!("Date {} failed: {:#}", date, e);
                    dates_failed += 1;
                }
                Err(e) => {
                    print_error_statistics(&stats);
                    return Err(e);
                }
            }
            log_progress(start_time, index + 1, dates_total);
        }

        let elapsed_seconds = start_time.elapsed().as_secs_f64();
        let dates_succeeded = files.len();
        print_simple_summary(
            dates_total,
            dates_succeeded,
            dates_failed,
            records_written,
            elapsed_seconds,
        );
        print_error_statistics(&stats);

        Ok(ScrapeReport {
            dates_total,
            dates_succeeded,
            dates_failed,
            records_written,
            files,
            elapsed_seconds,
        })
    }

    async fn scrape_date<S: HeaderSource>(
        client: &mut SearchClient<S>,
        config: &Config,
        stats: &ProcessingStats,
        date: NaiveDate,
    ) -> Result<(PathBuf, usize)> {
        let request = SearchRequest::new(&config.origin, &config.destination, date);
        let response = client
            .search(&request)
            .await
            .with_context(|| format!("Search for {} failed", date))?;

        let extraction = extract_records(&response)
            .inspect_err(|_| stats.increment_failure(FailureKind::Extraction))
            .with_context(|| format!("Response for {} has no flights", date))?;
        stats.add_dropped(extraction.unpriced_dropped, extraction.duplicates_dropped);
        debug!(
            "{}: {} fare products, {} unpriced, {} duplicates",
            date, extraction.raw_count, extraction.unpriced_dropped, extraction.duplicates_dropped
        );
        if extraction.records.is_empty() {
            warn!("No priced fares for {}; writing header-only file", date);
        }

        let path = output_path(&config.output_dir, &config.origin, &config.destination, date);
        let written = write_records_csv(&path, &extraction.records)
            .inspect_err(|_| stats.increment_failure(FailureKind::Export))?;
        Ok((path, written))
    }
}

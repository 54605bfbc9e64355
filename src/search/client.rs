//! Search client with header refresh and bounded retries.

use std::sync::Arc;

use log::{debug, warn};
use serde_json::Value;
use tokio::time::sleep;

use super::payload::{PayloadDate, SearchRequest};
use crate::error_handling::{
    categorize_status, update_error_stats, FailureKind, HeaderCaptureError, ProcessingStats,
    RetryPolicy, SearchError,
};
use crate::headers::{HeaderSet, HeaderSource};

/// Sends flight searches with the current header set.
///
/// The client owns the header set. It is fetched lazily before the first
/// search and replaced wholesale before every retry.
pub struct SearchClient<S> {
    http: reqwest::Client,
    api_url: String,
    date_policy: PayloadDate,
    retry: RetryPolicy,
    source: S,
    headers: Option<HeaderSet>,
    stats: Arc<ProcessingStats>,
}

impl<S: HeaderSource> SearchClient<S> {
    /// Creates a client; no headers are fetched until the first search.
    pub fn new(
        http: reqwest::Client,
        api_url: impl Into<String>,
        date_policy: PayloadDate,
        retry: RetryPolicy,
        source: S,
        stats: Arc<ProcessingStats>,
    ) -> Self {
        Self {
            http,
            api_url: api_url.into(),
            date_policy,
            retry,
            source,
            headers: None,
            stats,
        }
    }

    /// Current header set, if one has been fetched.
    pub fn headers(&self) -> Option<&HeaderSet> {
        self.headers.as_ref()
    }

    /// Fetches the initial header set.
    pub async fn prime(&mut self) -> Result<(), HeaderCaptureError> {
        self.headers = Some(self.fetch_headers().await?);
        Ok(())
    }

    /// Runs one search and returns the parsed response body.
    ///
    /// Retriable failures sleep for the next backoff delay, refresh the
    /// headers, and try again until the policy's attempts are used up.
    ///
    /// # Errors
    ///
    /// - The first non-retriable failure, as is
    /// - `SearchError::HeaderCapture` if a refresh fails
    /// - `SearchError::RetriesExhausted` wrapping the last failure otherwise
    pub async fn search(&mut self, request: &SearchRequest) -> Result<Value, SearchError> {
        if self.headers.is_none() {
            self.prime().await?;
        }

        let mut delays = self.retry.delays();
        let mut attempts = 0;
        loop {
            attempts += 1;
            let err = match self.send_once(request).await {
                Ok(body) => return Ok(body),
                Err(err) => err,
            };
            update_error_stats(&self.stats, &err);

            if !err.is_retriable() {
                return Err(err);
            }
            let Some(delay) = delays.next() else {
                return Err(SearchError::RetriesExhausted {
                    attempts,
                    last: Box::new(err),
                });
            };

            warn!(
                "Search {} -> {} for {} failed on attempt {} ({}), refreshing headers",
                request.origin, request.destination, request.depart_date, attempts, err
            );
            sleep(delay).await;
            self.headers = Some(self.fetch_headers().await?);
            self.stats.increment_header_refreshes();
        }
    }

    async fn send_once(&self, request: &SearchRequest) -> Result<Value, SearchError> {
        let payload = request.payload(self.date_policy);
        let mut builder = self.http.post(&self.api_url).json(&payload);
        if let Some(headers) = &self.headers {
            builder = builder.headers(headers.header_map().clone());
        }

        let response = builder.send().await?;
        let status = response.status();
        debug!("Search endpoint answered {}", status);
        if let Some(err) = categorize_status(status) {
            return Err(err);
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn fetch_headers(&mut self) -> Result<HeaderSet, HeaderCaptureError> {
        self.source.fetch_headers().await.inspect_err(|_| {
            self.stats.increment_failure(FailureKind::HeaderCapture);
        })
    }
}

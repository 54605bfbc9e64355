//! Error categorization and retry strategy.
//!
//! This module provides functions to categorize search failures and configure
//! the retry strategy.

use std::time::Duration;

use reqwest::StatusCode;
use tokio_retry::strategy::ExponentialBackoff;

use super::stats::ProcessingStats;
use super::types::SearchError;

/// Bounded retry policy for a single search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one
    pub max_attempts: usize,
    /// Delay before the first retry; each later retry doubles it
    pub initial_delay_ms: u64,
    /// Cap on any single delay
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: crate::config::RETRY_MAX_ATTEMPTS,
            initial_delay_ms: crate::config::RETRY_INITIAL_DELAY_MS,
            max_delay: Duration::from_secs(crate::config::RETRY_MAX_DELAY_SECS),
        }
    }
}

impl RetryPolicy {
    /// Delays slept between attempts, one fewer than `max_attempts`.
    pub fn delays(&self) -> impl Iterator<Item = Duration> {
        get_retry_strategy(self.initial_delay_ms, self.max_delay)
            .take(self.max_attempts.saturating_sub(1))
    }
}

/// Creates an exponential backoff retry strategy.
///
/// `ExponentialBackoff` yields `factor * base^n` for `n >= 1`, so a base of 2
/// with the initial delay as factor gives `2 * initial, 4 * initial, ...`.
/// Halving each step yields `initial, 2 * initial, 4 * initial, ...` without
/// truncating odd delays. Each delay is capped at `max_delay`. The iterator
/// is unbounded; callers limit it.
pub fn get_retry_strategy(
    initial_delay_ms: u64,
    max_delay: Duration,
) -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(2)
        .factor(initial_delay_ms)
        .max_delay(max_delay.saturating_mul(2))
        .map(move |delay| (delay / 2).min(max_delay))
}

/// Categorizes a non-success response status into a `SearchError`.
///
/// Returns `None` for success statuses.
pub fn categorize_status(status: StatusCode) -> Option<SearchError> {
    if status.is_success() {
        return None;
    }
    let status = status.as_u16();
    match status {
        401 | 403 => Some(SearchError::Authentication { status }),
        _ => Some(SearchError::HttpStatus { status }),
    }
}

/// Updates processing statistics for a failed search.
pub fn update_error_stats(stats: &ProcessingStats, error: &SearchError) {
    stats.increment_failure(error.kind());
}

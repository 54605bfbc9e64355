//! Error handling and processing statistics.
//!
//! This module provides:
//! - Error type definitions and failure kinds
//! - Processing statistics tracking (failures per kind, header refreshes, drops)
//! - Retry strategy configuration
//! - Status code categorization

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{categorize_status, get_retry_strategy, update_error_stats, RetryPolicy};
pub use stats::ProcessingStats;
pub use types::{
    ExtractError, FailureKind, HeaderCaptureError, InitializationError, SearchError,
};

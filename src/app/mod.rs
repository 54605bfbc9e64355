//! Main application modules.
//!
//! This module provides the date window, progress logging, and statistics
//! printing used by the run loop.

pub mod dates;
pub mod logging;
pub mod statistics;

// Re-export public API
pub use dates::date_window;
pub use logging::log_progress;
pub use statistics::{print_error_statistics, print_simple_summary};

//! Statistics printing.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{FailureKind, ProcessingStats};

/// Prints a simple one-line summary of the run.
pub fn print_simple_summary(
    dates_total: usize,
    dates_succeeded: usize,
    dates_failed: usize,
    records_written: usize,
    elapsed_seconds: f64,
) {
    info!(
        "✅ Searched {} date{} ({} succeeded, {} failed), wrote {} record{} in {:.1}s",
        dates_total,
        if dates_total == 1 { "" } else { "s" },
        dates_succeeded,
        dates_failed,
        records_written,
        if records_written == 1 { "" } else { "s" },
        elapsed_seconds
    );
}

/// Prints failure counts and extraction drops to the log.
pub fn print_error_statistics(stats: &ProcessingStats) {
    let total_failures = stats.total_failures();
    if total_failures > 0 {
        info!("Failure Counts ({} total):", total_failures);
        for kind in FailureKind::iter() {
            let count = stats.get_failure_count(kind);
            if count > 0 {
                info!("   {}: {}", kind.as_str(), count);
            }
        }
    }

    if stats.header_refreshes() > 0 {
        info!("Header refreshes: {}", stats.header_refreshes());
    }

    let unpriced = stats.unpriced_dropped();
    let duplicates = stats.duplicates_dropped();
    if unpriced > 0 || duplicates > 0 {
        info!(
            "Dropped {} unpriced fare product{} and {} duplicate record{}",
            unpriced,
            if unpriced == 1 { "" } else { "s" },
            duplicates,
            if duplicates == 1 { "" } else { "s" }
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_error_statistics_no_failures() {
        let stats = ProcessingStats::new();
        print_error_statistics(&stats);
    }

    #[test]
    fn test_print_error_statistics_all_counters() {
        let stats = ProcessingStats::new();
        stats.increment_failure(FailureKind::Authentication);
        stats.increment_failure(FailureKind::Network);
        stats.increment_header_refreshes();
        stats.add_dropped(3, 1);
        print_error_statistics(&stats);
    }

    #[test]
    fn test_print_simple_summary() {
        print_simple_summary(1, 1, 0, 1, 0.5);
        print_simple_summary(89, 88, 1, 1200, 612.0);
    }
}

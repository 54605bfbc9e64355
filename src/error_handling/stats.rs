//! Processing statistics tracking.
//!
//! This module provides statistics tracking for failures and notable events
//! during a scrape run.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::FailureKind;

/// Processing statistics tracker.
///
/// Tracks failures per kind, header refreshes, and extraction drops using
/// atomic counters. All failure kinds are initialized to zero on creation.
pub struct ProcessingStats {
    failures: HashMap<FailureKind, AtomicUsize>,
    header_refreshes: AtomicUsize,
    unpriced_dropped: AtomicUsize,
    duplicates_dropped: AtomicUsize,
}

impl ProcessingStats {
    /// Creates a tracker with every counter at zero.
    pub fn new() -> Self {
        let mut failures = HashMap::new();
        for kind in FailureKind::iter() {
            failures.insert(kind, AtomicUsize::new(0));
        }

        ProcessingStats {
            failures,
            header_refreshes: AtomicUsize::new(0),
            unpriced_dropped: AtomicUsize::new(0),
            duplicates_dropped: AtomicUsize::new(0),
        }
    }

    /// Increment a failure counter.
    pub fn increment_failure(&self, kind: FailureKind) {
        if let Some(counter) = self.failures.get(&kind) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment failure counter for {:?} which is not in the map. \
                 This indicates a bug in ProcessingStats initialization.",
                kind
            );
        }
    }

    /// Counts one header refresh before a retry.
    pub fn increment_header_refreshes(&self) {
        self.header_refreshes.fetch_add(1, Ordering::Relaxed);
    }

    /// Adds the drops reported by one extraction.
    pub fn add_dropped(&self, unpriced: usize, duplicates: usize) {
        self.unpriced_dropped.fetch_add(unpriced, Ordering::Relaxed);
        self.duplicates_dropped
            .fetch_add(duplicates, Ordering::Relaxed);
    }

    /// Get the count for a failure kind.
    ///
    /// Returns 0 if the kind is not in the map (should never happen if properly initialized).
    pub fn get_failure_count(&self, kind: FailureKind) -> usize {
        self.failures
            .get(&kind)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Header refreshes so far.
    pub fn header_refreshes(&self) -> usize {
        self.header_refreshes.load(Ordering::SeqCst)
    }

    /// Unpriced fare products dropped so far.
    pub fn unpriced_dropped(&self) -> usize {
        self.unpriced_dropped.load(Ordering::SeqCst)
    }

    /// Duplicate records dropped so far.
    pub fn duplicates_dropped(&self) -> usize {
        self.duplicates_dropped.load(Ordering::SeqCst)
    }

    /// Sum of all failure counters.
    pub fn total_failures(&self) -> usize {
        self.failures
            .values()
            .map(|c| c.load(Ordering::SeqCst))
            .sum()
    }
}

impl Default for ProcessingStats {
    fn default() -> Self {
        Self::new()
    }
}

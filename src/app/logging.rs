//! Progress logging utilities.

use log::info;

/// Logs progress after each date.
///
/// # Arguments
///
/// * `start_time` - The start time of the run
/// * `completed` - Dates finished so far (succeeded or failed)
/// * `total` - Dates in the window
pub fn log_progress(start_time: std::time::Instant, completed: usize, total: usize) {
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let rate = if elapsed_secs > 0.0 {
        completed as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Processed {}/{} dates in {:.2} seconds (~{:.2} dates/sec)",
        completed, total, elapsed_secs, rate
    );
}

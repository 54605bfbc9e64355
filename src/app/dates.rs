//! Departure date window.

use chrono::{Days, NaiveDate};

/// Dates searched by a run: the `days` days following `start`.
///
/// `start` itself is not included, so a run started today begins with tomorrow.
pub fn date_window(start: NaiveDate, days: u32) -> Vec<NaiveDate> {
    (1..=u64::from(days))
        .map_while(|offset| start.checked_add_days(Days::new(offset)))
        .collect()
}

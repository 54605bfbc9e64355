//! Fields computed from a flight leg rather than copied from it.

use serde_json::Value;

use super::path::{is_truthy, lookup};

/// Sums the seat digit at the end of each `|`-delimited booking class token.
///
/// `"F9|J9|Y9"` gives 27. A token whose last character is not a digit,
/// including an empty token, counts as zero.
pub fn total_available_seats(availability: &str) -> u32 {
    availability
        .split('|')
        .map(|token| {
            token
                .chars()
                .last()
                .and_then(|c| c.to_digit(10))
                .unwrap_or(0)
        })
        .sum()
}

/// `"Yes"` when the first warning whose title mentions "Night" is not hidden.
pub fn overnight_flag(flight: &Value) -> &'static str {
    let night_warning = lookup(flight, "/Warnings")
        .and_then(Value::as_array)
        .and_then(|warnings| {
            warnings.iter().find(|w| {
                w.get("Title")
                    .and_then(Value::as_str)
                    .is_some_and(|title| title.contains("Night"))
            })
        });

    match night_warning {
        Some(w) if !w.get("Hidden").and_then(Value::as_bool).unwrap_or(false) => "Yes",
        _ => "No",
    }
}

/// Whether the leg lists any intermediate stops.
pub fn has_stops(flight: &Value) -> bool {
    is_truthy(lookup(flight, "/StopInfos"))
}

/// Splits `"2024-06-10 17:35"` into its date and time tokens.
///
/// Missing tokens come back empty.
pub fn split_date_time(value: &str) -> (String, String) {
    let mut tokens = value.split_whitespace();
    let date = tokens.next().unwrap_or_default().to_string();
    let time = tokens.next().unwrap_or_default().to_string();
    (date, time)
}

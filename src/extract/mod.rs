//! Record extraction from search responses.
//!
//! Flattens every (leg, fare product) pair under `data.Trips[0].Flights` into a
//! [`FlightRecord`], drops unpriced products, and removes exact duplicates
//! while keeping the order of first occurrence.

mod derive;
mod path;
mod record;

use std::collections::HashSet;

use serde_json::Value;

pub use derive::{has_stops, overnight_flag, split_date_time, total_available_seats};
pub use path::{lookup, render, text_at};
pub use record::FlightRecord;

use crate::error_handling::ExtractError;

/// Records kept from one response, with what was dropped along the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Unique priced records, in order of first occurrence
    pub records: Vec<FlightRecord>,
    /// Leg/product pairs seen before any filtering
    pub raw_count: usize,
    /// Pairs dropped for lacking a price
    pub unpriced_dropped: usize,
    /// Priced records dropped as exact duplicates
    pub duplicates_dropped: usize,
}

/// Extracts unique priced records from a search response.
///
/// # Errors
///
/// Returns `ExtractError::MissingFlights` when the response has no flight list.
/// A leg without `Products` simply contributes nothing.
pub fn extract_records(response: &Value) -> Result<Extraction, ExtractError> {
    let flights = lookup(response, "/data/Trips/0/Flights")
        .and_then(Value::as_array)
        .ok_or(ExtractError::MissingFlights)?;

    let mut raw_count = 0;
    let mut priced = Vec::new();
    for flight in flights {
        let Some(products) = flight.get("Products").and_then(Value::as_array) else {
            continue;
        };
        for product in products {
            raw_count += 1;
            if FlightRecord::is_priced(product) {
                priced.push(FlightRecord::from_leg(flight, product));
            }
        }
    }

    let unpriced_dropped = raw_count - priced.len();
    let priced_count = priced.len();
    let records = dedup_records(priced);

    Ok(Extraction {
        duplicates_dropped: priced_count - records.len(),
        records,
        raw_count,
        unpriced_dropped,
    })
}

/// Drops records identical to an earlier one, preserving first-occurrence order.
pub fn dedup_records(records: Vec<FlightRecord>) -> Vec<FlightRecord> {
    let mut seen = HashSet::with_capacity(records.len());
    records
        .into_iter()
        .filter(|record| seen.insert(record.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn leg(number: &str, products: Value) -> Value {
        json!({
            "DepartDateTime": "2024-06-10 17:35",
            "DestinationDateTime": "2024-06-11 11:05",
            "OperatingCarrier": "UA",
            "OriginalFlightNumber": number,
            "BookingClassAvailability": "J9|Y9",
            "Products": products
        })
    }

    fn priced(cabin: &str, points: f64) -> Value {
        json!({
            "CabinType": cabin,
            "Prices": [
                {"Amount": points, "Currency": "MILES"},
                {"Amount": 5.6, "Currency": "USD"}
            ]
        })
    }

    fn response(flights: Vec<Value>) -> Value {
        json!({"data": {"Trips": [{"Flights": flights}]}})
    }

    #[test]
    fn test_identical_products_collapse_to_one() {
        let body = response(vec![leg(
            "178",
            json!([priced("Business", 80000.0), priced("Business", 80000.0)]),
        )]);
        let extraction = extract_records(&body).unwrap();
        assert_eq!(extraction.raw_count, 2);
        assert_eq!(extraction.records.len(), 1);
        assert_eq!(extraction.duplicates_dropped, 1);
        assert_eq!(extraction.unpriced_dropped, 0);
    }

    #[test]
    fn test_unpriced_products_dropped() {
        let body = response(vec![leg(
            "178",
            json!([
                priced("Business", 80000.0),
                {"CabinType": "First", "Prices": []},
                {"CabinType": "Economy"}
            ]),
        )]);
        let extraction = extract_records(&body).unwrap();
        assert_eq!(extraction.raw_count, 3);
        assert_eq!(extraction.unpriced_dropped, 2);
        assert!(extraction.records.iter().all(|r| !r.airline_points.is_empty()));
    }

    #[test]
    fn test_zero_amount_product_dropped() {
        let body = response(vec![leg(
            "178",
            json!([
                {"CabinType": "Business", "Prices": [
                    {"Amount": 0, "Currency": "MILES"},
                    {"Amount": 5.6, "Currency": "USD"}
                ]},
                {"CabinType": "First", "Prices": [{"Amount": 0.0}]}
            ]),
        )]);
        let extraction = extract_records(&body).unwrap();
        assert_eq!(extraction.raw_count, 2);
        assert_eq!(extraction.unpriced_dropped, 2);
        assert!(extraction.records.is_empty());
    }

    #[test]
    fn test_order_of_first_occurrence_kept() {
        let body = response(vec![
            leg("178", json!([priced("Business", 80000.0)])),
            leg("124", json!([priced("Business", 70000.0)])),
            leg("178", json!([priced("Business", 80000.0)])),
        ]);
        let numbers: Vec<String> = extract_records(&body)
            .unwrap()
            .records
            .into_iter()
            .map(|r| r.operating_flight_number)
            .collect();
        assert_eq!(numbers, vec!["178", "124"]);
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let body = response(vec![
            leg("178", json!([priced("Business", 80000.0), priced("First", 120000.0)])),
            leg("178", json!([priced("Business", 80000.0)])),
        ]);
        let first = extract_records(&body).unwrap();
        let second = extract_records(&body).unwrap();
        assert_eq!(first, second);
        assert!(first.records.len() <= first.raw_count);
        assert_eq!(dedup_records(first.records.clone()), first.records);
    }

    #[test]
    fn test_leg_without_products_contributes_nothing() {
        let body = response(vec![json!({"OriginalFlightNumber": "9"})]);
        let extraction = extract_records(&body).unwrap();
        assert_eq!(extraction.raw_count, 0);
        assert!(extraction.records.is_empty());
    }

    #[test]
    fn test_missing_flight_list() {
        assert_eq!(
            extract_records(&json!({"data": {"Trips": []}})),
            Err(ExtractError::MissingFlights)
        );
        assert_eq!(
            extract_records(&json!({"errors": ["blocked"]})),
            Err(ExtractError::MissingFlights)
        );
    }
}

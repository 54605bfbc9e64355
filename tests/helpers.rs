// Shared test helpers for search responses and scripted header sources.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};

use flight_scrape::error_handling::{HeaderCaptureError, RetryPolicy};
use flight_scrape::{HeaderSet, HeaderSource};

#[allow(dead_code)] // Used by other test files
/// Header source that hands out a fixed sequence of `x-token` values.
///
/// `None` entries fail the fetch. Once the sequence is used up the last entry
/// repeats.
pub struct ScriptedHeaders {
    tokens: Vec<Option<&'static str>>,
    fetches: Arc<AtomicUsize>,
}

impl ScriptedHeaders {
    #[allow(dead_code)]
    pub fn new(tokens: Vec<Option<&'static str>>) -> (Self, Arc<AtomicUsize>) {
        let fetches = Arc::new(AtomicUsize::new(0));
        (
            Self {
                tokens,
                fetches: Arc::clone(&fetches),
            },
            fetches,
        )
    }
}

impl HeaderSource for ScriptedHeaders {
    async fn fetch_headers(&mut self) -> Result<HeaderSet, HeaderCaptureError> {
        let n = self.fetches.fetch_add(1, Ordering::SeqCst);
        let index = n.min(self.tokens.len().saturating_sub(1));
        match self.tokens.get(index).copied().flatten() {
            Some(token) => Ok(HeaderSet::from_pairs([
                ("x-token", token),
                ("user-agent", "Mozilla/5.0 (test)"),
            ])),
            None => Err(HeaderCaptureError::Empty),
        }
    }
}

/// Retry policy with millisecond delays so tests stay fast.
#[allow(dead_code)] // Used by other test files
pub fn fast_retry(max_attempts: usize) -> RetryPolicy {
    RetryPolicy {
        max_attempts,
        initial_delay_ms: 2,
        max_delay: Duration::from_millis(10),
    }
}

#[allow(dead_code)]
/// One fare product priced in points plus taxes.
pub fn priced_product(cabin: &str, points: u64) -> Value {
    json!({
        "CabinType": cabin,
        "Prices": [
            {"Amount": points, "Currency": "MILES"},
            {"Amount": 5.6, "Currency": "USD"}
        ]
    })
}

#[allow(dead_code)]
/// A search response with a single ORD -> ATH leg carrying `products`.
pub fn search_response(products: Vec<Value>) -> Value {
    json!({
        "data": {
            "Trips": [{
                "Flights": [{
                    "DepartDateTime": "2024-06-10 17:35",
                    "DestinationDateTime": "2024-06-11 11:05",
                    "Origin": "Chicago",
                    "OriginStateCode": "IL",
                    "OriginCountryCode": "US",
                    "Destination": "Athens",
                    "DestinationCountryCode": "GR",
                    "TravelMinutesTotal": 630,
                    "BookingClassAvailability": "J4|O4|I0",
                    "MarketingCarrier": "UA",
                    "OperatingCarrier": "UA",
                    "OriginalFlightNumber": "178",
                    "StopInfos": [],
                    "Warnings": [{
                        "Title": "Overnight Flight",
                        "Hidden": false,
                        "SDLMessages": [
                            {"Params": {"DepartAirportCode": "ORD"}},
                            {"Params": {"ArriveAirportCode": "ATH"}}
                        ]
                    }],
                    "Products": products
                }]
            }]
        }
    })
}

//! Search request payload.
//!
//! Everything except the route (and, optionally, the departure date) is fixed:
//! premium cabin, first-class fare family, award travel, one adult.

use chrono::NaiveDate;
use serde_json::{json, Value};

const CART_ID: &str = "8014E5CF-5E05-4F18-84A1-14A4F0459DE3";
const RECENT_SEARCH_KEY: &str = "ORDATH6/9/2024";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Which departure date goes into the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadDate {
    /// Every request searches this date, whatever date it was issued for
    Pinned(NaiveDate),
    /// Each request searches its own departure date
    PerRequest,
}

impl PayloadDate {
    /// Date sent for a request issued for `requested`.
    pub fn resolve(&self, requested: NaiveDate) -> NaiveDate {
        match self {
            PayloadDate::Pinned(date) => *date,
            PayloadDate::PerRequest => requested,
        }
    }
}

/// One search: a route and the departure date it is issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Origin airport code
    pub origin: String,
    /// Destination airport code
    pub destination: String,
    /// Date this search is issued for
    pub depart_date: NaiveDate,
}

impl SearchRequest {
    /// Creates a request for one route and date.
    pub fn new(origin: impl Into<String>, destination: impl Into<String>, depart_date: NaiveDate) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            depart_date,
        }
    }

    /// Builds the JSON body sent to the search endpoint.
    pub fn payload(&self, date_policy: PayloadDate) -> Value {
        let depart_date = date_policy
            .resolve(self.depart_date)
            .format(DATE_FORMAT)
            .to_string();

        json!({
            "SearchTypeSelection": 1,
            "SortType": "bestmatches",
            "SortTypeDescending": false,
            "Trips": [{
                "Origin": self.origin,
                "Destination": self.destination,
                "DepartDate": depart_date,
                "Index": 1,
                "TripIndex": 1,
                "SearchRadiusMilesOrigin": 0,
                "SearchRadiusMilesDestination": 0,
                "DepartTimeApprox": 0,
                "SearchFiltersIn": {
                    "FareFamily": "FIRST",
                    "AirportsStop": null,
                    "AirportsStopToAvoid": null
                }
            }],
            "CabinPreferenceMain": "premium",
            "PaxInfoList": [{"PaxType": 1}],
            "AwardTravel": true,
            "NGRP": true,
            "CalendarLengthOfStay": 0,
            "PetCount": 0,
            "RecentSearchKey": RECENT_SEARCH_KEY,
            "CalendarFilters": {"Filters": {"PriceScheduleOptions": {"Stops": 1}}},
            "Characteristics": [
                {"Code": "SOFT_LOGGED_IN", "Value": false},
                {"Code": "UsePassedCartId", "Value": false}
            ],
            "FareType": "mixedtoggle",
            "CartId": CART_ID
        })
    }
}

//! Flat flight record written to CSV.

use serde::Serialize;
use serde_json::Value;

use super::derive::{has_stops, overnight_flag, split_date_time, total_available_seats};
use super::path::{is_truthy, lookup, text_at};

/// One leg and fare product, flattened.
///
/// Two records are the same record when every field matches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FlightRecord {
    /// Local departure date (`YYYY-MM-DD`)
    #[serde(rename = "Departure Date")]
    pub departure_date: String,
    /// Local departure time (`HH:MM`)
    #[serde(rename = "Departure Time")]
    pub departure_time: String,
    /// IATA code of the departure airport
    #[serde(rename = "Departure Airport Code")]
    pub departure_airport_code: String,
    /// IATA code of the arrival airport
    #[serde(rename = "Arrival Airport Code")]
    pub arrival_airport_code: String,
    /// Departure city name
    #[serde(rename = "Departure City")]
    pub departure_city: String,
    /// Departure state or province code
    #[serde(rename = "Departure State")]
    pub departure_state: String,
    /// Departure country code
    #[serde(rename = "Departure Country")]
    pub departure_country: String,
    /// Local arrival date (`YYYY-MM-DD`)
    #[serde(rename = "Arrival Date")]
    pub arrival_date: String,
    /// Local arrival time (`HH:MM`)
    #[serde(rename = "Arrival Time")]
    pub arrival_time: String,
    /// Arrival city name
    #[serde(rename = "Arrival City")]
    pub arrival_city: String,
    /// Arrival state or province code
    #[serde(rename = "Arrival State")]
    pub arrival_state: String,
    /// Arrival country code
    #[serde(rename = "Arrival Country")]
    pub arrival_country: String,
    /// Total travel time in minutes
    #[serde(rename = "Flight Duration")]
    pub flight_duration: String,
    /// `Yes` when a visible overnight warning is attached
    #[serde(rename = "Overnight Flight")]
    pub overnight_flight: String,
    /// `Yes` when the leg has stop information
    #[serde(rename = "# Stops")]
    pub stops: String,
    /// Inverse of `stops`
    #[serde(rename = "Nonstop Flight")]
    pub nonstop_flight: String,
    /// Seats summed across booking classes
    #[serde(rename = "# Available Tickets")]
    pub available_tickets: u32,
    /// Marketing carrier code
    #[serde(rename = "Booking Airline Code")]
    pub booking_airline_code: String,
    /// Marketing carrier name
    #[serde(rename = "Booking Airline Description")]
    pub booking_airline_description: String,
    /// Operating carrier code
    #[serde(rename = "Operating Airline Code")]
    pub operating_airline_code: String,
    /// Operating carrier name
    #[serde(rename = "Operating Airline Description")]
    pub operating_airline_description: String,
    /// Flight number without carrier
    #[serde(rename = "Operating Airline Flight #")]
    pub operating_flight_number: String,
    /// Carrier code followed by flight number, e.g. `UA178`
    #[serde(rename = "Operating Airline Flight # Description")]
    pub operating_flight_description: String,
    /// Equipment type code
    #[serde(rename = "Aircraft Code")]
    pub aircraft_code: String,
    /// Equipment description
    #[serde(rename = "Aircraft Description")]
    pub aircraft_description: String,
    /// Cabin of the fare product
    #[serde(rename = "Cabin Class")]
    pub cabin_class: String,
    /// Award price in points
    #[serde(rename = "Airline Points")]
    pub airline_points: String,
    /// Taxes and fees amount
    #[serde(rename = "Airline Taxes")]
    pub airline_taxes: String,
    /// Currency of the taxes and fees
    #[serde(rename = "Currency")]
    pub currency: String,
}

impl FlightRecord {
    /// CSV header, in column order. Must match the serde renames above.
    pub const FIELD_NAMES: [&'static str; 29] = [
        "Departure Date",
        "Departure Time",
        "Departure Airport Code",
        "Arrival Airport Code",
        "Departure City",
        "Departure State",
        "Departure Country",
        "Arrival Date",
        "Arrival Time",
        "Arrival City",
        "Arrival State",
        "Arrival Country",
        "Flight Duration",
        "Overnight Flight",
        "# Stops",
        "Nonstop Flight",
        "# Available Tickets",
        "Booking Airline Code",
        "Booking Airline Description",
        "Operating Airline Code",
        "Operating Airline Description",
        "Operating Airline Flight #",
        "Operating Airline Flight # Description",
        "Aircraft Code",
        "Aircraft Description",
        "Cabin Class",
        "Airline Points",
        "Airline Taxes",
        "Currency",
    ];

    /// Flattens one fare product of one leg.
    ///
    /// Never fails: anything missing renders as an empty string.
    pub fn from_leg(flight: &Value, product: &Value) -> Self {
        let (departure_date, departure_time) = split_date_time(&text_at(flight, "/DepartDateTime"));
        let (arrival_date, arrival_time) = split_date_time(&text_at(flight, "/DestinationDateTime"));
        let stops = has_stops(flight);
        let availability = lookup(flight, "/BookingClassAvailability")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let operating_carrier = text_at(flight, "/OperatingCarrier");
        let flight_number = text_at(flight, "/OriginalFlightNumber");

        Self {
            departure_date,
            departure_time,
            departure_airport_code: text_at(
                flight,
                "/Warnings/0/SDLMessages/0/Params/DepartAirportCode",
            ),
            arrival_airport_code: text_at(
                flight,
                "/Warnings/0/SDLMessages/1/Params/ArriveAirportCode",
            ),
            departure_city: text_at(flight, "/Origin"),
            departure_state: text_at(flight, "/OriginStateCode"),
            departure_country: text_at(flight, "/OriginCountryCode"),
            arrival_date,
            arrival_time,
            arrival_city: text_at(flight, "/Destination"),
            arrival_state: text_at(flight, "/DestinationStateCode"),
            arrival_country: text_at(flight, "/DestinationCountryCode"),
            flight_duration: text_at(flight, "/TravelMinutesTotal"),
            overnight_flight: overnight_flag(flight).to_string(),
            stops: if stops { "Yes" } else { "No" }.to_string(),
            nonstop_flight: if stops { "No" } else { "Yes" }.to_string(),
            available_tickets: total_available_seats(availability),
            booking_airline_code: text_at(flight, "/MarketingCarrier"),
            booking_airline_description: text_at(flight, "/MarketingCarrierDescription"),
            operating_airline_description: text_at(flight, "/OperatingCarrierDescription"),
            operating_flight_description: format!("{}{}", operating_carrier, flight_number),
            operating_airline_code: operating_carrier,
            operating_flight_number: flight_number,
            aircraft_code: text_at(flight, "/EquipmentDisclosures/EquipmentType"),
            aircraft_description: text_at(flight, "/EquipmentDisclosures/EquipmentDescription"),
            cabin_class: text_at(product, "/CabinType"),
            airline_points: text_at(product, "/Prices/0/Amount"),
            airline_taxes: text_at(product, "/Prices/1/Amount"),
            currency: text_at(product, "/Prices/1/Currency"),
        }
    }

    /// Whether a fare product carries a price.
    ///
    /// A missing, null, zero, `false` or empty amount counts as unpriced.
    pub fn is_priced(product: &Value) -> bool {
        is_truthy(lookup(product, "/Prices/0/Amount"))
    }
}

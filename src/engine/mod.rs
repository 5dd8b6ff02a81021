//! Filtering and ordering of a user's flight list.
//!
//! Everything here is pure: the base list is borrowed, never modified, and
//! each call derives a fresh result from the base list and a complete
//! [`FlightFilters`] selection.

mod filter;
mod sort;

pub use filter::FlightFilters;
pub use sort::{sort_flights, SortKey};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::models::flight::FlightRecord;

/// Records satisfying every active filter, ordered by `filters.sort`.
/// Records that compare equal keep their input order.
pub fn apply(flights: &[FlightRecord], filters: &FlightFilters) -> Vec<FlightRecord> {
    let mut result: Vec<FlightRecord> = flights
        .iter()
        .filter(|f| filters.matches(f))
        .cloned()
        .collect();
    sort_flights(&mut result, filters.sort);
    result
}

/// Why a listing is empty, if it is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    /// The user has no flights at all.
    #[default]
    NoRecords,
    /// Flights exist but none pass the active filters.
    NoMatches,
    Matches,
}

impl ListingStatus {
    pub fn message(&self) -> Option<&'static str> {
        match self {
            ListingStatus::NoRecords => {
                Some("You have no flights scheduled. Start by adding a new flight!")
            }
            ListingStatus::NoMatches => Some("No matching flights found."),
            ListingStatus::Matches => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub flights: Vec<FlightRecord>,
    pub status: ListingStatus,
    pub total_records: usize,
}

/// [`apply`], plus the status a caller needs to pick its empty-state message.
pub fn list(flights: &[FlightRecord], filters: &FlightFilters) -> Listing {
    let visible = apply(flights, filters);
    let status = if flights.is_empty() {
        ListingStatus::NoRecords
    } else if visible.is_empty() {
        ListingStatus::NoMatches
    } else {
        ListingStatus::Matches
    };
    Listing {
        flights: visible,
        status,
        total_records: flights.len(),
    }
}

/// Distinct values present in a flight list, in first-seen order, for
/// populating the filter selectors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FilterOptions {
    pub passengers: Vec<String>,
    pub airlines: Vec<String>,
    pub departure_airports: Vec<String>,
    pub arrival_airports: Vec<String>,
}

impl FilterOptions {
    pub fn from_flights(flights: &[FlightRecord]) -> Self {
        let mut options = FilterOptions::default();
        for flight in flights {
            push_unique(&mut options.passengers, &flight.passenger_name);
            push_unique(&mut options.airlines, &flight.airline_name);
            push_unique(&mut options.departure_airports, &flight.departure_airport_code);
            push_unique(&mut options.arrival_airports, &flight.arrival_airport_code);
        }
        options
    }
}

fn push_unique(values: &mut Vec<String>, value: &str) {
    if !values.iter().any(|v| v == value) {
        values.push(value.to_string());
    }
}

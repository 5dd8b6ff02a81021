use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::engine::SortKey;
use crate::models::flight::FlightRecord;

/// The complete filter/sort selection. `None` means the filter is inactive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FlightFilters {
    #[serde(default)]
    pub sort: SortKey,
    pub passenger: Option<String>,
    pub airline: Option<String>,
    pub departure_airport: Option<String>,
    pub arrival_airport: Option<String>,
    pub departure_date: Option<NaiveDate>,
    pub arrival_date: Option<NaiveDate>,
}

impl FlightFilters {
    pub fn is_empty(&self) -> bool {
        self.passenger.is_none()
            && self.airline.is_none()
            && self.departure_airport.is_none()
            && self.arrival_airport.is_none()
            && self.departure_date.is_none()
            && self.arrival_date.is_none()
    }

    /// True when the record satisfies every active predicate.
    pub fn matches(&self, flight: &FlightRecord) -> bool {
        eq_text(&self.passenger, &flight.passenger_name)
            && eq_text(&self.airline, &flight.airline_name)
            && eq_text(&self.departure_airport, &flight.departure_airport_code)
            && eq_text(&self.arrival_airport, &flight.arrival_airport_code)
            // local calendar day of the stored offset, not the UTC day
            && eq_day(self.departure_date, flight.departure_time.date_naive())
            && eq_day(self.arrival_date, flight.arrival_time.date_naive())
    }
}

fn eq_text(wanted: &Option<String>, actual: &str) -> bool {
    wanted.as_deref().map_or(true, |w| w == actual)
}

fn eq_day(wanted: Option<NaiveDate>, actual: NaiveDate) -> bool {
    wanted.map_or(true, |w| w == actual)
}

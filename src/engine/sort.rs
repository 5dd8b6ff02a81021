use std::cmp::Ordering;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::models::flight::FlightRecord;

/// Ordering applied to a flight list. Wire names are camelCase,
/// e.g. `earliestDeparture`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash,
    Serialize, Deserialize, JsonSchema, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum SortKey {
    #[default]
    EarliestDeparture,
    LatestDeparture,
    EarliestArrival,
    LatestArrival,
    ShortestFlight,
    LongestFlight,
}

impl SortKey {
    /// Total order over two records for this key. Descending keys flip the
    /// operands so that a stable sort still keeps equal records in input order.
    pub fn compare(&self, a: &FlightRecord, b: &FlightRecord) -> Ordering {
        match self {
            SortKey::EarliestDeparture => a.departure_time.cmp(&b.departure_time),
            SortKey::LatestDeparture => b.departure_time.cmp(&a.departure_time),
            SortKey::EarliestArrival => a.arrival_time.cmp(&b.arrival_time),
            SortKey::LatestArrival => b.arrival_time.cmp(&a.arrival_time),
            SortKey::ShortestFlight => a.duration().cmp(&b.duration()),
            SortKey::LongestFlight => b.duration().cmp(&a.duration()),
        }
    }
}

/// Stable sort of `flights` in place.
pub fn sort_flights(flights: &mut [FlightRecord], key: SortKey) {
    flights.sort_by(|a, b| key.compare(a, b));
}

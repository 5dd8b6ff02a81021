use std::borrow::Cow;

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::engine::{FilterOptions, ListingStatus};
use crate::utils::error::{AppError, AppResult};

pub const FIELDS_REQUIRED: &str = "All fields are required.";
pub const ARRIVAL_AFTER_DEPARTURE: &str = "Arrival time must be after departure time.";
pub const FLIGHT_NUMBER_POSITIVE: &str = "Flight number must be a positive integer.";
pub const AIRPORT_CODE_FORMAT: &str = "Airport codes must be three letters.";

// A single logged flight, as returned to its owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FlightRecord {
    pub id: i32,
    pub user_id: i32,
    pub passenger_name: String,
    pub departure_airport_code: String,
    pub arrival_airport_code: String,
    pub flight_number: i32,
    pub airline_id: String,
    pub airline_name: String,
    /// Local departure time, with the offset it was entered in.
    pub departure_time: DateTime<FixedOffset>,
    /// Local arrival time, with the offset it was entered in.
    pub arrival_time: DateTime<FixedOffset>,
}

impl FlightRecord {
    pub fn duration(&self) -> chrono::Duration {
        self.arrival_time - self.departure_time
    }
}

// Row layout of the flight_log table. Instants are stored in UTC next to the
// offset (seconds east of UTC) they were entered with.
#[derive(Debug, sqlx::FromRow)]
pub struct FlightRow {
    pub id: i32,
    pub user_id: i32,
    pub passenger_name: String,
    pub departure_airport_code: String,
    pub arrival_airport_code: String,
    pub flight_number: i32,
    pub airline_id: String,
    pub airline_name: String,
    pub departure_utc: NaiveDateTime,
    pub departure_offset: i32,
    pub arrival_utc: NaiveDateTime,
    pub arrival_offset: i32,
}

impl TryFrom<FlightRow> for FlightRecord {
    type Error = AppError;

    fn try_from(row: FlightRow) -> AppResult<Self> {
        Ok(FlightRecord {
            departure_time: from_utc_parts(row.departure_utc, row.departure_offset)?,
            arrival_time: from_utc_parts(row.arrival_utc, row.arrival_offset)?,
            id: row.id,
            user_id: row.user_id,
            passenger_name: row.passenger_name,
            departure_airport_code: row.departure_airport_code,
            arrival_airport_code: row.arrival_airport_code,
            flight_number: row.flight_number,
            airline_id: row.airline_id,
            airline_name: row.airline_name,
        })
    }
}

fn from_utc_parts(utc: NaiveDateTime, offset_secs: i32) -> AppResult<DateTime<FixedOffset>> {
    let offset = FixedOffset::east_opt(offset_secs).ok_or_else(|| {
        AppError::DatabaseError(format!("stored utc offset out of range: {}", offset_secs))
    })?;
    Ok(offset.from_utc_datetime(&utc))
}

/// Payload of the add-flight form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Validate)]
#[validate(schema(function = "validate_flight_times"))]
pub struct NewFlightRequest {
    #[validate(length(min = 1, message = "All fields are required."))]
    pub passenger_name: String,

    #[validate(custom(function = "validate_airport_code"))]
    pub departure_airport_code: String,

    #[validate(custom(function = "validate_airport_code"))]
    pub arrival_airport_code: String,

    #[validate(range(min = 1, message = "Flight number must be a positive integer."))]
    pub flight_number: i32,

    #[validate(length(min = 1, message = "All fields are required."))]
    pub airline_id: String,

    #[validate(length(min = 1, message = "All fields are required."))]
    pub airline_name: String,

    pub departure_time: DateTime<FixedOffset>,

    pub arrival_time: DateTime<FixedOffset>,
}

impl NewFlightRequest {
    /// Trim free text and upper-case the airport codes.
    pub fn normalized(self) -> Self {
        NewFlightRequest {
            passenger_name: self.passenger_name.trim().to_string(),
            departure_airport_code: self.departure_airport_code.trim().to_uppercase(),
            arrival_airport_code: self.arrival_airport_code.trim().to_uppercase(),
            airline_id: self.airline_id.trim().to_string(),
            airline_name: self.airline_name.trim().to_string(),
            ..self
        }
    }

    pub fn into_record(self, id: i32, user_id: i32) -> FlightRecord {
        FlightRecord {
            id,
            user_id,
            passenger_name: self.passenger_name,
            departure_airport_code: self.departure_airport_code,
            arrival_airport_code: self.arrival_airport_code,
            flight_number: self.flight_number,
            airline_id: self.airline_id,
            airline_name: self.airline_name,
            departure_time: self.departure_time,
            arrival_time: self.arrival_time,
        }
    }
}

fn validation_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

fn validate_airport_code(code: &str) -> Result<(), ValidationError> {
    if code.trim().is_empty() {
        return Err(validation_error("required", FIELDS_REQUIRED));
    }
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(validation_error("airport_code", AIRPORT_CODE_FORMAT));
    }
    Ok(())
}

fn validate_flight_times(request: &NewFlightRequest) -> Result<(), ValidationError> {
    if request.arrival_time <= request.departure_time {
        return Err(validation_error("arrival_before_departure", ARRIVAL_AFTER_DEPARTURE));
    }
    Ok(())
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct FlightListResponse {
    pub flights: Vec<FlightRecord>,
    pub status: ListingStatus,
    /// Number of records the user owns before filtering.
    pub total_records: usize,
    pub options: FilterOptions,
}

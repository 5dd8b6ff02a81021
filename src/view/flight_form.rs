use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};
use thiserror::Error;
use validator::Validate;

use crate::models::flight::{FlightRecord, NewFlightRequest};
use crate::models::search::Catalog;
use crate::services::flight_service::FlightService;
use crate::utils::error::AppError;
use crate::utils::jwt::Session;
use crate::view::Autocomplete;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("All fields are required.")]
    MissingFields,

    #[error("Flight number must be a positive integer.")]
    InvalidFlightNumber,

    #[error("{0} is not a valid date and time.")]
    InvalidDateTime(&'static str),

    #[error("Arrival time must be after departure time.")]
    ArrivalNotAfterDeparture,

    #[error("{0}")]
    Invalid(String),

    #[error("Could not save the flight: {0}")]
    Rejected(#[from] AppError),
}

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Draft of a new flight. Times are entered as local wall-clock values
/// (`2024-01-02T23:30`) and interpreted in the form's offset unless they
/// carry one of their own.
#[derive(Debug, Clone)]
pub struct FlightForm {
    offset: FixedOffset,
    pub passenger_name: String,
    pub flight_number: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub airline: Autocomplete,
    pub departure_airport: Autocomplete,
    pub arrival_airport: Autocomplete,
    error: Option<String>,
}

impl FlightForm {
    pub fn new(offset: FixedOffset) -> Self {
        FlightForm {
            offset,
            passenger_name: String::new(),
            flight_number: String::new(),
            departure_time: String::new(),
            arrival_time: String::new(),
            airline: Autocomplete::new(Catalog::Airline),
            departure_airport: Autocomplete::new(Catalog::Airport),
            arrival_airport: Autocomplete::new(Catalog::Airport),
            error: None,
        }
    }

    /// Message to show inline after a failed submit.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Build the create request, or record and return why it can't be built.
    pub fn submit(&mut self) -> Result<NewFlightRequest, FormError> {
        let result = self.build();
        self.error = result.as_ref().err().map(|e| e.to_string());
        result
    }

    /// Submit and store through `service` on behalf of `session`.
    pub async fn save(
        &mut self,
        service: &FlightService,
        session: &Session,
    ) -> Result<FlightRecord, FormError> {
        let request = self.submit()?;
        match service.add_flight(session, request).await {
            Ok(flight) => Ok(flight),
            Err(e) => {
                let err = FormError::from(e);
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    fn build(&self) -> Result<NewFlightRequest, FormError> {
        let airline = self.airline.selected();
        let departure_code = self.departure_airport.selected().and_then(|s| s.code.clone());
        let arrival_code = self.arrival_airport.selected().and_then(|s| s.code.clone());

        let blank = |s: &str| s.trim().is_empty();
        let (airline, departure_code, arrival_code) = match (airline, departure_code, arrival_code) {
            (Some(a), Some(d), Some(r))
                if !blank(self.passenger_name.as_str())
                    && !blank(self.flight_number.as_str())
                    && !blank(self.departure_time.as_str())
                    && !blank(self.arrival_time.as_str()) =>
            {
                (a, d, r)
            }
            _ => return Err(FormError::MissingFields),
        };

        let flight_number = self
            .flight_number
            .trim()
            .parse::<i32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or(FormError::InvalidFlightNumber)?;

        let departure_time = self.parse_time(&self.departure_time, "Departure time")?;
        let arrival_time = self.parse_time(&self.arrival_time, "Arrival time")?;
        if arrival_time <= departure_time {
            return Err(FormError::ArrivalNotAfterDeparture);
        }

        let request = NewFlightRequest {
            passenger_name: self.passenger_name.clone(),
            departure_airport_code: departure_code,
            arrival_airport_code: arrival_code,
            flight_number,
            airline_id: airline.id.clone(),
            airline_name: airline.name.clone(),
            departure_time,
            arrival_time,
        }
        .normalized();

        request
            .validate()
            .map_err(|e| match AppError::from(e) {
                AppError::ValidationError(message) => FormError::Invalid(message),
                other => FormError::Invalid(other.to_string()),
            })?;
        Ok(request)
    }

    fn parse_time(&self, value: &str, field: &'static str) -> Result<DateTime<FixedOffset>, FormError> {
        let value = value.trim();
        if let Ok(with_offset) = DateTime::parse_from_rfc3339(value) {
            return Ok(with_offset);
        }
        DATETIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
            .and_then(|naive| self.offset.from_local_datetime(&naive).single())
            .ok_or(FormError::InvalidDateTime(field))
    }
}

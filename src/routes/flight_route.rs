use std::str::FromStr;

use chrono::NaiveDate;
use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;
use crate::engine::{FlightFilters, SortKey};
use crate::models::flight::{FlightListResponse, FlightRecord, NewFlightRequest};
use crate::services::flight_service::FlightService;
use crate::utils::error::{AppError, AppResult};
use crate::utils::jwt::Session;

// Empty values come from "All" selections and mean "no filter"
fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

// Stored codes are upper-case
fn airport_code(value: Option<String>) -> Option<String> {
    non_empty(value).map(|code| code.to_ascii_uppercase())
}

fn parse_date(value: Option<String>, field: &str) -> AppResult<Option<NaiveDate>> {
    match non_empty(value) {
        Some(date) => NaiveDate::parse_from_str(&date, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| AppError::BadRequest(format!("Invalid {} format", field))),
        None => Ok(None),
    }
}

/// List the caller's flights, filtered and sorted
#[openapi(tag = "Flights")]
#[get("/flights?<sort>&<passenger>&<airline>&<departure_airport>&<arrival_airport>&<departure_date>&<arrival_date>")]
pub async fn list_flights(
    sort: Option<String>,
    passenger: Option<String>,
    airline: Option<String>,
    departure_airport: Option<String>,
    arrival_airport: Option<String>,
    departure_date: Option<String>,
    arrival_date: Option<String>,
    session: Session,
    flight_service: &State<FlightService>,
) -> Result<Json<FlightListResponse>, AppError> {
    let sort = match non_empty(sort) {
        Some(key) => SortKey::from_str(&key)
            .map_err(|_| AppError::BadRequest(format!("Unknown sort option: {}", key)))?,
        None => SortKey::default(),
    };

    let filters = FlightFilters {
        sort,
        passenger: non_empty(passenger),
        airline: non_empty(airline),
        departure_airport: airport_code(departure_airport),
        arrival_airport: airport_code(arrival_airport),
        departure_date: parse_date(departure_date, "departure date")?,
        arrival_date: parse_date(arrival_date, "arrival date")?,
    };

    let response = flight_service.list_flights(&session, &filters).await?;
    Ok(Json(response))
}

/// Add a flight to the caller's log
#[openapi(tag = "Flights")]
#[post("/flights", format = "json", data = "<request>")]
pub async fn add_flight(
    request: Json<NewFlightRequest>,
    session: Session,
    flight_service: &State<FlightService>,
) -> Result<Json<FlightRecord>, AppError> {
    let flight = flight_service.add_flight(&session, request.into_inner()).await?;
    Ok(Json(flight))
}

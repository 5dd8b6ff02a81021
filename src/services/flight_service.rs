use std::sync::Arc;

use validator::Validate;

use crate::engine::{self, FilterOptions, FlightFilters};
use crate::models::flight::{FlightListResponse, FlightRecord, NewFlightRequest};
use crate::store::FlightStore;
use crate::utils::error::AppResult;
use crate::utils::jwt::Session;

pub struct FlightService {
    store: Arc<dyn FlightStore>,
}

impl FlightService {
    pub fn new(store: Arc<dyn FlightStore>) -> Self {
        FlightService { store }
    }

    // Fetch every flight the session's user owns
    pub async fn fetch_flights(&self, session: &Session) -> AppResult<Vec<FlightRecord>> {
        let flights = self.store.flights_for_user(session.user_id).await.map_err(|e| {
            tracing::warn!(user_id = session.user_id, error = %e, "failed to load flights");
            e
        })?;
        tracing::debug!(user_id = session.user_id, count = flights.len(), "loaded flights");
        Ok(flights)
    }

    // Validate and store a new flight; nothing is written when validation fails
    pub async fn add_flight(
        &self,
        session: &Session,
        request: NewFlightRequest,
    ) -> AppResult<FlightRecord> {
        let request = request.normalized();
        request.validate()?;

        let flight = self.store.insert_flight(session.user_id, &request).await?;
        tracing::info!(
            user_id = session.user_id,
            flight_id = flight.id,
            route = %format!("{}-{}", flight.departure_airport_code, flight.arrival_airport_code),
            "flight added"
        );
        Ok(flight)
    }

    // Fetch, then filter and sort with the complete selection
    pub async fn list_flights(
        &self,
        session: &Session,
        filters: &FlightFilters,
    ) -> AppResult<FlightListResponse> {
        let flights = self.fetch_flights(session).await?;
        let listing = engine::list(&flights, filters);

        Ok(FlightListResponse {
            flights: listing.flights,
            status: listing.status,
            total_records: listing.total_records,
            options: FilterOptions::from_flights(&flights),
        })
    }
}

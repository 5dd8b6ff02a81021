use chrono::NaiveDate;

use crate::engine::{self, FilterOptions, FlightFilters, ListingStatus, SortKey};
use crate::models::flight::FlightRecord;
use crate::services::flight_service::FlightService;
use crate::utils::error::AppResult;
use crate::utils::jwt::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

/// Transient message shown once, then dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub message: &'static str,
}

/// The "my flights" page: authoritative base list, current selection and
/// the list derived from both.
#[derive(Debug, Clone, Default)]
pub struct FlightListView {
    base: Vec<FlightRecord>,
    filters: FlightFilters,
    visible: Vec<FlightRecord>,
    status: ListingStatus,
    options: FilterOptions,
    notice: Option<Notice>,
}

impl FlightListView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the base list with a fetch result. A failed fetch leaves an
    /// empty list and an error notice, never stale data.
    pub fn load(&mut self, result: AppResult<Vec<FlightRecord>>) {
        self.filters = FlightFilters::default();
        match result {
            Ok(flights) => {
                self.base = flights;
                self.notice = Some(Notice {
                    severity: Severity::Success,
                    message: "Your flights loaded successfully.",
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "flight list unavailable");
                self.base.clear();
                self.notice = Some(Notice {
                    severity: Severity::Error,
                    message: "Failed to load your flights.",
                });
            }
        }
        self.options = FilterOptions::from_flights(&self.base);
        self.recompute();
    }

    /// Fetch the session user's flights and [`load`](Self::load) them.
    pub async fn refresh(&mut self, service: &FlightService, session: &Session) {
        let result = service.fetch_flights(session).await;
        self.load(result);
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.filters.sort = sort;
        self.recompute();
    }

    pub fn set_passenger(&mut self, passenger: Option<String>) {
        self.filters.passenger = passenger;
        self.recompute();
    }

    pub fn set_airline(&mut self, airline: Option<String>) {
        self.filters.airline = airline;
        self.recompute();
    }

    pub fn set_departure_airport(&mut self, airport: Option<String>) {
        self.filters.departure_airport = airport;
        self.recompute();
    }

    pub fn set_arrival_airport(&mut self, airport: Option<String>) {
        self.filters.arrival_airport = airport;
        self.recompute();
    }

    pub fn set_departure_date(&mut self, date: Option<NaiveDate>) {
        self.filters.departure_date = date;
        self.recompute();
    }

    pub fn set_arrival_date(&mut self, date: Option<NaiveDate>) {
        self.filters.arrival_date = date;
        self.recompute();
    }

    pub fn filters(&self) -> &FlightFilters {
        &self.filters
    }

    pub fn visible(&self) -> &[FlightRecord] {
        &self.visible
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    pub fn status(&self) -> ListingStatus {
        self.status
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    // Always from the base list and the whole selection
    fn recompute(&mut self) {
        let listing = engine::list(&self.base, &self.filters);
        self.visible = listing.flights;
        self.status = listing.status;
    }
}

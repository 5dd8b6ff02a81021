#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, TimeZone};
use tokio::sync::Mutex;

use flight_log::config::{AppConfig, SearchConfig};
use flight_log::models::flight::{FlightRecord, NewFlightRequest};
use flight_log::models::search::{Catalog, Suggestion};
use flight_log::models::user::User;
use flight_log::search::{CatalogIndex, SearchError};
use flight_log::store::{FlightStore, UserStore};
use flight_log::utils::error::{AppError, AppResult};

pub const TEST_SECRET: &str = "test-secret";

pub fn test_config() -> AppConfig {
    AppConfig {
        database_url: "mysql://unused".to_string(),
        max_connections: 1,
        jwt_secret: TEST_SECRET.to_string(),
        token_ttl_hours: 1,
        search: SearchConfig {
            app_id: "test".to_string(),
            api_key: "test".to_string(),
            host: "http://127.0.0.1:1".to_string(),
            hits_per_page: 5,
        },
    }
}

pub fn utc() -> FixedOffset {
    FixedOffset::east_opt(0).unwrap()
}

pub fn at(offset: FixedOffset, y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<FixedOffset> {
    offset.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
}

pub fn record(
    id: i32,
    passenger: &str,
    route: (&str, &str),
    departure: DateTime<FixedOffset>,
    arrival: DateTime<FixedOffset>,
) -> FlightRecord {
    FlightRecord {
        id,
        user_id: 1,
        passenger_name: passenger.to_string(),
        departure_airport_code: route.0.to_string(),
        arrival_airport_code: route.1.to_string(),
        flight_number: 100 + id,
        airline_id: "ac".to_string(),
        airline_name: "Air Canada".to_string(),
        departure_time: departure,
        arrival_time: arrival,
    }
}

pub fn new_flight(passenger: &str, departure: DateTime<FixedOffset>, arrival: DateTime<FixedOffset>) -> NewFlightRequest {
    NewFlightRequest {
        passenger_name: passenger.to_string(),
        departure_airport_code: "yyz".to_string(),
        arrival_airport_code: "YUL".to_string(),
        flight_number: 401,
        airline_id: "ac".to_string(),
        airline_name: "Air Canada".to_string(),
        departure_time: departure,
        arrival_time: arrival,
    }
}

/// Flight store kept in memory; can be switched to fail every call.
#[derive(Default)]
pub struct InMemoryFlightStore {
    flights: Mutex<Vec<FlightRecord>>,
    failing: bool,
}

impl InMemoryFlightStore {
    pub fn failing() -> Self {
        InMemoryFlightStore {
            flights: Mutex::new(Vec::new()),
            failing: true,
        }
    }

    pub async fn len(&self) -> usize {
        self.flights.lock().await.len()
    }
}

#[async_trait]
impl FlightStore for InMemoryFlightStore {
    async fn flights_for_user(&self, user_id: i32) -> AppResult<Vec<FlightRecord>> {
        if self.failing {
            return Err(AppError::DatabaseError("connection refused".to_string()));
        }
        Ok(self
            .flights
            .lock()
            .await
            .iter()
            .filter(|f| f.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn insert_flight(&self, user_id: i32, flight: &NewFlightRequest) -> AppResult<FlightRecord> {
        if self.failing {
            return Err(AppError::DatabaseError("connection refused".to_string()));
        }
        let mut flights = self.flights.lock().await;
        let record = flight.clone().into_record(flights.len() as i32 + 1, user_id);
        flights.push(record.clone());
        Ok(record)
    }
}

#[derive(Default)]
pub struct InMemoryUserStore {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .await
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn insert_user(&self, username: &str, password_hash: &str) -> AppResult<i32> {
        let mut users = self.users.lock().await;
        if users.iter().any(|u| u.username == username) {
            return Err(AppError::Conflict("Username already exists".to_string()));
        }
        let id = users.len() as i32 + 1;
        users.push(User {
            id,
            username: username.to_string(),
            password: password_hash.to_string(),
        });
        Ok(id)
    }
}

/// Canned catalog. Counts calls so tests can assert that none were made.
#[derive(Default)]
pub struct FakeIndex {
    pub airlines: Vec<Suggestion>,
    pub airports: Vec<Suggestion>,
    pub fail: bool,
    calls: AtomicUsize,
}

impl FakeIndex {
    pub fn with_catalogs() -> Self {
        FakeIndex {
            airlines: vec![
                suggestion("ac", "Air Canada", None),
                suggestion("af", "Air France", None),
                suggestion("ai", "Air India", None),
            ],
            airports: vec![
                suggestion("1", "Toronto Pearson", Some("YYZ")),
                suggestion("2", "Montreal Trudeau", Some("YUL")),
                suggestion("3", "Toronto Billy Bishop", Some("YTZ")),
            ],
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn broken() -> Self {
        FakeIndex {
            fail: true,
            ..FakeIndex::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

pub fn suggestion(id: &str, name: &str, code: Option<&str>) -> Suggestion {
    Suggestion {
        id: id.to_string(),
        name: name.to_string(),
        code: code.map(str::to_string),
    }
}

#[async_trait]
impl CatalogIndex for FakeIndex {
    async fn query(
        &self,
        catalog: Catalog,
        text: &str,
        max_hits: usize,
    ) -> Result<Vec<Suggestion>, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(SearchError::Status { status: 503 });
        }
        let source = match catalog {
            Catalog::Airline => &self.airlines,
            Catalog::Airport => &self.airports,
        };
        let needle = text.to_lowercase();
        Ok(source
            .iter()
            .filter(|s| {
                s.name.to_lowercase().contains(&needle)
                    || s.code.as_deref().map_or(false, |c| c.eq_ignore_ascii_case(text))
            })
            .take(max_hits)
            .cloned()
            .collect())
    }
}

pub fn shared<T>(value: T) -> Arc<T> {
    Arc::new(value)
}

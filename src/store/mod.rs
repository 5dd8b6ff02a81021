//! Persistence boundaries. Services only see these traits; the MySQL
//! implementations live in [`mysql`].

pub mod mysql;

use async_trait::async_trait;

use crate::models::flight::{FlightRecord, NewFlightRequest};
use crate::models::user::User;
use crate::utils::error::AppResult;

pub use mysql::{MySqlFlightStore, MySqlUserStore};

#[async_trait]
pub trait FlightStore: Send + Sync {
    /// All records owned by `user_id`, in insertion order.
    async fn flights_for_user(&self, user_id: i32) -> AppResult<Vec<FlightRecord>>;

    /// Persist an already validated flight and return the stored record.
    async fn insert_flight(&self, user_id: i32, flight: &NewFlightRequest) -> AppResult<FlightRecord>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Insert a user with an already hashed password and return its id.
    /// A taken username is `AppError::Conflict`.
    async fn insert_user(&self, username: &str, password_hash: &str) -> AppResult<i32>;
}

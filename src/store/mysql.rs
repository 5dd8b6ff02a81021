use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::models::flight::{FlightRecord, FlightRow, NewFlightRequest};
use crate::models::user::User;
use crate::store::{FlightStore, UserStore};
use crate::utils::error::{AppError, AppResult};

fn inserted_id(id: u64) -> AppResult<i32> {
    i32::try_from(id).map_err(|_| AppError::DatabaseError(format!("insert id {} out of range", id)))
}

// A concurrent registration can pass the existence check and still lose on
// the unique index.
fn username_taken(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::Conflict("Username already exists".into())
        }
        _ => err.into(),
    }
}

pub struct MySqlFlightStore {
    pool: MySqlPool,
}

impl MySqlFlightStore {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlFlightStore { pool }
    }
}

#[async_trait]
impl FlightStore for MySqlFlightStore {
    async fn flights_for_user(&self, user_id: i32) -> AppResult<Vec<FlightRecord>> {
        let rows = sqlx::query_as::<_, FlightRow>(
            r#"
            SELECT
                id,
                user_id,
                passenger_name,
                departure_airport_code,
                arrival_airport_code,
                flight_number,
                airline_id,
                airline_name,
                departure_utc,
                departure_offset,
                arrival_utc,
                arrival_offset
            FROM flight_log
            WHERE user_id = ?
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(FlightRecord::try_from).collect()
    }

    async fn insert_flight(&self, user_id: i32, flight: &NewFlightRequest) -> AppResult<FlightRecord> {
        let result = sqlx::query(
            r#"
            INSERT INTO flight_log (
                user_id,
                passenger_name,
                departure_airport_code,
                arrival_airport_code,
                flight_number,
                airline_id,
                airline_name,
                departure_utc,
                departure_offset,
                arrival_utc,
                arrival_offset
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(&flight.passenger_name)
        .bind(&flight.departure_airport_code)
        .bind(&flight.arrival_airport_code)
        .bind(flight.flight_number)
        .bind(&flight.airline_id)
        .bind(&flight.airline_name)
        .bind(flight.departure_time.naive_utc())
        .bind(flight.departure_time.offset().local_minus_utc())
        .bind(flight.arrival_time.naive_utc())
        .bind(flight.arrival_time.offset().local_minus_utc())
        .execute(&self.pool)
        .await?;

        let id = inserted_id(result.last_insert_id())?;
        Ok(flight.clone().into_record(id, user_id))
    }
}

pub struct MySqlUserStore {
    pool: MySqlPool,
}

impl MySqlUserStore {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlUserStore { pool }
    }
}

#[async_trait]
impl UserStore for MySqlUserStore {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password FROM user WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn insert_user(&self, username: &str, password_hash: &str) -> AppResult<i32> {
        let result = sqlx::query("INSERT INTO user (username, password) VALUES (?, ?)")
            .bind(username)
            .bind(password_hash)
            .execute(&self.pool)
            .await
            .map_err(username_taken)?;

        inserted_id(result.last_insert_id())
    }
}

use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use std::time::Duration;

// Tables are created on startup when missing
const SCHEMA: [&str; 2] = [
    "CREATE TABLE IF NOT EXISTS user (
        id INT AUTO_INCREMENT PRIMARY KEY,
        username CHAR(255) NOT NULL,
        password CHAR(255) NOT NULL,
        CONSTRAINT user_username_uindex UNIQUE (username)
    )",
    "CREATE TABLE IF NOT EXISTS flight_log (
        id INT AUTO_INCREMENT PRIMARY KEY,
        user_id INT NOT NULL,
        passenger_name VARCHAR(255) NOT NULL,
        departure_airport_code CHAR(3) NOT NULL,
        arrival_airport_code CHAR(3) NOT NULL,
        flight_number INT NOT NULL,
        airline_id VARCHAR(64) NOT NULL,
        airline_name VARCHAR(255) NOT NULL,
        departure_utc DATETIME NOT NULL,
        departure_offset INT NOT NULL,
        arrival_utc DATETIME NOT NULL,
        arrival_offset INT NOT NULL,
        INDEX flight_log_user_id_index (user_id),
        CONSTRAINT flight_log_user_id_fk
            FOREIGN KEY (user_id) REFERENCES user(id)
            ON DELETE CASCADE
    )",
];

// Database connection manager
pub struct Database {
    pub pool: MySqlPool,
}

impl Database {
    // Create a new database connection pool
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = MySqlPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(database_url)
            .await?;

        Ok(Database { pool })
    }

    pub async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
        for create_sql in SCHEMA {
            sqlx::query(create_sql).execute(&self.pool).await?;
        }
        tracing::info!(tables = SCHEMA.len(), "database schema ready");
        Ok(())
    }

    // Get a reference to the connection pool
    pub fn get_pool(&self) -> &MySqlPool {
        &self.pool
    }
}

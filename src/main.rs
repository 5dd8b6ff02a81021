use std::sync::Arc;

use dotenv::dotenv;
use flight_log::config::AppConfig;
use flight_log::db::Database;
use flight_log::logging::init_logging;
use flight_log::search::AlgoliaIndex;
use flight_log::store::{MySqlFlightStore, MySqlUserStore};
use flight_log::{build_rocket, Backends};

#[rocket::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    init_logging(tracing::Level::INFO);

    let config = AppConfig::from_env()?;

    // Connect to the database
    let database = Database::new(&config.database_url, config.max_connections).await?;
    database.ensure_schema().await?;
    let pool = database.get_pool().clone();

    let index = AlgoliaIndex::new(config.search.clone())?;
    if config.search.app_id.is_empty() {
        tracing::warn!("SEARCH_APP_ID is not set; autocomplete will return no suggestions");
    }

    let backends = Backends {
        flights: Arc::new(MySqlFlightStore::new(pool.clone())),
        users: Arc::new(MySqlUserStore::new(pool)),
        index: Arc::new(index),
    };

    let _rocket = build_rocket(config, backends).launch().await?;
    Ok(())
}

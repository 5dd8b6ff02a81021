#[macro_use]
extern crate rocket;
extern crate rocket_okapi;

pub mod config;
pub mod db;
pub mod engine;
pub mod logging;
pub mod models;
pub mod routes;
pub mod search;
pub mod services;
pub mod store;
pub mod utils;
pub mod view;

use std::sync::Arc;

use rocket::fairing::AdHoc;
use rocket::{Build, Rocket};
use rocket_okapi::openapi_get_routes;
use rocket_okapi::swagger_ui::{make_swagger_ui, SwaggerUIConfig};

use crate::config::AppConfig;
use crate::search::CatalogIndex;
use crate::services::flight_service::FlightService;
use crate::services::search_service::SearchService;
use crate::services::user_service::UserService;
use crate::store::{FlightStore, UserStore};

/// Collaborators the HTTP layer is assembled from.
pub struct Backends {
    pub flights: Arc<dyn FlightStore>,
    pub users: Arc<dyn UserStore>,
    pub index: Arc<dyn CatalogIndex>,
}

fn swagger_ui() -> SwaggerUIConfig {
    SwaggerUIConfig {
        url: "/api/openapi.json".to_string(),
        ..Default::default()
    }
}

pub fn build_rocket(config: AppConfig, backends: Backends) -> Rocket<Build> {
    let user_service = UserService::new(
        backends.users,
        config.jwt_secret.clone(),
        config.token_ttl_hours,
    );
    build_rocket_with(config, backends.flights, backends.index, user_service)
}

/// Like [`build_rocket`], with a caller-built [`UserService`].
pub fn build_rocket_with(
    config: AppConfig,
    flights: Arc<dyn FlightStore>,
    index: Arc<dyn CatalogIndex>,
    user_service: UserService,
) -> Rocket<Build> {
    let flight_service = FlightService::new(flights);
    let search_service = SearchService::new(index).with_max_hits(config.search.hits_per_page);

    rocket::build()
        .manage(config)
        .manage(user_service)
        .manage(flight_service)
        .manage(search_service)
        .mount(
            "/api",
            openapi_get_routes![
                routes::user_route::register,
                routes::user_route::login,
                routes::flight_route::list_flights,
                routes::flight_route::add_flight,
                routes::search_route::suggest,
            ],
        )
        .mount(
            "/swagger",
            make_swagger_ui(&swagger_ui()),
        )
        .attach(AdHoc::on_response("CORS", |_, res| {
            Box::pin(async move {
                res.set_header(rocket::http::Header::new(
                    "Access-Control-Allow-Origin",
                    "*",
                ));
            })
        }))
}

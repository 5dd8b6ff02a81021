use std::str::FromStr;

use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;
use crate::models::search::{Catalog, SuggestionResponse};
use crate::services::search_service::SearchService;
use crate::utils::error::AppError;
use crate::utils::jwt::Session;

/// Autocomplete suggestions from the airline or airport catalog
#[openapi(tag = "Search")]
#[get("/search/<catalog>?<q>")]
pub async fn suggest(
    catalog: &str,
    q: Option<String>,
    _session: Session,
    search_service: &State<SearchService>,
) -> Result<Json<SuggestionResponse>, AppError> {
    let catalog = Catalog::from_str(catalog)
        .map_err(|_| AppError::BadRequest(format!("Unknown catalog: {}", catalog)))?;
    let query = q.unwrap_or_default();
    let suggestions = search_service.suggest(catalog, &query).await;

    Ok(Json(SuggestionResponse {
        catalog,
        query,
        suggestions,
    }))
}

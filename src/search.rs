//! Client for the hosted search-as-you-type index holding the airline and
//! airport catalogs.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::config::SearchConfig;
use crate::models::search::{Catalog, Suggestion};

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("search service answered {status}")]
    Status { status: u16 },

    #[error("search service is not configured")]
    NotConfigured,
}

/// Anything that can answer a free-text catalog lookup.
#[async_trait]
pub trait CatalogIndex: Send + Sync {
    async fn query(
        &self,
        catalog: Catalog,
        text: &str,
        max_hits: usize,
    ) -> Result<Vec<Suggestion>, SearchError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MultiQuery<'a> {
    requests: [IndexQuery<'a>; 1],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct IndexQuery<'a> {
    index_name: &'a str,
    query: &'a str,
    hits_per_page: usize,
}

#[derive(Debug, Deserialize)]
struct MultiResponse {
    #[serde(default)]
    results: Vec<IndexResult>,
}

#[derive(Debug, Deserialize)]
struct IndexResult {
    #[serde(default)]
    hits: Vec<Value>,
}

/// Index backed by the vendor's REST multi-query endpoint.
#[derive(Debug, Clone)]
pub struct AlgoliaIndex {
    client: Client,
    config: SearchConfig,
}

impl AlgoliaIndex {
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(5))
            .build()?;
        Ok(AlgoliaIndex { client, config })
    }

    fn endpoint(&self) -> String {
        format!("{}/1/indexes/*/queries", self.config.host)
    }
}

#[async_trait]
impl CatalogIndex for AlgoliaIndex {
    async fn query(
        &self,
        catalog: Catalog,
        text: &str,
        max_hits: usize,
    ) -> Result<Vec<Suggestion>, SearchError> {
        if self.config.app_id.is_empty() || self.config.api_key.is_empty() {
            return Err(SearchError::NotConfigured);
        }

        let body = MultiQuery {
            requests: [IndexQuery {
                index_name: catalog.index_name(),
                query: text,
                hits_per_page: max_hits,
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("X-Algolia-Application-Id", &self.config.app_id)
            .header("X-Algolia-API-Key", &self.config.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SearchError::Status {
                status: response.status().as_u16(),
            });
        }

        let parsed: MultiResponse = response.json().await?;
        let hits = parsed
            .results
            .into_iter()
            .next()
            .map(|r| r.hits)
            .unwrap_or_default();

        Ok(hits
            .iter()
            .filter_map(|hit| suggestion_from_hit(catalog, hit))
            .take(max_hits)
            .collect())
    }
}

/// Project a raw hit onto a [`Suggestion`]. Airline hits carry `name` and
/// `objectID`; airport hits carry `Name` and `IATA`. Airports missing both a
/// name and a code are unusable and dropped.
pub fn suggestion_from_hit(catalog: Catalog, hit: &Value) -> Option<Suggestion> {
    let text = |key: &str| {
        hit.get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };
    let id = text("objectID").or_else(|| text("objectId"));

    match catalog {
        Catalog::Airline => {
            let name = text("name")?;
            Some(Suggestion {
                id: id.unwrap_or_else(|| name.clone()),
                name,
                code: text("iata").or_else(|| text("IATA")),
            })
        }
        Catalog::Airport => {
            let name = text("Name").or_else(|| text("name"));
            let code = text("IATA").or_else(|| text("iata"));
            if name.is_none() && code.is_none() {
                return None;
            }
            let code = code.map(|c| c.to_uppercase());
            Some(Suggestion {
                id: id.or_else(|| code.clone()).unwrap_or_default(),
                name: name.or_else(|| code.clone()).unwrap_or_default(),
                code,
            })
        }
    }
}

use std::sync::Arc;

use crate::config::DEFAULT_SEARCH_HITS;
use crate::models::search::{Catalog, Suggestion};
use crate::search::CatalogIndex;

pub struct SearchService {
    index: Arc<dyn CatalogIndex>,
    max_hits: usize,
}

impl SearchService {
    pub fn new(index: Arc<dyn CatalogIndex>) -> Self {
        SearchService {
            index,
            max_hits: DEFAULT_SEARCH_HITS,
        }
    }

    pub fn with_max_hits(mut self, max_hits: usize) -> Self {
        self.max_hits = max_hits;
        self
    }

    /// Best-effort suggestions for `text`. Blank input never reaches the
    /// index, and index failures degrade to an empty list.
    pub async fn suggest(&self, catalog: Catalog, text: &str) -> Vec<Suggestion> {
        let text = text.trim();
        if text.is_empty() {
            return Vec::new();
        }

        match self.index.query(catalog, text, self.max_hits).await {
            Ok(mut suggestions) => {
                suggestions.truncate(self.max_hits);
                suggestions
            }
            Err(e) => {
                tracing::warn!(%catalog, query = text, error = %e, "catalog lookup failed");
                Vec::new()
            }
        }
    }
}

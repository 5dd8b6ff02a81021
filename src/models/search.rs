use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// External index queried for autocomplete suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Catalog {
    Airline,
    Airport,
}

impl Catalog {
    /// Name of the index on the search service.
    pub fn index_name(&self) -> &'static str {
        match self {
            Catalog::Airline => "Airline",
            Catalog::Airport => "Airport",
        }
    }
}

/// One pick offered to a selection field. `code` carries the IATA code for airports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Suggestion {
    pub id: String,
    pub name: String,
    pub code: Option<String>,
}

impl Suggestion {
    // "Heathrow (LHR)" for airports, the bare name otherwise
    pub fn label(&self) -> String {
        match &self.code {
            Some(code) => format!("{} ({})", self.name, code),
            None => self.name.clone(),
        }
    }
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct SuggestionResponse {
    pub catalog: Catalog,
    pub query: String,
    pub suggestions: Vec<Suggestion>,
}

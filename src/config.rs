//! Runtime configuration, read from the environment after `.env` is loaded.

use std::env;

use thiserror::Error;

/// Number of suggestions requested per autocomplete lookup.
pub const DEFAULT_SEARCH_HITS: usize = 5;

pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    pub app_id: String,
    pub api_key: String,
    /// Base URL of the index, without a trailing slash.
    pub host: String,
    pub hits_per_page: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub search: SearchConfig,
}

impl AppConfig {
    /// Load from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load through an arbitrary lookup, so tests never touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let database_url = required("DATABASE_URL")?;
        let jwt_secret = required("JWT_SECRET")?;

        let max_connections = parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;
        let token_ttl_hours = parse_or(&lookup, "JWT_TTL_HOURS", DEFAULT_TOKEN_TTL_HOURS)?;
        let hits_per_page = parse_or(&lookup, "SEARCH_HITS", DEFAULT_SEARCH_HITS)?;

        let app_id = lookup("SEARCH_APP_ID").unwrap_or_default();
        let api_key = lookup("SEARCH_API_KEY").unwrap_or_default();
        let host = lookup("SEARCH_HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| format!("https://{}-dsn.algolia.net", app_id.to_lowercase()));

        Ok(AppConfig {
            database_url,
            max_connections,
            jwt_secret,
            token_ttl_hours,
            search: SearchConfig {
                app_id,
                api_key,
                host: host.trim_end_matches('/').to_string(),
                hits_per_page,
            },
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
        _ => Ok(default),
    }
}

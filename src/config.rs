// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honoured for local runs.
//! Nothing here is global: `main` builds a `Config` once and hands each
//! client only the fields it needs.

use std::env;
use validator::Validate;

/// QWeather location id used when `WEATHER_LOCATION` is not set.
pub const DEFAULT_WEATHER_LOCATION: &str = "101250404";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone, Validate)]
pub struct Config {
    // --- Required credentials ---
    /// Notion integration token
    #[validate(length(min = 1))]
    pub notion_token: String,
    /// Destination Notion database ID
    #[validate(length(min = 1))]
    pub notion_database_id: String,
    /// Keep account mobile number
    #[validate(length(min = 1))]
    pub keep_mobile: String,
    /// Keep account password
    #[validate(length(min = 1))]
    pub keep_password: String,

    // --- Optional enrichment ---
    /// QWeather API key (weather falls back to a fixed string without it)
    pub qweather_api_key: Option<String>,
    /// QWeather location id or free-text city name
    #[validate(length(min = 1))]
    pub weather_location: String,
    /// Mapbox token; enables static track maps when present
    pub mapbox_access_token: Option<String>,

    // --- Sync behaviour ---
    /// Only sync records whose done date starts with this prefix (e.g. "2025")
    pub date_prefix: Option<String>,
    /// Emit JSON log lines instead of the human-readable format
    pub json_logs: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let config = Self {
            notion_token: required("NOTION_TOKEN")?,
            notion_database_id: required("NOTION_DATABASE_ID")?,
            keep_mobile: required("KEEP_MOBILE")?,
            keep_password: required("KEEP_PASSWORD")?,

            qweather_api_key: optional("QWEATHER_API_KEY"),
            weather_location: optional("WEATHER_LOCATION")
                .unwrap_or_else(|| DEFAULT_WEATHER_LOCATION.to_string()),
            mapbox_access_token: optional("MAPBOX_ACCESS_TOKEN"),

            date_prefix: optional("SYNC_DATE_PREFIX"),
            json_logs: optional("LOG_FORMAT").is_some_and(|f| f.eq_ignore_ascii_case("json")),
        };

        config
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        Ok(config)
    }

    /// Config with placeholder credentials, for tests only.
    pub fn test_default() -> Self {
        Self {
            notion_token: "test_notion_token".to_string(),
            notion_database_id: "test-database-id".to_string(),
            keep_mobile: "13800000000".to_string(),
            keep_password: "test_password".to_string(),
            qweather_api_key: Some("test_weather_key".to_string()),
            weather_location: DEFAULT_WEATHER_LOCATION.to_string(),
            mapbox_access_token: None,
            date_prefix: None,
            json_logs: false,
        }
    }
}

/// Read a required variable. Surrounding whitespace is trimmed because
/// secrets pasted into `.env` files often carry a trailing newline.
fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name)
        .map(|v| v.trim().to_string())
        .map_err(|_| ConfigError::Missing(name))
}

/// Read an optional variable, treating blank values as unset.
fn optional(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env mutation lives in a single test so parallel tests never race on it.
    #[test]
    fn test_config_from_env() {
        env::set_var("NOTION_TOKEN", "secret_abc\n");
        env::set_var("NOTION_DATABASE_ID", "db123");
        env::set_var("KEEP_MOBILE", "13800000000");
        env::set_var("KEEP_PASSWORD", "hunter2");
        env::remove_var("WEATHER_LOCATION");
        env::set_var("MAPBOX_ACCESS_TOKEN", "   ");
        env::set_var("SYNC_DATE_PREFIX", "2025");
        env::set_var("LOG_FORMAT", "JSON");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.notion_token, "secret_abc");
        assert_eq!(config.notion_database_id, "db123");
        assert_eq!(config.weather_location, DEFAULT_WEATHER_LOCATION);
        assert_eq!(config.mapbox_access_token, None);
        assert_eq!(config.date_prefix.as_deref(), Some("2025"));
        assert!(config.json_logs);

        // An empty credential is present but invalid
        env::set_var("KEEP_PASSWORD", "");
        assert!(matches!(Config::from_env(), Err(ConfigError::Invalid(_))));

        env::remove_var("KEEP_PASSWORD");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Missing("KEEP_PASSWORD"))
        ));
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::test_default().validate().is_ok());
    }
}

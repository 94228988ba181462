// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weather lookup via QWeather.
//!
//! Lookups never fail from the caller's point of view: any error is logged
//! and replaced by [`WEATHER_UNAVAILABLE`].

use serde::Deserialize;
use tokio::sync::OnceCell;

const QWEATHER_API_BASE: &str = "https://api.qweather.com";
const QWEATHER_GEO_BASE: &str = "https://geoapi.qweather.com";

/// Summary returned whenever the real weather cannot be obtained.
pub const WEATHER_UNAVAILABLE: &str = "weather unavailable";

/// Where to look up weather.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeatherLocation {
    /// QWeather location id (e.g. "101250404")
    Code(String),
    /// Free-text city name, resolved through the GeoAPI
    City(String),
}

impl WeatherLocation {
    /// All-digit input is a location id; anything else is a city name.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if !raw.is_empty() && raw.chars().all(|c| c.is_ascii_digit()) {
            WeatherLocation::Code(raw.to_string())
        } else {
            WeatherLocation::City(raw.to_string())
        }
    }
}

/// QWeather client with a per-run cache for resolved city codes.
pub struct WeatherService {
    http: reqwest::Client,
    api_base: String,
    geo_base: String,
    api_key: Option<String>,
    resolved_code: OnceCell<String>,
}

impl WeatherService {
    pub fn new(http: reqwest::Client, api_key: Option<String>) -> Self {
        Self {
            http,
            api_base: QWEATHER_API_BASE.to_string(),
            geo_base: QWEATHER_GEO_BASE.to_string(),
            api_key,
            resolved_code: OnceCell::new(),
        }
    }

    /// Service against different hosts (used by tests).
    pub fn with_base_urls(api_key: Option<String>, api_base: &str, geo_base: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
            geo_base: geo_base.trim_end_matches('/').to_string(),
            api_key,
            resolved_code: OnceCell::new(),
        }
    }

    /// Current weather summary for `location`, e.g. "晴 ~ 24°C".
    pub async fn lookup(&self, location: &WeatherLocation) -> String {
        match self.try_lookup(location).await {
            Ok(summary) => summary,
            Err(e) => {
                tracing::warn!(error = %e, location = ?location, "Weather lookup failed");
                WEATHER_UNAVAILABLE.to_string()
            }
        }
    }

    async fn try_lookup(&self, location: &WeatherLocation) -> Result<String, WeatherError> {
        let key = self.api_key.as_deref().ok_or(WeatherError::NotConfigured)?;
        let code = self.resolve(location, key).await?;

        let url = format!("{}/v7/weather/now", self.api_base);
        let body: NowResponse = self
            .http
            .get(&url)
            .query(&[("location", code), ("key", key)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if body.code != "200" {
            return Err(WeatherError::Api(body.code));
        }
        let now = body.now.ok_or(WeatherError::MissingField("now"))?;

        tracing::debug!(location = code, text = %now.text, temp = %now.temp, "Weather fetched");
        Ok(format!("{} ~ {}°C", now.text, now.temp))
    }

    /// Resolve a location to a QWeather location id.
    async fn resolve<'a>(
        &'a self,
        location: &'a WeatherLocation,
        key: &str,
    ) -> Result<&'a str, WeatherError> {
        match location {
            WeatherLocation::Code(code) => Ok(code.as_str()),
            WeatherLocation::City(city) => self
                .resolved_code
                .get_or_try_init(|| self.geocode(city, key))
                .await
                .map(String::as_str),
        }
    }

    async fn geocode(&self, city: &str, key: &str) -> Result<String, WeatherError> {
        if city.is_empty() {
            return Err(WeatherError::LocationNotFound(String::new()));
        }

        let url = format!("{}/v2/city/lookup", self.geo_base);
        let body: CityLookupResponse = self
            .http
            .get(&url)
            .query(&[("location", city), ("key", key)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if body.code != "200" {
            return Err(WeatherError::Api(body.code));
        }

        let found = body
            .location
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::LocationNotFound(city.to_string()))?;

        tracing::info!(city, id = %found.id, name = %found.name, "Resolved weather location");
        Ok(found.id)
    }
}

/// Weather lookup errors. These never leave this module.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("QWeather API key not configured")]
    NotConfigured,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("QWeather returned code {0}")]
    Api(String),

    #[error("Response missing field: {0}")]
    MissingField(&'static str),

    #[error("No location found for {0:?}")]
    LocationNotFound(String),
}

#[derive(Debug, Deserialize)]
struct NowResponse {
    code: String,
    now: Option<NowData>,
}

#[derive(Debug, Deserialize)]
struct NowData {
    temp: String,
    text: String,
}

#[derive(Debug, Deserialize)]
struct CityLookupResponse {
    code: String,
    #[serde(default)]
    location: Vec<CityLocation>,
}

#[derive(Debug, Deserialize)]
struct CityLocation {
    id: String,
    #[serde(default)]
    name: String,
}

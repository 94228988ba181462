// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Keep API client for logging in and fetching workout history.
//!
//! Handles:
//! - Mobile/password login
//! - Fetching every workout in a single "all dates" stats request
//! - Flattening Keep's grouped payload into `WorkoutRecord`s

use crate::error::SyncError;
use crate::models::{ActivityKind, GeoPoint, Vendor, WorkoutRecord};
use serde::{Deserialize, Serialize};

const KEEP_API_BASE: &str = "https://api.gotokeep.com";

/// Keep account credentials.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub mobile: String,
    pub password: String,
}

/// Keep API client.
#[derive(Clone)]
pub struct KeepClient {
    http: reqwest::Client,
    base_url: String,
}

impl KeepClient {
    pub fn new(http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: KEEP_API_BASE.to_string(),
        }
    }

    /// Client against a different host (used by tests).
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Log in and return a bearer token.
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<String, SyncError> {
        let url = format!("{}/v1.1/users/login", self.base_url);

        let response = self
            .http
            .post(&url)
            .json(credentials)
            .send()
            .await
            .map_err(|e| SyncError::Auth(format!("Login request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SyncError::Auth(format!("HTTP {}: {}", status, body)));
        }

        let body: Envelope<LoginData> = response
            .json()
            .await
            .map_err(|e| SyncError::Auth(format!("Failed to parse login response: {}", e)))?;

        body.data
            .token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| SyncError::Auth("Login response carried no token".to_string()))
    }

    /// Fetch the complete workout history for the account.
    pub async fn fetch_records(&self, token: &str) -> Result<Vec<WorkoutRecord>, SyncError> {
        let url = format!("{}/pd/v3/stats/detail", self.base_url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .query(&[("dateUnit", "all"), ("type", ""), ("lastDate", "0")])
            .send()
            .await
            .map_err(|e| SyncError::Fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SyncError::Fetch(format!("HTTP {}: {}", status, body)));
        }

        let body: Envelope<StatsData> = response
            .json()
            .await
            .map_err(|e| SyncError::Fetch(format!("JSON parse error: {}", e)))?;

        Ok(flatten_records(body.data.records))
    }
}

/// Flatten grouped logs into records, skipping logs without stats.
pub fn flatten_records(groups: Vec<KeepRecordGroup>) -> Vec<WorkoutRecord> {
    let mut records = Vec::new();
    for group in groups {
        for log in group.logs {
            match log.stats {
                Some(stats) => records.push(stats.into()),
                None => tracing::debug!("Skipping Keep log without stats"),
            }
        }
    }
    records
}

/// Keep wraps every response body in `{"data": ...}`. Error replies carry
/// `ok: false` and no `data`, so a missing `data` fails to parse.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct LoginData {
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StatsData {
    records: Vec<KeepRecordGroup>,
}

/// One group of logs (Keep groups by period).
#[derive(Debug, Clone, Deserialize)]
pub struct KeepRecordGroup {
    #[serde(default)]
    pub logs: Vec<KeepLog>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KeepLog {
    pub stats: Option<KeepStats>,
}

/// Per-workout stats as Keep reports them.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeepStats {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    #[serde(default)]
    pub done_date: String,
    /// Seconds; usually an integer but Keep sometimes sends a float
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub km_distance: f64,
    pub calorie: Option<f64>,
    pub heart_rate: Option<serde_json::Value>,
    pub vendor: Option<KeepVendor>,
    pub name: Option<String>,
    pub name_suffix: Option<String>,
    #[serde(default)]
    pub geo_points: Vec<KeepGeoPoint>,
    pub track_water_mark: Option<String>,
}

fn default_kind() -> String {
    "unknown".to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeepVendor {
    pub source: Option<String>,
    pub device_model: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct KeepGeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<KeepStats> for WorkoutRecord {
    fn from(stats: KeepStats) -> Self {
        let vendor = stats
            .vendor
            .map(|v| {
                let defaults = Vendor::default();
                Vendor {
                    source: v.source.unwrap_or(defaults.source),
                    device_model: v.device_model.unwrap_or(defaults.device_model),
                }
            })
            .unwrap_or_default();

        Self {
            id: stats.id,
            kind: ActivityKind::from(stats.kind),
            done_date: stats.done_date,
            duration_secs: stats.duration,
            distance_km: stats.km_distance,
            calorie: stats.calorie,
            heart_rate: stats.heart_rate,
            vendor,
            name: stats.name.unwrap_or_else(|| "未命名".to_string()),
            name_suffix: stats.name_suffix.unwrap_or_default(),
            geo_points: stats
                .geo_points
                .into_iter()
                .map(|p| GeoPoint {
                    latitude: p.latitude,
                    longitude: p.longitude,
                })
                .collect(),
            track_image_url: stats.track_water_mark.filter(|u| !u.is_empty()),
        }
    }
}

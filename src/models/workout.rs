// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Keep workout model, normalized from the stats API.

use crate::time_utils::parse_calendar_date;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One completed workout, valid for the duration of a sync run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    /// Keep workout ID (unique within the account)
    pub id: String,
    /// Activity kind (running, cycling, ...)
    pub kind: ActivityKind,
    /// Completion date as reported by Keep (ISO form)
    pub done_date: String,
    /// Duration in seconds
    pub duration_secs: f64,
    /// Distance in kilometers
    pub distance_km: f64,
    /// Calories burned, if recorded
    pub calorie: Option<f64>,
    /// Raw `heartRate` value; only an object carries a usable average
    pub heart_rate: Option<serde_json::Value>,
    /// Recording source and device
    pub vendor: Vendor,
    /// Workout name (e.g. "户外跑步")
    pub name: String,
    /// Name suffix (e.g. "第 12 次")
    pub name_suffix: String,
    /// GPS path in recording order
    pub geo_points: Vec<GeoPoint>,
    /// Keep-rendered track image, if any
    pub track_image_url: Option<String>,
}

impl WorkoutRecord {
    /// Calendar date of completion, if the provider date is parseable.
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        parse_calendar_date(&self.done_date)
    }

    /// Average heart rate from the nested `heartRate` object, or 0.
    pub fn average_heart_rate(&self) -> f64 {
        self.heart_rate
            .as_ref()
            .and_then(|hr| hr.as_object())
            .and_then(|hr| hr.get("averageHeartRate"))
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0)
    }
}

/// Recording source, e.g. "Keep" + "Apple Watch Series 9".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vendor {
    pub source: String,
    pub device_model: String,
}

impl Default for Vendor {
    fn default() -> Self {
        Self {
            source: "Keep".to_string(),
            device_model: String::new(),
        }
    }
}

impl Vendor {
    /// Display string: source and device model, trimmed.
    pub fn display(&self) -> String {
        format!("{} {}", self.source, self.device_model)
            .trim()
            .to_string()
    }
}

/// A single GPS fix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Activity kind as reported by Keep's `type` field.
///
/// The set is open-ended; anything unrecognized is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActivityKind {
    Running,
    Walking,
    Cycling,
    Swimming,
    Hiking,
    Other(String),
}

/// Icon for kinds without their own entry.
pub const DEFAULT_EMOJI: &str = "🏋️";

impl ActivityKind {
    /// Keep's wire name for this kind.
    pub fn as_str(&self) -> &str {
        match self {
            ActivityKind::Running => "running",
            ActivityKind::Walking => "walking",
            ActivityKind::Cycling => "cycling",
            ActivityKind::Swimming => "swimming",
            ActivityKind::Hiking => "hiking",
            ActivityKind::Other(s) => s,
        }
    }

    /// Title icon for this kind.
    pub fn emoji(&self) -> &'static str {
        match self {
            ActivityKind::Running => "🏃‍♂️",
            ActivityKind::Walking => "🚶",
            ActivityKind::Cycling => "🚴",
            ActivityKind::Swimming => "🏊",
            ActivityKind::Hiking => "🥾",
            ActivityKind::Other(_) => DEFAULT_EMOJI,
        }
    }
}

impl From<String> for ActivityKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "running" => ActivityKind::Running,
            "walking" => ActivityKind::Walking,
            "cycling" => ActivityKind::Cycling,
            "swimming" => ActivityKind::Swimming,
            "hiking" => ActivityKind::Hiking,
            _ => ActivityKind::Other(s),
        }
    }
}

impl From<&str> for ActivityKind {
    fn from(s: &str) -> Self {
        ActivityKind::from(s.to_string())
    }
}

impl From<ActivityKind> for String {
    fn from(kind: ActivityKind) -> Self {
        kind.as_str().to_string()
    }
}

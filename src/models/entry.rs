// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Enriched records and their Notion page representation.

use crate::models::WorkoutRecord;
use serde::Serialize;
use std::collections::BTreeMap;

/// Property names in the destination Notion database.
pub mod properties {
    pub const TITLE: &str = "名称";
    pub const DATE: &str = "日期";
    pub const DURATION: &str = "时长";
    pub const DISTANCE: &str = "距离";
    pub const CALORIE: &str = "卡路里";
    /// Holds the Keep workout ID (the column name predates that use)
    pub const WORKOUT_ID: &str = "类型";
    pub const PACE: &str = "平均配速";
    pub const HEART_RATE: &str = "平均心率";
    pub const WEATHER: &str = "天气";
    pub const TRACK: &str = "轨迹图";
    pub const SOURCE: &str = "数据来源";
}

/// A workout plus everything derived for it before writing.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedRecord {
    pub record: WorkoutRecord,
    /// Seconds per kilometer, 0 when the distance is 0
    pub pace_secs_per_km: u64,
    /// Weather summary (may be the fallback string)
    pub weather: String,
    /// Rendered static map URL, empty when no map is available
    pub map_url: String,
}

impl EnrichedRecord {
    pub fn new(record: WorkoutRecord, weather: String, map_url: String) -> Self {
        let pace_secs_per_km = pace_secs_per_km(record.duration_secs, record.distance_km);
        Self {
            record,
            pace_secs_per_km,
            weather,
            map_url,
        }
    }

    /// URL for the track field: the rendered map, else Keep's own image.
    pub fn track_url(&self) -> Option<&str> {
        if !self.map_url.is_empty() {
            return Some(&self.map_url);
        }
        self.record
            .track_image_url
            .as_deref()
            .filter(|url| !url.is_empty())
    }
}

/// Average pace in whole seconds per kilometer.
pub fn pace_secs_per_km(duration_secs: f64, distance_km: f64) -> u64 {
    if distance_km > 0.0 {
        (duration_secs / distance_km).floor() as u64
    } else {
        0
    }
}

/// Page properties keyed by column name, in a stable order.
pub type PageProperties = BTreeMap<String, PropertyValue>;

/// A Notion property value, serialized in Notion's wire shape
/// (e.g. `{"number": 300}` or `{"rich_text": [...]}`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyValue {
    Title(Vec<RichText>),
    Date(DateValue),
    Number(Option<f64>),
    RichText(Vec<RichText>),
    Files(Vec<FileRef>),
}

impl PropertyValue {
    /// Single-segment title.
    pub fn title(content: impl Into<String>) -> Self {
        PropertyValue::Title(vec![RichText::plain(content)])
    }

    /// Single-segment rich text, even when `content` is empty.
    pub fn text(content: impl Into<String>) -> Self {
        PropertyValue::RichText(vec![RichText::plain(content)])
    }

    /// Single-segment rich text, or an empty list for empty content.
    pub fn text_or_empty(content: impl Into<String>) -> Self {
        let content = content.into();
        if content.is_empty() {
            PropertyValue::RichText(Vec::new())
        } else {
            PropertyValue::text(content)
        }
    }

    pub fn number(value: impl Into<f64>) -> Self {
        PropertyValue::Number(Some(value.into()))
    }

    /// Plain text of a title or rich text value.
    pub fn plain_text(&self) -> Option<String> {
        match self {
            PropertyValue::Title(parts) | PropertyValue::RichText(parts) => Some(
                parts
                    .iter()
                    .map(|p| p.text.content.as_str())
                    .collect::<String>(),
            ),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            PropertyValue::Number(n) => *n,
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RichText {
    pub text: TextContent,
}

impl RichText {
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            text: TextContent {
                content: content.into(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextContent {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateValue {
    pub start: String,
}

/// Externally hosted file attached to a files property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRef {
    pub name: String,
    pub external: ExternalUrl,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExternalUrl {
    pub url: String,
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Maps enriched workouts onto the Notion database schema.

use crate::models::entry::{properties, DateValue, ExternalUrl, FileRef};
use crate::models::{EnrichedRecord, PageProperties, PropertyValue, WorkoutRecord};

/// File name shown for the attached track image.
const TRACK_FILE_NAME: &str = "track.jpg";

/// Enrich `record` and map it to page properties.
pub fn map(record: &WorkoutRecord, weather: &str, map_url: &str) -> PageProperties {
    let enriched = EnrichedRecord::new(record.clone(), weather.to_string(), map_url.to_string());
    map_record(&enriched)
}

/// Page title: kind icon, name and suffix.
pub fn build_title(record: &WorkoutRecord) -> String {
    format!(
        "{} {} {}",
        record.kind.emoji(),
        record.name,
        record.name_suffix
    )
}

/// Map an enriched record to Notion page properties.
pub fn map_record(enriched: &EnrichedRecord) -> PageProperties {
    let record = &enriched.record;
    let mut props = PageProperties::new();

    props.insert(
        properties::TITLE.to_string(),
        PropertyValue::title(build_title(record)),
    );
    props.insert(
        properties::DATE.to_string(),
        PropertyValue::Date(DateValue {
            start: record.done_date.clone(),
        }),
    );
    props.insert(
        properties::DURATION.to_string(),
        PropertyValue::number(record.duration_secs),
    );
    props.insert(
        properties::DISTANCE.to_string(),
        PropertyValue::number(record.distance_km),
    );
    props.insert(
        properties::CALORIE.to_string(),
        PropertyValue::Number(record.calorie),
    );
    props.insert(
        properties::WORKOUT_ID.to_string(),
        PropertyValue::text(record.id.as_str()),
    );
    props.insert(
        properties::PACE.to_string(),
        PropertyValue::number(enriched.pace_secs_per_km as f64),
    );
    props.insert(
        properties::HEART_RATE.to_string(),
        PropertyValue::number(record.average_heart_rate()),
    );
    props.insert(
        properties::WEATHER.to_string(),
        PropertyValue::text_or_empty(enriched.weather.as_str()),
    );

    let track = enriched
        .track_url()
        .map(|url| {
            vec![FileRef {
                name: TRACK_FILE_NAME.to_string(),
                external: ExternalUrl {
                    url: url.to_string(),
                },
            }]
        })
        .unwrap_or_default();
    props.insert(properties::TRACK.to_string(), PropertyValue::Files(track));

    props.insert(
        properties::SOURCE.to_string(),
        PropertyValue::text(record.vendor.display()),
    );

    props
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityKind, Vendor};
    use serde_json::json;

    fn sample() -> WorkoutRecord {
        WorkoutRecord {
            id: "5f1a_run".to_string(),
            kind: ActivityKind::Running,
            done_date: "2025-05-04".to_string(),
            duration_secs: 1500.0,
            distance_km: 5.0,
            calorie: Some(320.0),
            heart_rate: Some(json!({"averageHeartRate": 152, "maxHeartRate": 178})),
            vendor: Vendor {
                source: "Keep".to_string(),
                device_model: "Keep Watch".to_string(),
            },
            name: "户外跑步".to_string(),
            name_suffix: "第 3 次".to_string(),
            geo_points: Vec::new(),
            track_image_url: Some("https://static.keep.com/track.jpg".to_string()),
        }
    }

    fn number(props: &PageProperties, key: &str) -> Option<f64> {
        props[key].as_number()
    }

    #[test]
    fn test_field_derivation() {
        let props = map(&sample(), "晴 ~ 21°C", "");

        assert_eq!(props.len(), 11);
        assert_eq!(
            props[properties::TITLE].plain_text().as_deref(),
            Some("🏃‍♂️ 户外跑步 第 3 次")
        );
        assert_eq!(number(&props, properties::PACE), Some(300.0));
        assert_eq!(number(&props, properties::DURATION), Some(1500.0));
        assert_eq!(number(&props, properties::DISTANCE), Some(5.0));
        assert_eq!(number(&props, properties::CALORIE), Some(320.0));
        assert_eq!(number(&props, properties::HEART_RATE), Some(152.0));
        assert_eq!(
            props[properties::WORKOUT_ID].plain_text().as_deref(),
            Some("5f1a_run")
        );
        assert_eq!(
            props[properties::SOURCE].plain_text().as_deref(),
            Some("Keep Keep Watch")
        );
        assert_eq!(
            props[properties::WEATHER].plain_text().as_deref(),
            Some("晴 ~ 21°C")
        );
        assert_eq!(
            props[properties::DATE],
            PropertyValue::Date(DateValue {
                start: "2025-05-04".to_string()
            })
        );
    }

    #[test]
    fn test_zero_distance_pace() {
        let mut record = sample();
        record.distance_km = 0.0;
        let props = map(&record, "", "");
        assert_eq!(number(&props, properties::PACE), Some(0.0));
    }

    #[test]
    fn test_heart_rate_must_be_an_object() {
        let mut record = sample();
        record.heart_rate = Some(json!(140));
        assert_eq!(
            number(&map(&record, "", ""), properties::HEART_RATE),
            Some(0.0)
        );

        record.heart_rate = None;
        assert_eq!(
            number(&map(&record, "", ""), properties::HEART_RATE),
            Some(0.0)
        );

        record.heart_rate = Some(json!({"maxHeartRate": 170}));
        assert_eq!(
            number(&map(&record, "", ""), properties::HEART_RATE),
            Some(0.0)
        );
    }

    #[test]
    fn test_unknown_kind_title() {
        let mut record = sample();
        record.kind = ActivityKind::from("rowing");
        record.name_suffix = String::new();
        let props = map(&record, "", "");
        assert_eq!(
            props[properties::TITLE].plain_text().as_deref(),
            Some("🏋️ 户外跑步 ")
        );
    }

    #[test]
    fn test_empty_enrichment_serializes_as_empty_lists() {
        let mut record = sample();
        record.track_image_url = None;
        record.calorie = None;
        let value = serde_json::to_value(map(&record, "", "")).unwrap();

        assert_eq!(value[properties::WEATHER], json!({"rich_text": []}));
        assert_eq!(value[properties::TRACK], json!({"files": []}));
        assert_eq!(value[properties::CALORIE], json!({"number": null}));
    }

    #[test]
    fn test_id_and_source_always_have_a_segment() {
        let mut record = sample();
        record.id = String::new();
        record.vendor = Vendor {
            source: String::new(),
            device_model: String::new(),
        };
        let value = serde_json::to_value(map(&record, "", "")).unwrap();

        assert_eq!(
            value[properties::WORKOUT_ID],
            json!({"rich_text": [{"text": {"content": ""}}]})
        );
        assert_eq!(
            value[properties::SOURCE],
            json!({"rich_text": [{"text": {"content": ""}}]})
        );
    }

    #[test]
    fn test_fractional_duration() {
        let mut record = sample();
        record.duration_secs = 1502.9;
        let props = map(&record, "", "");
        assert_eq!(number(&props, properties::DURATION), Some(1502.9));
        assert_eq!(number(&props, properties::PACE), Some(300.0));
    }

    #[test]
    fn test_rendered_map_wins_over_keep_track() {
        let props = map(&sample(), "", "https://api.mapbox.com/static/x");
        assert_eq!(
            props[properties::TRACK],
            PropertyValue::Files(vec![FileRef {
                name: "track.jpg".to_string(),
                external: ExternalUrl {
                    url: "https://api.mapbox.com/static/x".to_string()
                },
            }])
        );

        let props = map(&sample(), "", "");
        let value = serde_json::to_value(&props[properties::TRACK]).unwrap();
        assert_eq!(
            value["files"][0]["external"]["url"],
            "https://static.keep.com/track.jpg"
        );
    }

    #[test]
    fn test_mapping_is_deterministic() {
        let record = sample();
        let a = serde_json::to_string(&map(&record, "多云 ~ 18°C", "u")).unwrap();
        let b = serde_json::to_string(&map(&record, "多云 ~ 18°C", "u")).unwrap();
        assert_eq!(a, b);
    }
}

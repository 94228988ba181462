// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use keep_notion_sync::services::{
    Credentials, KeepClient, MapRenderer, NotionClient, SyncDriver, SyncOptions, WeatherLocation,
    WeatherService,
};
use serde_json::{json, Value};
use std::fs;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[allow(dead_code)]
pub const DATABASE_ID: &str = "test-database-id";
#[allow(dead_code)]
pub const KEEP_TOKEN: &str = "keep_test_token";
#[allow(dead_code)]
pub const LOCATION_CODE: &str = "101250404";

/// Load the recorded Keep stats payload.
#[allow(dead_code)]
pub fn keep_stats_fixture() -> Value {
    let json = fs::read_to_string("tests/fixtures/keep_stats_detail.json")
        .expect("Failed to read fixture");
    serde_json::from_str(&json).expect("Failed to parse fixture")
}

/// Wrap stats objects in Keep's grouped response shape.
#[allow(dead_code)]
pub fn stats_payload(stats: Vec<Value>) -> Value {
    let logs: Vec<Value> = stats.into_iter().map(|s| json!({ "stats": s })).collect();
    json!({ "data": { "records": [ { "logs": logs } ] } })
}

/// Minimal stats object for a workout.
#[allow(dead_code)]
pub fn stats(id: &str, kind: &str, done_date: &str, duration: u64, km: f64) -> Value {
    json!({
        "id": id,
        "type": kind,
        "name": "测试",
        "nameSuffix": "第 1 次",
        "doneDate": done_date,
        "duration": duration,
        "kmDistance": km,
        "calorie": 100,
        "heartRate": { "averageHeartRate": 140 },
        "vendor": { "source": "Keep", "deviceModel": "" }
    })
}

/// Mount Keep login and stats endpoints.
#[allow(dead_code)]
pub async fn mount_keep(server: &MockServer, payload: Value) {
    Mock::given(method("POST"))
        .and(path("/v1.1/users/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": { "token": KEEP_TOKEN } })),
        )
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/pd/v3/stats/detail"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload))
        .mount(server)
        .await;
}

/// Mount a working current-weather endpoint.
#[allow(dead_code)]
pub async fn mount_weather(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v7/weather/now"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": "200",
            "now": { "temp": "24", "text": "晴" }
        })))
        .mount(server)
        .await;
}

#[allow(dead_code)]
pub fn test_options() -> SyncOptions {
    SyncOptions {
        credentials: Credentials {
            mobile: "13800000000".to_string(),
            password: "test_password".to_string(),
        },
        weather_location: WeatherLocation::Code(LOCATION_CODE.to_string()),
        date_prefix: None,
    }
}

#[allow(dead_code)]
pub fn test_notion(server: &MockServer) -> NotionClient {
    NotionClient::with_base_url(
        "test_notion_token".to_string(),
        DATABASE_ID.to_string(),
        &server.uri(),
    )
}

/// Driver with every collaborator pointed at `server`.
#[allow(dead_code)]
pub fn test_driver(server: &MockServer, options: SyncOptions, maps: MapRenderer) -> SyncDriver {
    SyncDriver::new(
        KeepClient::with_base_url(&server.uri()),
        test_notion(server),
        WeatherService::with_base_urls(
            Some("test_weather_key".to_string()),
            &server.uri(),
            &server.uri(),
        ),
        maps,
        options,
    )
}

/// JSON bodies of requests received on `method_name path_str`.
#[allow(dead_code)]
pub async fn received_bodies(server: &MockServer, method_name: &str, path_str: &str) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.method.as_str() == method_name && r.url.path() == path_str)
        .map(|r| serde_json::from_slice(&r.body).expect("request body is JSON"))
        .collect()
}

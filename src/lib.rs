// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Keep-Notion sync: copy Keep workouts into a Notion database
//!
//! This crate fetches the workout history of a Keep account, enriches each
//! workout with weather and an optional track map, and creates one Notion
//! page per workout that is not already in the database.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod time_utils;

use anyhow::Context;
use config::Config;
use error::Result;
use services::{
    Credentials, KeepClient, MapRenderer, NotionClient, SyncDriver, SyncOptions, WeatherLocation,
    WeatherService,
};
use std::time::Duration;

/// Per-request timeout shared by every outbound client.
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the HTTP client shared by the Keep, Notion and weather clients.
pub fn http_client() -> Result<reqwest::Client> {
    let http = reqwest::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .user_agent(concat!("keep-notion-sync/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("failed building HTTP client")?;
    Ok(http)
}

/// Build a driver talking to the production endpoints.
pub fn driver_from_config(config: &Config) -> Result<SyncDriver> {
    let http = http_client()?;

    let options = SyncOptions {
        credentials: Credentials {
            mobile: config.keep_mobile.clone(),
            password: config.keep_password.clone(),
        },
        weather_location: WeatherLocation::parse(&config.weather_location),
        date_prefix: config.date_prefix.clone(),
    };

    Ok(SyncDriver::new(
        KeepClient::new(http.clone()),
        NotionClient::new(
            http.clone(),
            config.notion_token.clone(),
            config.notion_database_id.clone(),
        ),
        WeatherService::new(http, config.qweather_api_key.clone()),
        MapRenderer::new(config.mapbox_access_token.clone()),
        options,
    ))
}

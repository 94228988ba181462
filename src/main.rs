// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Keep-Notion sync
//!
//! One-shot sync of Keep workouts into a Notion database. Takes no
//! arguments; everything is configured through the environment.

use keep_notion_sync::config::Config;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Exits 0 once every fetched workout has been processed, even if some
/// records failed. Exits 1 on missing or invalid configuration, and also
/// when Keep login or fetch aborts the run before any record is processed.
#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::from_env();
    init_logging(config.as_ref().is_ok_and(|c| c.json_logs));

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        database = %config.notion_database_id,
        weather_location = %config.weather_location,
        maps = config.mapbox_access_token.is_some(),
        date_prefix = ?config.date_prefix,
        "Starting Keep → Notion sync"
    );

    let driver = match keep_notion_sync::driver_from_config(&config) {
        Ok(driver) => driver,
        Err(e) => {
            tracing::error!(error = %e, "Failed to set up clients");
            return ExitCode::FAILURE;
        }
    };

    match driver.run().await {
        Ok(report) => {
            tracing::info!(
                created = report.created,
                failed = report.failed,
                "All workouts processed"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Sync aborted");
            ExitCode::FAILURE
        }
    }
}

/// Initialize logging: compact console output, or flattened JSON lines.
fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("keep_notion_sync=debug,info"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .with_current_span(true)
                    .flatten_event(true),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().compact().with_target(false))
            .init();
    }
}

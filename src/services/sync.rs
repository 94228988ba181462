// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Sync driver.
//!
//! Handles the core workflow:
//! 1. Log in to Keep and fetch every workout
//! 2. Skip records already present in Notion
//! 3. Enrich with weather and an optional track map
//! 4. Map to page properties and create the page
//!
//! Login and fetch failures abort the run. Everything after that is isolated
//! per record: a failed record is logged and the next one is processed.

use crate::error::Result;
use crate::models::{EnrichedRecord, WorkoutRecord};
use crate::services::keep::{Credentials, KeepClient};
use crate::services::map::MapRenderer;
use crate::services::mapper::{build_title, map_record};
use crate::services::notion::{image_block, NotionClient};
use crate::services::weather::{WeatherLocation, WeatherService};
use std::collections::HashSet;

/// Per-run sync settings.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub credentials: Credentials,
    pub weather_location: WeatherLocation,
    /// Only records whose done date starts with this prefix are synced
    pub date_prefix: Option<String>,
}

/// Runs one full Keep → Notion sync.
pub struct SyncDriver {
    keep: KeepClient,
    notion: NotionClient,
    weather: WeatherService,
    maps: MapRenderer,
    options: SyncOptions,
}

impl SyncDriver {
    pub fn new(
        keep: KeepClient,
        notion: NotionClient,
        weather: WeatherService,
        maps: MapRenderer,
        options: SyncOptions,
    ) -> Self {
        Self {
            keep,
            notion,
            weather,
            maps,
            options,
        }
    }

    /// Fetch all workouts and sync each one.
    pub async fn run(&self) -> Result<SyncReport> {
        let token = self.keep.authenticate(&self.options.credentials).await?;
        tracing::info!("Logged in to Keep");

        let records = self.keep.fetch_records(&token).await?;
        tracing::info!(count = records.len(), "Fetched Keep workouts");

        let mut report = SyncReport {
            fetched: records.len(),
            ..SyncReport::default()
        };
        let mut created = HashSet::new();

        for record in &records {
            let outcome = self.process_record(record, &mut created).await;
            report.record(outcome);
        }

        tracing::info!(
            fetched = report.fetched,
            created = report.created,
            skipped = report.skipped,
            filtered = report.filtered,
            failed = report.failed,
            "Sync finished"
        );
        Ok(report)
    }

    /// Run one record through dedupe, enrichment and write.
    ///
    /// `created` holds the (date, ID) pairs written earlier in this run.
    pub async fn process_record(
        &self,
        record: &WorkoutRecord,
        created: &mut HashSet<(String, String)>,
    ) -> RecordOutcome {
        let date = record.done_date.as_str();
        let workout_id = record.id.as_str();

        if let Some(prefix) = &self.options.date_prefix {
            if !date.starts_with(prefix.as_str()) {
                tracing::debug!(date, workout_id, "Outside date filter");
                return RecordOutcome::Filtered;
            }
        }

        tracing::info!(
            date,
            workout_id,
            kind = record.kind.as_str(),
            km = record.distance_km,
            "Processing workout"
        );

        if record.calendar_date().is_none() {
            tracing::warn!(date, workout_id, "Done date is not an ISO date, Notion may reject it");
        }

        let key = (date.to_string(), workout_id.to_string());
        if created.contains(&key) {
            tracing::info!(date, workout_id, "Already synced in this run, skipping");
            return RecordOutcome::DuplicateSkip;
        }

        match self.notion.page_exists(date, workout_id).await {
            Ok(true) => {
                tracing::info!(date, workout_id, "Already in Notion, skipping");
                return RecordOutcome::DuplicateSkip;
            }
            Ok(false) => {}
            Err(e) => {
                // Without a definite answer, writing could create a duplicate
                tracing::error!(date, workout_id, error = %e, "Duplicate check failed");
                return RecordOutcome::Failed;
            }
        }

        let enriched = self.enrich(record).await;
        let title = build_title(record);
        let props = map_record(&enriched);

        let page = match self.notion.create_page(&props).await {
            Ok(page) => page,
            Err(e) => {
                tracing::error!(date, title = %title, error = %e, "Sync failed");
                return RecordOutcome::Failed;
            }
        };
        created.insert(key);

        if !enriched.map_url.is_empty() {
            if let Err(e) = self
                .notion
                .append_block(&page.id, &image_block(&enriched.map_url))
                .await
            {
                tracing::warn!(page_id = %page.id, error = %e, "Failed to attach track map");
            }
        }

        tracing::info!(date, title = %title, page_id = %page.id, "Synced");
        RecordOutcome::Created
    }

    /// Attach weather and, for outdoor kinds with a GPS path, a track map.
    async fn enrich(&self, record: &WorkoutRecord) -> EnrichedRecord {
        let weather = self.weather.lookup(&self.options.weather_location).await;

        let map_url = if self.maps.is_enabled() && MapRenderer::should_render(&record.kind) {
            self.maps.render_path(&record.geo_points)
        } else {
            String::new()
        };

        EnrichedRecord::new(record.clone(), weather, map_url)
    }
}

/// What happened to one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    Created,
    DuplicateSkip,
    Filtered,
    Failed,
}

/// Counts for a finished run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub fetched: usize,
    pub created: usize,
    pub skipped: usize,
    pub filtered: usize,
    pub failed: usize,
}

impl SyncReport {
    fn record(&mut self, outcome: RecordOutcome) {
        match outcome {
            RecordOutcome::Created => self.created += 1,
            RecordOutcome::DuplicateSkip => self.skipped += 1,
            RecordOutcome::Filtered => self.filtered += 1,
            RecordOutcome::Failed => self.failed += 1,
        }
    }
}

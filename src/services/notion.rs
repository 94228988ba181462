// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Notion API client for the destination database.
//!
//! Handles:
//! - Database queries (used for the duplicate check)
//! - Page creation under the configured database
//! - Appending blocks to a created page

use crate::error::SyncError;
use crate::models::entry::properties;
use crate::models::PageProperties;
use serde::Deserialize;
use serde_json::{json, Value};

const NOTION_API_BASE: &str = "https://api.notion.com/v1";
const NOTION_VERSION: &str = "2022-06-28";

/// Notion API client bound to one database.
#[derive(Clone)]
pub struct NotionClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
    database_id: String,
}

impl NotionClient {
    pub fn new(http: reqwest::Client, token: String, database_id: String) -> Self {
        Self {
            http,
            base_url: NOTION_API_BASE.to_string(),
            token,
            database_id,
        }
    }

    /// Client against a different host (used by tests).
    pub fn with_base_url(token: String, database_id: String, base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            database_id,
        }
    }

    /// Query the database with a Notion filter object.
    pub async fn query_database(&self, filter: &Value) -> Result<QueryResponse, SyncError> {
        let url = format!("{}/databases/{}/query", self.base_url, self.database_id);
        let body = json!({ "filter": filter });
        self.send_json(self.http.post(&url), &body).await
    }

    /// Whether a page for this (date, workout ID) pair already exists.
    pub async fn page_exists(&self, done_date: &str, workout_id: &str) -> Result<bool, SyncError> {
        let response = self
            .query_database(&duplicate_filter(done_date, workout_id))
            .await?;
        Ok(!response.results.is_empty())
    }

    /// Create a page in the database and return it.
    pub async fn create_page(&self, props: &PageProperties) -> Result<CreatedPage, SyncError> {
        let url = format!("{}/pages", self.base_url);
        let body = json!({
            "parent": { "database_id": self.database_id },
            "properties": props,
        });
        self.send_json(self.http.post(&url), &body).await
    }

    /// Append one block to the children of `page_id`.
    pub async fn append_block(&self, page_id: &str, block: &Value) -> Result<(), SyncError> {
        let url = format!("{}/blocks/{}/children", self.base_url, page_id);
        let body = json!({ "children": [block] });
        let _: Value = self.send_json(self.http.patch(&url), &body).await?;
        Ok(())
    }

    /// Send a JSON body with Notion auth headers and parse the JSON reply.
    async fn send_json<T: for<'de> Deserialize<'de>>(
        &self,
        request: reqwest::RequestBuilder,
        body: &Value,
    ) -> Result<T, SyncError> {
        let response = request
            .bearer_auth(&self.token)
            .header("Notion-Version", NOTION_VERSION)
            .json(body)
            .send()
            .await
            .map_err(|e| SyncError::Notion(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            if status.as_u16() == 429 {
                tracing::warn!("Notion rate limit hit (429)");
            }
            return Err(SyncError::Notion(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| SyncError::Notion(format!("JSON parse error: {}", e)))
    }
}

/// Filter matching pages with this exact date whose workout ID column
/// contains `workout_id`.
pub fn duplicate_filter(done_date: &str, workout_id: &str) -> Value {
    json!({
        "and": [
            { "property": properties::DATE, "date": { "equals": done_date } },
            { "property": properties::WORKOUT_ID, "rich_text": { "contains": workout_id } }
        ]
    })
}

/// External image block pointing at `url`.
pub fn image_block(url: &str) -> Value {
    json!({
        "object": "block",
        "type": "image",
        "image": {
            "type": "external",
            "external": { "url": url }
        }
    })
}

/// Database query response (only the fields we use).
#[derive(Debug, Clone, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub results: Vec<Value>,
}

/// Response to page creation.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedPage {
    pub id: String,
}

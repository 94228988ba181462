// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Pipeline error types.
//!
//! `Auth` and `Fetch` abort a run. `Notion` errors are scoped to the record
//! being processed. Weather and map failures never reach this type; those
//! services degrade to a fallback value on their own.

/// Sync pipeline error type.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("Keep authentication failed: {0}")]
    Auth(String),

    #[error("Keep fetch failed: {0}")]
    Fetch(String),

    #[error("Notion API error: {0}")]
    Notion(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl SyncError {
    /// Whether this error must abort the whole run rather than one record.
    pub fn is_fatal(&self) -> bool {
        matches!(self, SyncError::Auth(_) | SyncError::Fetch(_))
    }
}

/// Result type alias for the sync pipeline
pub type Result<T> = std::result::Result<T, SyncError>;

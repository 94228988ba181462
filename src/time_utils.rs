// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date parsing.

use chrono::{DateTime, NaiveDate};

/// Parse a provider date into a calendar date.
///
/// Keep reports `doneDate` either as a plain `YYYY-MM-DD` or as a full
/// RFC3339 timestamp; the calendar date is taken as written, without
/// converting time zones.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.date_naive())
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod entry;
pub mod workout;

pub use entry::{EnrichedRecord, PageProperties, PropertyValue};
pub use workout::{ActivityKind, GeoPoint, Vendor, WorkoutRecord};

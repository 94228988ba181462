// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - clients and the sync pipeline.

pub mod keep;
pub mod map;
pub mod mapper;
pub mod notion;
pub mod sync;
pub mod weather;

pub use keep::{Credentials, KeepClient};
pub use map::MapRenderer;
pub use notion::NotionClient;
pub use sync::{RecordOutcome, SyncDriver, SyncOptions, SyncReport};
pub use weather::{WeatherLocation, WeatherService, WEATHER_UNAVAILABLE};

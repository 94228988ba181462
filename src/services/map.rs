// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Static track maps via the Mapbox Static Images API.
//!
//! The path is drawn as an encoded-polyline overlay, so rendering is pure URL
//! construction: no request is made until Notion fetches the image.

use crate::models::{ActivityKind, GeoPoint};
use geo::Coord;

const MAPBOX_API_BASE: &str = "https://api.mapbox.com";
const DEFAULT_STYLE: &str = "mapbox/outdoors-v12";

/// Mapbox rejects request URLs longer than this.
const MAX_URL_LEN: usize = 8192;

/// Polyline precision used by the Mapbox path overlay.
const POLYLINE_PRECISION: u32 = 5;

/// Builds static map URLs for workout paths.
#[derive(Debug, Clone)]
pub struct MapRenderer {
    base_url: String,
    style: String,
    access_token: Option<String>,
}

impl MapRenderer {
    /// Renderer that is only active when `access_token` is set.
    pub fn new(access_token: Option<String>) -> Self {
        Self::with_base_url(access_token, MAPBOX_API_BASE)
    }

    pub fn with_base_url(access_token: Option<String>, base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            style: DEFAULT_STYLE.to_string(),
            access_token: access_token.filter(|t| !t.is_empty()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.access_token.is_some()
    }

    /// Whether paths of this kind get a map at all (outdoor locomotion only).
    pub fn should_render(kind: &ActivityKind) -> bool {
        matches!(
            kind,
            ActivityKind::Running
                | ActivityKind::Walking
                | ActivityKind::Cycling
                | ActivityKind::Hiking
        )
    }

    /// Static map URL for `path`, or an empty string when no map is available.
    pub fn render_path(&self, path: &[GeoPoint]) -> String {
        match self.try_render(path) {
            Ok(url) => url,
            Err(MapError::Disabled) | Err(MapError::EmptyPath) => String::new(),
            Err(e) => {
                tracing::warn!(error = %e, points = path.len(), "Map rendering failed");
                String::new()
            }
        }
    }

    fn try_render(&self, path: &[GeoPoint]) -> Result<String, MapError> {
        let token = self.access_token.as_deref().ok_or(MapError::Disabled)?;
        if path.is_empty() {
            return Err(MapError::EmptyPath);
        }

        let encoded = encode_path(path)?;
        let url = format!(
            "{}/styles/v1/{}/static/path-4+e34a2b-0.9({})/auto/800x500?access_token={}",
            self.base_url,
            self.style,
            urlencoding::encode(&encoded),
            urlencoding::encode(token),
        );

        if url.len() > MAX_URL_LEN {
            return Err(MapError::UrlTooLong(url.len()));
        }
        Ok(url)
    }
}

/// Encode a path as a polyline, keeping the recorded point order.
pub fn encode_path(path: &[GeoPoint]) -> Result<String, MapError> {
    let coords = path.iter().map(|p| Coord {
        x: p.longitude,
        y: p.latitude,
    });
    polyline::encode_coordinates(coords, POLYLINE_PRECISION)
        .map_err(|e| MapError::Encode(e.to_string()))
}

/// Map rendering errors. These never leave this module.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Map rendering disabled (no access token)")]
    Disabled,

    #[error("Path has no points")]
    EmptyPath,

    #[error("Failed to encode polyline: {0}")]
    Encode(String),

    #[error("Map URL too long ({0} bytes)")]
    UrlTooLong(usize),
}

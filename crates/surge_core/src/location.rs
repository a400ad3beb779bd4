//! User location model: best-effort coordinates with a fixed fallback.

use bevy_ecs::prelude::Resource;
use h3o::{CellIndex, LatLng, Resolution};
use serde::{Deserialize, Serialize};

/// Fallback coordinate used whenever no device location is available.
pub const DEFAULT_LAT: f64 = 39.7392;
pub const DEFAULT_LNG: f64 = -74.2236;
pub const DEFAULT_CITY: &str = "Manahawkin, NJ";

/// Why a location request did not produce a coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationError {
    PermissionDenied,
    Unavailable,
    Timeout,
    Unsupported,
}

impl LocationError {
    pub fn status_icon(&self) -> &'static str {
        match self {
            LocationError::Unsupported => "❌",
            _ => "⚠️",
        }
    }

    pub fn status_text(&self) -> String {
        match self {
            LocationError::PermissionDenied => {
                format!("Using default location ({DEFAULT_CITY})")
            }
            LocationError::Unavailable => {
                format!("Location unavailable - using {DEFAULT_CITY}")
            }
            LocationError::Timeout => format!("Location timeout - using {DEFAULT_CITY}"),
            LocationError::Unsupported => {
                format!("Geolocation not supported - using {DEFAULT_CITY}")
            }
        }
    }
}

/// Where the current coordinate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationStatus {
    Requesting,
    Device,
    Fallback(LocationError),
}

impl LocationStatus {
    pub fn icon(&self) -> &'static str {
        match self {
            LocationStatus::Requesting => "🔍",
            LocationStatus::Device => "📍",
            LocationStatus::Fallback(error) => error.status_icon(),
        }
    }

    pub fn text(&self) -> String {
        match self {
            LocationStatus::Requesting => "Requesting location access...".to_string(),
            LocationStatus::Device => "Your current location".to_string(),
            LocationStatus::Fallback(error) => error.status_text(),
        }
    }
}

/// Outcome of one geolocation attempt.
pub type LocationOutcome = Result<LatLng, LocationError>;

/// Current user location plus its H3 cell for zone derivation.
#[derive(Debug, Clone, Copy, Resource)]
pub struct UserLocation {
    pub position: LatLng,
    pub cell: CellIndex,
    pub status: LocationStatus,
}

impl UserLocation {
    pub fn set_position(&mut self, position: LatLng) {
        self.position = position;
        self.cell = position.to_cell(Resolution::Nine);
    }
}

impl Default for UserLocation {
    fn default() -> Self {
        let position = LatLng::new(DEFAULT_LAT, DEFAULT_LNG).expect("default coordinate is valid");
        Self {
            position,
            cell: position.to_cell(Resolution::Nine),
            status: LocationStatus::Requesting,
        }
    }
}

/// Planned geolocation resolution for a tracker run: what the
/// LocationResolved event delivers, and when.
#[derive(Debug, Clone, Copy, Resource)]
pub struct LocationPlan {
    pub outcome: LocationOutcome,
    pub resolve_after_ms: u64,
}

impl Default for LocationPlan {
    fn default() -> Self {
        // Headless runs have no device to ask.
        Self {
            outcome: Err(LocationError::Unsupported),
            resolve_after_ms: 1_000,
        }
    }
}

//! Best-effort coordinate lookup over HTTP.
//!
//! Compiled behind the `geolocate` feature. Transport failures map onto the
//! location error cases, so callers fall back to the default coordinate the
//! same way they do for a denied permission.

use std::time::Duration;

use h3o::LatLng;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::location::LocationError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct GeolocateResponse {
    lat: f64,
    #[serde(alias = "lon")]
    lng: f64,
}

/// Thin HTTP client for a JSON `{lat, lng}` geolocation endpoint.
#[derive(Debug, Clone)]
pub struct GeolocateClient {
    client: Client,
    endpoint: String,
}

impl GeolocateClient {
    /// Create a client for the given endpoint (e.g. `http://localhost:8053/json`).
    pub fn new(endpoint: &str) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build geolocation client");
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    /// Resolve the caller's coordinate.
    pub fn lookup(&self) -> Result<LatLng, LocationError> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .map_err(classify_transport_error)?;
        let parsed: GeolocateResponse = response.json().map_err(|_| LocationError::Unavailable)?;
        LatLng::new(parsed.lat, parsed.lng).map_err(|_| LocationError::Unavailable)
    }
}

fn classify_transport_error(error: reqwest::Error) -> LocationError {
    if error.is_timeout() {
        LocationError::Timeout
    } else {
        LocationError::Unavailable
    }
}

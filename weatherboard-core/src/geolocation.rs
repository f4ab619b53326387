//! Best-effort user location: platform coordinates, reverse geocoded to a
//! city/country pair. Every failure resolves to London, UK.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::{
    Config,
    error::LocationError,
    model::{Coordinates, UserLocation},
};

/// The platform's location capability.
#[async_trait]
pub trait LocationSource: Send + Sync {
    async fn current_position(&self) -> Result<Coordinates, LocationError>;
}

/// Coordinates supplied up front, e.g. from the command line.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Coordinates);

#[async_trait]
impl LocationSource for FixedLocation {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        Ok(self.0)
    }
}

/// No location capability on this platform.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocation;

#[async_trait]
impl LocationSource for NoLocation {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        Err(LocationError::Unavailable)
    }
}

#[derive(Debug, Deserialize)]
struct BigDataCloudResponse {
    #[serde(default)]
    city: Option<String>,
    #[serde(rename = "countryCode", default)]
    country_code: Option<String>,
}

/// BigDataCloud client-side reverse geocoding (no API key).
#[derive(Debug, Clone)]
pub struct ReverseGeocoder {
    base_url: Url,
    http: Client,
}

impl ReverseGeocoder {
    pub const DEFAULT_BASE_URL: &'static str =
        "https://api.bigdatacloud.net/data/reverse-geocode-client";

    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid reverse geocode endpoint URL: {base_url}"))?;

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for reverse geocoding")?;

        Ok(Self { base_url, http })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.endpoints.reverse_geocode, config.request_timeout())
    }

    /// Reverse geocode `coords`. `None` on any transport, status or parse failure.
    pub async fn reverse_geocode(&self, coords: Coordinates) -> Option<UserLocation> {
        let response = match self
            .http
            .get(self.base_url.clone())
            .query(&[
                ("latitude", coords.latitude.to_string()),
                ("longitude", coords.longitude.to_string()),
                ("localityLanguage", "en".to_string()),
            ])
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!(error = %e, "reverse geocode request failed");
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::debug!(
                status = response.status().as_u16(),
                "reverse geocode returned error status"
            );
            return None;
        }

        let body: BigDataCloudResponse = match response.json().await {
            Ok(b) => b,
            Err(e) => {
                tracing::debug!(error = %e, "reverse geocode parse error");
                return None;
            }
        };

        Some(location_from_response(body))
    }
}

fn location_from_response(body: BigDataCloudResponse) -> UserLocation {
    let non_empty = |s: Option<String>| s.filter(|v| !v.trim().is_empty());

    UserLocation::new(
        non_empty(body.city).unwrap_or_else(|| UserLocation::FALLBACK_CITY.to_string()),
        non_empty(body.country_code).unwrap_or_else(|| UserLocation::FALLBACK_COUNTRY.to_string()),
    )
}

/// Resolve the user's city. Never fails: any failure yields [`UserLocation::fallback`].
pub async fn resolve_user_location(
    source: &dyn LocationSource,
    geocoder: &ReverseGeocoder,
) -> UserLocation {
    let coords = match source.current_position().await {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!(error = %e, "location unavailable, using fallback");
            return UserLocation::fallback();
        }
    };

    match geocoder.reverse_geocode(coords).await {
        Some(location) => {
            tracing::info!(location = %location, "resolved user location");
            location
        }
        None => {
            tracing::warn!(
                latitude = coords.latitude,
                longitude = coords.longitude,
                "reverse geocoding failed, using fallback"
            );
            UserLocation::fallback()
        }
    }
}

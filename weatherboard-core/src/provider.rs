use crate::{Config, LookupError, WeatherSnapshot, provider::wttr::WttrProvider};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod wttr;

/// Source of current conditions for a named place.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// One outbound lookup for `place`; no caching, no retry.
    async fn fetch_weather(&self, place: &str) -> Result<WeatherSnapshot, LookupError>;
}

/// Construct the wttr.in provider from the configured endpoint and timeout.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let provider = WttrProvider::new(&config.endpoints.weather, config.request_timeout())?;
    Ok(Box::new(provider))
}

use std::time::Duration;

use crate::{
    error::LookupError,
    geolocation::{LocationSource, ReverseGeocoder, resolve_user_location},
    model::{CityRef, RankingResult, UserLocation, WeatherSnapshot},
    provider::WeatherProvider,
    rankings::compute_top_cities,
};

/// Everything the dashboard page shows on load.
#[derive(Debug)]
pub struct Dashboard {
    pub location: UserLocation,
    pub current: Result<WeatherSnapshot, LookupError>,
    pub rankings: RankingResult,
}

/// Resolve the user's city and its weather while the rankings load alongside.
pub async fn load_dashboard(
    provider: &dyn WeatherProvider,
    source: &dyn LocationSource,
    geocoder: &ReverseGeocoder,
    roster: &[CityRef],
    lookup_timeout: Duration,
) -> Dashboard {
    let local = async {
        let location = resolve_user_location(source, geocoder).await;
        let current = provider.fetch_weather(&location.city).await;
        (location, current)
    };

    let ((location, current), rankings) =
        tokio::join!(local, compute_top_cities(provider, roster, lookup_timeout));

    if let Err(e) = &current {
        tracing::warn!(city = %location.city, error = %e, "current weather unavailable");
    }

    Dashboard {
        location,
        current,
        rankings,
    }
}

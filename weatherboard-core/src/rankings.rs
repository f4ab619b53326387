//! Hottest / most-humid rankings over the fixed city roster.

use std::{future::Future, time::Duration};

use futures::future::join_all;

use crate::{
    error::LookupError,
    model::{CityRef, RankingResult, WeatherSnapshot},
    provider::WeatherProvider,
};

/// Length of each ranking list.
pub const TOP_N: usize = 10;

const ROSTER: [(&str, &str); 15] = [
    ("New York", "US"),
    ("London", "UK"),
    ("Paris", "FR"),
    ("Tokyo", "JP"),
    ("Sydney", "AU"),
    ("Rio de Janeiro", "BR"),
    ("Cairo", "EG"),
    ("Mumbai", "IN"),
    ("Beijing", "CN"),
    ("Moscow", "RU"),
    ("Dubai", "AE"),
    ("Singapore", "SG"),
    ("Los Angeles", "US"),
    ("Berlin", "DE"),
    ("Toronto", "CA"),
];

/// The 15 major cities rankings are drawn from, in roster order.
pub fn default_roster() -> Vec<CityRef> {
    ROSTER
        .iter()
        .map(|(name, country)| CityRef::new(*name, *country))
        .collect()
}

/// Poll every future to completion and return each outcome in input order.
///
/// A failing future never cancels the others.
pub async fn join_all_settled<I, F, T, E>(tasks: I) -> Vec<Result<T, E>>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T, E>>,
{
    join_all(tasks).await
}

/// Fetch weather for every roster entry concurrently and rank the results.
///
/// Never fails: entries whose lookup fails (or outlives `lookup_timeout`) are
/// dropped from both lists.
pub async fn compute_top_cities(
    provider: &dyn WeatherProvider,
    roster: &[CityRef],
    lookup_timeout: Duration,
) -> RankingResult {
    let outcomes = join_all_settled(
        roster
            .iter()
            .map(|city| lookup_with_timeout(provider, &city.name, lookup_timeout)),
    )
    .await;

    let cities: Vec<CityRef> = roster
        .iter()
        .zip(outcomes)
        .map(|(city, outcome)| match outcome {
            Ok(snapshot) => city.with_readings(&snapshot),
            Err(e) => {
                tracing::warn!(city = %city.name, error = %e, "dropping city from rankings");
                CityRef::new(city.name.clone(), city.country.clone())
            }
        })
        .collect();

    let result = rank_cities(cities);
    tracing::info!(
        roster = roster.len(),
        ranked = result.top_by_temperature.len(),
        "computed city rankings"
    );
    result
}

async fn lookup_with_timeout(
    provider: &dyn WeatherProvider,
    place: &str,
    after: Duration,
) -> Result<WeatherSnapshot, LookupError> {
    tokio::time::timeout(after, provider.fetch_weather(place))
        .await
        .unwrap_or_else(|_| {
            Err(LookupError::Timeout {
                place: place.to_string(),
                after,
            })
        })
}

/// Keep entries carrying both readings and take the top [`TOP_N`] by each.
///
/// Sorting is stable, so ties keep their input order.
pub fn rank_cities(cities: Vec<CityRef>) -> RankingResult {
    let ranked: Vec<CityRef> = cities
        .into_iter()
        .filter(CityRef::is_ranked)
        .collect();

    let mut by_temperature = ranked.clone();
    by_temperature.sort_by(|a, b| b.temperature_c.cmp(&a.temperature_c));
    by_temperature.truncate(TOP_N);

    let mut by_humidity = ranked;
    by_humidity.sort_by(|a, b| b.humidity_pct.cmp(&a.humidity_pct));
    by_humidity.truncate(TOP_N);

    RankingResult {
        top_by_temperature: by_temperature,
        top_by_humidity: by_humidity,
    }
}

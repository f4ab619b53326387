use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::Value;

use crate::{
    error::{LookupError, truncate_body},
    model::WeatherSnapshot,
};

use super::WeatherProvider;

const UNKNOWN: &str = "Unknown";

/// wttr.in client: `GET {base}/{place}?format=j1`.
#[derive(Debug, Clone)]
pub struct WttrProvider {
    base_url: Url,
    http: Client,
}

impl WttrProvider {
    pub const DEFAULT_BASE_URL: &'static str = "https://wttr.in";

    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid weather endpoint URL: {base_url}"))?;

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for wttr.in")?;

        Ok(Self { base_url, http })
    }

    fn weather_url(&self, place: &str) -> Result<Url, LookupError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| LookupError::InvalidUrl {
                place: place.to_string(),
            })?
            .pop_if_empty()
            .push(place);
        url.query_pairs_mut().append_pair("format", "j1");
        Ok(url)
    }
}

#[async_trait]
impl WeatherProvider for WttrProvider {
    async fn fetch_weather(&self, place: &str) -> Result<WeatherSnapshot, LookupError> {
        let place = place.trim();
        if place.is_empty() {
            return Err(LookupError::EmptyPlace);
        }

        let url = self.weather_url(place)?;
        tracing::debug!(place = %place, url = %url, "requesting current weather");

        let res = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| LookupError::Request {
                place: place.to_string(),
                source,
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|source| LookupError::Request {
            place: place.to_string(),
            source,
        })?;

        if !status.is_success() {
            return Err(LookupError::Status {
                place: place.to_string(),
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        parse_snapshot(&body).map_err(|source| LookupError::Parse {
            place: place.to_string(),
            source,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
struct WttrResponse {
    #[serde(default)]
    current_condition: Vec<WttrCurrent>,
    #[serde(default)]
    nearest_area: Vec<WttrArea>,
}

#[derive(Debug, Default, Deserialize)]
struct WttrCurrent {
    #[serde(rename = "temp_C", default)]
    temp_c: Option<Value>,
    #[serde(default)]
    humidity: Option<Value>,
    #[serde(rename = "windspeedKmph", default)]
    windspeed_kmph: Option<Value>,
    #[serde(rename = "precipMM", default)]
    precip_mm: Option<Value>,
    #[serde(rename = "weatherDesc", default)]
    weather_desc: Vec<WttrText>,
    #[serde(rename = "weatherIconUrl", default)]
    weather_icon_url: Vec<WttrText>,
}

#[derive(Debug, Deserialize)]
struct WttrArea {
    #[serde(rename = "areaName", default)]
    area_name: Vec<WttrText>,
}

#[derive(Debug, Deserialize)]
struct WttrText {
    #[serde(default)]
    value: Option<String>,
}

/// Parse a `format=j1` body. Missing fields degrade to zero / "Unknown".
pub(crate) fn parse_snapshot(body: &str) -> Result<WeatherSnapshot, serde_json::Error> {
    let parsed: WttrResponse = serde_json::from_str(body)?;
    let current = parsed
        .current_condition
        .into_iter()
        .next()
        .unwrap_or_default();

    let location = parsed
        .nearest_area
        .into_iter()
        .next()
        .and_then(|area| first_text(area.area_name))
        .unwrap_or_else(|| UNKNOWN.to_string());

    Ok(WeatherSnapshot {
        location,
        temperature_c: current.temp_c.as_ref().and_then(int_value).unwrap_or(0),
        humidity_pct: current.humidity.as_ref().and_then(int_value).unwrap_or(0),
        wind_speed_kmh: current
            .windspeed_kmph
            .as_ref()
            .and_then(int_value)
            .unwrap_or(0),
        precipitation_mm: current
            .precip_mm
            .as_ref()
            .and_then(float_value)
            .unwrap_or(0.0),
        condition: first_text(current.weather_desc).unwrap_or_else(|| UNKNOWN.to_string()),
        icon_url: first_text(current.weather_icon_url).unwrap_or_default(),
    })
}

fn first_text(values: Vec<WttrText>) -> Option<String> {
    values
        .into_iter()
        .next()
        .and_then(|v| v.value)
        .filter(|s| !s.is_empty())
}

fn int_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => parse_int_prefix(s),
        _ => None,
    }
}

fn float_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_float_prefix(s),
        _ => None,
    }
}

/// Leading integer of `s`, so "12.7" reads as 12 and "7 km" as 7.
fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let sign_len = usize::from(s.starts_with(['+', '-']));
    let digits = s[sign_len..].bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    s[..sign_len + digits].parse().ok()
}

/// Leading decimal of `s`, e.g. "0.3mm" reads as 0.3.
fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = usize::from(s.starts_with(['+', '-']));
    let mut digits = 0;

    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        digits += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        let mut frac = end + 1;
        while frac < bytes.len() && bytes[frac].is_ascii_digit() {
            frac += 1;
            digits += 1;
        }
        if frac > end + 1 || digits > 0 {
            end = frac;
        }
    }

    if digits == 0 {
        return None;
    }
    s[..end].trim_end_matches('.').parse().ok()
}

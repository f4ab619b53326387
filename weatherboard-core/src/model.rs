use serde::{Deserialize, Serialize};

/// Current conditions for one place, normalized from the provider payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location: String,
    pub temperature_c: i64,
    pub humidity_pct: i64,
    pub wind_speed_kmh: i64,
    pub precipitation_mm: f64,
    pub condition: String,
    pub icon_url: String,
}

/// A roster city, optionally carrying the readings from one aggregation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityRef {
    pub name: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature_c: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity_pct: Option<i64>,
}

impl CityRef {
    /// Base roster entry with no readings attached.
    pub fn new(name: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
            temperature_c: None,
            humidity_pct: None,
        }
    }

    /// Copy of this entry with the readings from `snapshot` attached.
    pub fn with_readings(&self, snapshot: &WeatherSnapshot) -> Self {
        Self {
            temperature_c: Some(snapshot.temperature_c),
            humidity_pct: Some(snapshot.humidity_pct),
            ..self.clone()
        }
    }

    pub fn is_ranked(&self) -> bool {
        self.temperature_c.is_some() && self.humidity_pct.is_some()
    }
}

/// The two top-N views produced by one aggregation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingResult {
    pub top_by_temperature: Vec<CityRef>,
    pub top_by_humidity: Vec<CityRef>,
}

impl RankingResult {
    pub fn is_empty(&self) -> bool {
        self.top_by_temperature.is_empty() && self.top_by_humidity.is_empty()
    }
}

/// Device position as reported by the platform location capability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Best-effort city/country for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserLocation {
    pub city: String,
    pub country: String,
}

impl UserLocation {
    pub const FALLBACK_CITY: &'static str = "London";
    pub const FALLBACK_COUNTRY: &'static str = "UK";

    pub fn new(city: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            country: country.into(),
        }
    }

    /// London, UK: used whenever the location cannot be determined.
    pub fn fallback() -> Self {
        Self::new(Self::FALLBACK_CITY, Self::FALLBACK_COUNTRY)
    }
}

impl std::fmt::Display for UserLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.city, self.country)
    }
}

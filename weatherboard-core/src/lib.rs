//! Core library for the `weatherboard` dashboard.
//!
//! This crate defines:
//! - Current-weather lookup against wttr.in
//! - Best-effort user geolocation with a fixed fallback
//! - Hottest / most-humid rankings over a fixed city roster
//! - Configuration handling
//!
//! It is used by `weatherboard-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod geolocation;
pub mod model;
pub mod provider;
pub mod rankings;

pub use config::{Config, Endpoints};
pub use dashboard::{Dashboard, load_dashboard};
pub use error::{LocationError, LookupError};
pub use geolocation::{
    FixedLocation, LocationSource, NoLocation, ReverseGeocoder, resolve_user_location,
};
pub use model::{CityRef, Coordinates, RankingResult, UserLocation, WeatherSnapshot};
pub use provider::{WeatherProvider, provider_from_config, wttr::WttrProvider};
pub use rankings::{TOP_N, compute_top_cities, default_roster, join_all_settled, rank_cities};

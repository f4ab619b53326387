use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use inquire::{CustomType, CustomUserError, Text, validator::Validation};
use weatherboard_core::{
    Config, Coordinates, FixedLocation, LocationSource, NoLocation, ReverseGeocoder,
    WeatherProvider, compute_top_cities, default_roster, load_dashboard, provider_from_config,
    resolve_user_location,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherboard", version, about = "Current weather and city rankings")]
pub struct Cli {
    /// Print JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Device coordinates; without them the location capability counts as absent.
#[derive(Debug, Clone, Copy, Args)]
pub struct PositionArgs {
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<f64>,
}

impl PositionArgs {
    fn source(self) -> Box<dyn LocationSource> {
        match (self.lat, self.lon) {
            (Some(latitude), Some(longitude)) => {
                Box::new(FixedLocation(Coordinates::new(latitude, longitude)))
            }
            _ => Box::new(NoLocation),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the home city and request timeout.
    Configure,

    /// Show current weather for a place.
    Show {
        /// City name; defaults to the home city, then to the detected location.
        place: Option<String>,

        #[command(flatten)]
        position: PositionArgs,
    },

    /// Print the detected city and country.
    Locate {
        #[command(flatten)]
        position: PositionArgs,
    },

    /// Show the hottest and most humid major cities.
    Top,

    /// Detected location, its weather and both rankings.
    Dashboard {
        #[command(flatten)]
        position: PositionArgs,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let config = Config::load()?;

        match self.command {
            Command::Configure => configure(config),
            Command::Show { place, position } => show(&config, place, position, self.json).await,
            Command::Locate { position } => {
                let geocoder = ReverseGeocoder::from_config(&config)?;
                let location = resolve_user_location(position.source().as_ref(), &geocoder).await;
                render::location(&location, self.json)
            }
            Command::Top => {
                let provider = provider_from_config(&config)?;
                let rankings = compute_top_cities(
                    provider.as_ref(),
                    &default_roster(),
                    config.request_timeout(),
                )
                .await;
                render::rankings(&rankings, self.json)
            }
            Command::Dashboard { position } => {
                let provider = provider_from_config(&config)?;
                let geocoder = ReverseGeocoder::from_config(&config)?;
                let dashboard = load_dashboard(
                    provider.as_ref(),
                    position.source().as_ref(),
                    &geocoder,
                    &default_roster(),
                    config.request_timeout(),
                )
                .await;
                render::dashboard(&dashboard, self.json)
            }
        }
    }
}

async fn show(
    config: &Config,
    place: Option<String>,
    position: PositionArgs,
    json: bool,
) -> Result<()> {
    let place = match place.filter(|p| !p.trim().is_empty()) {
        Some(p) => p,
        None => match config.home_city() {
            Some(home) => home.to_string(),
            None => {
                let geocoder = ReverseGeocoder::from_config(config)?;
                resolve_user_location(position.source().as_ref(), &geocoder).await.city
            }
        },
    };

    let provider = provider_from_config(config)?;
    let snapshot = provider
        .fetch_weather(&place)
        .await
        .with_context(|| format!("Failed to fetch weather for '{place}'"))?;

    render::snapshot(&snapshot, json)
}

fn configure(mut config: Config) -> Result<()> {
    let home = Text::new("Home city:")
        .with_initial_value(config.home_city().unwrap_or_default())
        .with_help_message("Used by `weatherboard show` without a place; leave blank to clear")
        .prompt()
        .context("Failed to read home city")?;
    config.set_home_city(&home);

    config.request_timeout_secs = CustomType::<u64>::new("Request timeout (seconds):")
        .with_default(config.request_timeout().as_secs())
        .with_error_message("Please enter a whole number of seconds")
        .with_validator(validate_timeout)
        .prompt()
        .context("Failed to read request timeout")?;

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());

    Ok(())
}

fn validate_timeout(secs: &u64) -> Result<Validation, CustomUserError> {
    if *secs == 0 {
        Ok(Validation::Invalid("Timeout must be at least 1 second".into()))
    } else {
        Ok(Validation::Valid)
    }
}

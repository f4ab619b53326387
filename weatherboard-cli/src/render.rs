//! Text and JSON output for each command.

use anyhow::Result;
use chrono::Local;
use serde_json::json;
use weatherboard_core::{CityRef, Dashboard, RankingResult, UserLocation, WeatherSnapshot};

pub fn snapshot(snap: &WeatherSnapshot, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(snap)?);
    } else {
        print!("{}", snapshot_text(snap));
    }
    Ok(())
}

pub fn location(loc: &UserLocation, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(loc)?);
    } else {
        println!("{loc}");
    }
    Ok(())
}

pub fn rankings(result: &RankingResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        print!("{}", rankings_text(result));
    }
    Ok(())
}

pub fn dashboard(board: &Dashboard, json: bool) -> Result<()> {
    let updated_at = Local::now();

    if json {
        let current = match &board.current {
            Ok(snap) => serde_json::to_value(snap)?,
            Err(e) => json!({ "error": e.to_string() }),
        };
        let out = json!({
            "location": board.location,
            "current": current,
            "rankings": board.rankings,
            "updated_at": updated_at.to_rfc3339(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("Your location: {}", board.location);
    println!();
    match &board.current {
        Ok(snap) => print!("{}", snapshot_text(snap)),
        Err(e) => println!("Current weather unavailable: {e}"),
    }
    println!();
    print!("{}", rankings_text(&board.rankings));
    println!();
    println!("Updated at {}", updated_at.format("%Y-%m-%d %H:%M"));
    Ok(())
}

fn snapshot_text(snap: &WeatherSnapshot) -> String {
    let mut out = format!("{}: {}\n", snap.location, snap.condition);
    out.push_str(&format!("  Temperature:   {}°C\n", snap.temperature_c));
    out.push_str(&format!("  Humidity:      {}%\n", snap.humidity_pct));
    out.push_str(&format!("  Wind:          {} km/h\n", snap.wind_speed_kmh));
    out.push_str(&format!("  Precipitation: {} mm\n", snap.precipitation_mm));
    out
}

fn rankings_text(result: &RankingResult) -> String {
    let mut out = String::new();
    push_ranking(&mut out, "Top 10 Hottest Cities", &result.top_by_temperature, |c| {
        c.temperature_c.map(|t| format!("{t}°C"))
    });
    out.push('\n');
    push_ranking(&mut out, "Top 10 Most Humid Cities", &result.top_by_humidity, |c| {
        c.humidity_pct.map(|h| format!("{h}%"))
    });
    out
}

fn push_ranking(
    out: &mut String,
    title: &str,
    cities: &[CityRef],
    reading: impl Fn(&CityRef) -> Option<String>,
) {
    out.push_str(title);
    out.push('\n');

    if cities.is_empty() {
        out.push_str("  (no data)\n");
        return;
    }

    for (rank, city) in cities.iter().enumerate() {
        let place = format!("{}, {}", city.name, city.country);
        let value = reading(city).unwrap_or_default();
        out.push_str(&format!("  {:>2}. {place:<22} {value:>6}\n", rank + 1));
    }
}

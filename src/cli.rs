#![allow(clippy::missing_errors_doc)]

use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::{Parser, ValueEnum};

use crate::domain::{
    activities::ActivityKind,
    weather::{Units, parse_datetime},
};

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum UnitsArg {
    Celsius,
    Fahrenheit,
}

impl From<UnitsArg> for Units {
    fn from(value: UnitsArg) -> Self {
        match value {
            UnitsArg::Celsius => Units::Celsius,
            UnitsArg::Fahrenheit => Units::Fahrenheit,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ActivityArg {
    Running,
    Carwash,
    Comfort,
    Moto,
    Garden,
    Bbq,
}

impl From<ActivityArg> for ActivityKind {
    fn from(value: ActivityArg) -> Self {
        match value {
            ActivityArg::Running => ActivityKind::Running,
            ActivityArg::Carwash => ActivityKind::Carwash,
            ActivityArg::Comfort => ActivityKind::Comfort,
            ActivityArg::Moto => ActivityKind::Moto,
            ActivityArg::Garden => ActivityKind::Garden,
            ActivityArg::Bbq => ActivityKind::Bbq,
        }
    }
}

#[derive(Debug, Parser, Clone)]
#[command(
    name = "weather-insights",
    version,
    about = "Alerts, advice, activity scores and the next weather event for a forecast"
)]
pub struct Cli {
    /// Read a saved Open-Meteo forecast JSON instead of fetching
    #[arg(long, conflicts_with_all = ["lat", "lon"])]
    pub input: Option<PathBuf>,

    /// Latitude to fetch (requires --lon)
    #[arg(long, allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Longitude to fetch (requires --lat)
    #[arg(long, allow_hyphen_values = true)]
    pub lon: Option<f64>,

    /// Display name for the location
    #[arg(long)]
    pub name: Option<String>,

    /// Temperature units (overrides the settings file)
    #[arg(long, value_enum)]
    pub units: Option<UnitsArg>,

    /// Local wall-clock time to evaluate at, e.g. 2026-02-12T14:30
    #[arg(long, value_parser = parse_now)]
    pub now: Option<NaiveDateTime>,

    /// Only score these activities (repeatable)
    #[arg(long = "activity", value_enum)]
    pub activities: Vec<ActivityArg>,

    /// Print the report as JSON
    #[arg(long, conflicts_with = "watch")]
    pub json: bool,

    /// Keep a live countdown to the next weather event
    #[arg(long)]
    pub watch: bool,

    /// Forecast endpoint override
    #[arg(long)]
    pub forecast_url: Option<String>,

    /// Air quality endpoint override
    #[arg(long)]
    pub air_quality_url: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn validate(&self) -> anyhow::Result<()> {
        match (self.lat, self.lon) {
            (Some(_), None) | (None, Some(_)) => {
                anyhow::bail!("--lat and --lon must be provided together")
            }
            (None, None) if self.input.is_none() => {
                anyhow::bail!("either --input or --lat/--lon is required")
            }
            (Some(lat), Some(lon))
                if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) =>
            {
                anyhow::bail!("coordinates out of range: {lat}, {lon}")
            }
            _ => Ok(()),
        }
    }

    /// Activities to score, in guide order. Empty selection means all of them.
    #[must_use]
    pub fn selected_activities(&self) -> Vec<ActivityKind> {
        if self.activities.is_empty() {
            return ActivityKind::ALL.to_vec();
        }
        ActivityKind::ALL
            .into_iter()
            .filter(|kind| self.activities.iter().any(|arg| ActivityKind::from(*arg) == *kind))
            .collect()
    }
}

fn parse_now(value: &str) -> Result<NaiveDateTime, String> {
    parse_datetime(value).ok_or_else(|| format!("expected YYYY-MM-DDTHH:MM, got {value:?}"))
}

use std::{
    ffi::OsString,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};

use crate::{
    cli::Cli,
    domain::weather::Units,
};

const CONFIG_DIR_ENV: &str = "WEATHER_INSIGHTS_CONFIG_DIR";
const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default, deserialize_with = "lenient_units")]
    pub units: Units,
    #[serde(default)]
    pub favorites: Vec<Favorite>,
}

impl Settings {
    /// Command-line flags win over stored preferences.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(units) = cli.units {
            self.units = units.into();
        }
    }
}

fn lenient_units<'de, D>(deserializer: D) -> Result<Units, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().map(Units::from).unwrap_or_default())
}

/// Reads settings from `path`. A missing file gives defaults; an unreadable or malformed
/// one is logged and also gives defaults.
pub fn load_settings(path: &Path) -> Settings {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no settings file, using defaults");
            return Settings::default();
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "settings file unreadable, using defaults");
            return Settings::default();
        }
    };

    serde_json::from_str(&content).unwrap_or_else(|err| {
        warn!(path = %path.display(), error = %err, "settings file malformed, using defaults");
        Settings::default()
    })
}

pub fn save_settings(path: &Path, settings: &Settings) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("creating settings directory failed")?;
    }
    let payload =
        serde_json::to_string_pretty(settings).context("serializing settings payload failed")?;
    fs::write(path, payload).context("writing settings file failed")
}

#[must_use]
pub fn settings_path() -> Option<PathBuf> {
    resolve_settings_path(std::env::var_os(CONFIG_DIR_ENV), std::env::var_os("HOME"))
}

fn resolve_settings_path(config_dir: Option<OsString>, home: Option<OsString>) -> Option<PathBuf> {
    if let Some(base) = config_dir.filter(|dir| !dir.is_empty()) {
        return Some(PathBuf::from(base).join(SETTINGS_FILE));
    }

    let home = home?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("weather-insights")
            .join(SETTINGS_FILE),
    )
}

#[cfg(test)]
mod tests;

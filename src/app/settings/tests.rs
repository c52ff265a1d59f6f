use std::path::PathBuf;

use clap::Parser;
use tempfile::{NamedTempFile, tempdir};

use super::*;

fn ankara() -> Favorite {
    Favorite {
        name: "Ankara".to_string(),
        latitude: 39.9334,
        longitude: 32.8597,
    }
}

#[test]
fn settings_roundtrip_preserves_units_and_favorites() {
    let settings = Settings {
        units: Units::Fahrenheit,
        favorites: vec![ankara()],
    };

    let file = NamedTempFile::new().expect("create temp settings file");
    save_settings(file.path(), &settings).expect("save settings");

    assert_eq!(load_settings(file.path()), settings);
    let content = std::fs::read_to_string(file.path()).expect("read settings");
    assert!(content.contains("\"units\": \"fahrenheit\""));
}

#[test]
fn save_creates_missing_directories() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("nested").join("settings.json");
    save_settings(&path, &Settings::default()).expect("save settings");
    assert!(path.exists());
}

#[test]
fn missing_file_gives_defaults() {
    let dir = tempdir().expect("create temp dir");
    let settings = load_settings(&dir.path().join("absent.json"));
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.units, Units::Celsius);
}

#[test]
fn malformed_file_gives_defaults() {
    let file = NamedTempFile::new().expect("create temp settings file");
    std::fs::write(file.path(), "{ not json").expect("write settings");
    assert_eq!(load_settings(file.path()), Settings::default());
}

#[test]
fn unknown_or_missing_units_fall_back_to_celsius() {
    let parsed: Settings =
        serde_json::from_str(r#"{"units": "kelvin", "favorites": []}"#).expect("parse");
    assert_eq!(parsed.units, Units::Celsius);

    let parsed: Settings = serde_json::from_str(r#"{"units": null}"#).expect("parse");
    assert_eq!(parsed.units, Units::Celsius);

    let parsed: Settings = serde_json::from_str("{}").expect("parse");
    assert_eq!(parsed.units, Units::Celsius);
    assert!(parsed.favorites.is_empty());

    let parsed: Settings = serde_json::from_str(r#"{"units": "Fahrenheit"}"#).expect("parse");
    assert_eq!(parsed.units, Units::Fahrenheit);
}

#[test]
fn cli_units_override_stored_units() {
    let mut settings = Settings {
        units: Units::Fahrenheit,
        favorites: vec![],
    };
    let cli = Cli::parse_from(["weather-insights", "--input", "a.json"]);
    settings.apply_cli(&cli);
    assert_eq!(settings.units, Units::Fahrenheit);

    let cli = Cli::parse_from(["weather-insights", "--input", "a.json", "--units", "celsius"]);
    settings.apply_cli(&cli);
    assert_eq!(settings.units, Units::Celsius);
}

#[test]
fn config_dir_env_wins_over_home() {
    let path = resolve_settings_path(Some("/tmp/wi".into()), Some("/home/me".into()));
    assert_eq!(path, Some(PathBuf::from("/tmp/wi/settings.json")));

    let path = resolve_settings_path(Some("".into()), Some("/home/me".into()));
    assert_eq!(
        path,
        Some(PathBuf::from("/home/me/.config/weather-insights/settings.json"))
    );

    assert_eq!(resolve_settings_path(None, None), None);
}

#[test]
fn abbreviated_units_in_settings_file_load_as_celsius() {
    let file = NamedTempFile::new().expect("create temp settings file");
    std::fs::write(file.path(), r#"{"units": "F"}"#).expect("write settings");
    assert_eq!(load_settings(file.path()).units, Units::Celsius);
}

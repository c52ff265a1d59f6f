use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::Units;

#[must_use]
pub fn convert_temp(celsius: f32, units: Units) -> f32 {
    match units {
        Units::Celsius => celsius,
        Units::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
    }
}

#[must_use]
pub fn round_temp(value: f32) -> i32 {
    value.round() as i32
}

/// Display temperature: converted, then rounded half away from zero.
#[must_use]
pub fn convert_temperature(celsius: f32, units: Units) -> i32 {
    round_temp(convert_temp(celsius, units))
}

#[must_use]
pub fn unit_label(units: Units) -> &'static str {
    match units {
        Units::Celsius => "°",
        Units::Fahrenheit => "°F",
    }
}

/// Suffix used in alert text, which always names the scale.
#[must_use]
pub fn temperature_suffix(units: Units) -> &'static str {
    match units {
        Units::Celsius => "°C",
        Units::Fahrenheit => "°F",
    }
}

/// Accepts Open-Meteo local timestamps with or without seconds, and RFC 3339 strings
/// (which keep their own wall-clock time).
#[must_use]
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.naive_local())
        })
}

#[must_use]
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

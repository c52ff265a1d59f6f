#![allow(dead_code)]

use chrono::NaiveDateTime;
use serde_json::{Value, json};
use weather_insights::{data::forecast::parse_snapshot, domain::weather::ForecastBundle};

/// Knobs for the current block of a rainy Istanbul afternoon.
#[derive(Debug, Clone, Copy)]
pub struct CurrentFixture {
    pub time: &'static str,
    pub temperature: f32,
    pub weather_code: u8,
    pub precipitation: f32,
    pub wind_speed: f32,
    pub is_day: bool,
}

impl Default for CurrentFixture {
    fn default() -> Self {
        Self {
            time: "2026-02-12T14:00",
            temperature: 9.0,
            weather_code: 61,
            precipitation: 0.8,
            wind_speed: 12.0,
            is_day: true,
        }
    }
}

/// Rain through 16:00 local on the 12th, overcast from 17:00 on.
pub fn hourly_codes() -> Vec<u8> {
    (0..48).map(|hour| if hour <= 16 { 61 } else { 3 }).collect()
}

pub fn forecast_payload(current: CurrentFixture) -> Value {
    let codes = hourly_codes();
    let times: Vec<String> = (0..48)
        .map(|hour| format!("2026-02-{:02}T{:02}:00", 12 + hour / 24, hour % 24))
        .collect();
    let probabilities: Vec<u8> = codes
        .iter()
        .map(|code| if *code == 61 { 80 } else { 20 })
        .collect();
    let is_day: Vec<u8> = (0..48)
        .map(|hour| u8::from((8..17).contains(&(hour % 24))))
        .collect();

    json!({
        "latitude": 41.0082,
        "longitude": 28.9784,
        "utc_offset_seconds": 10800,
        "timezone": "Europe/Istanbul",
        "current": {
            "time": current.time,
            "temperature_2m": current.temperature,
            "relative_humidity_2m": 82,
            "apparent_temperature": current.temperature - 2.0,
            "is_day": u8::from(current.is_day),
            "precipitation": current.precipitation,
            "weather_code": current.weather_code,
            "cloud_cover": 100,
            "surface_pressure": 1008.2,
            "wind_speed_10m": current.wind_speed,
            "wind_direction_10m": 225,
            "dew_point_2m": 6.1
        },
        "hourly": {
            "time": times,
            "temperature_2m": vec![current.temperature; 48],
            "weather_code": codes,
            "is_day": is_day,
            "wind_speed_10m": vec![current.wind_speed; 48],
            "wind_direction_10m": vec![225; 48],
            "precipitation_probability": probabilities
        },
        "daily": {
            "time": ["2026-02-12", "2026-02-13"],
            "weather_code": [61, 3],
            "temperature_2m_max": [11.0, 13.0],
            "temperature_2m_min": [6.0, 5.0],
            "apparent_temperature_max": [9.0, 12.0],
            "apparent_temperature_min": [3.0, 2.0],
            "sunrise": ["2026-02-12T07:30", "2026-02-13T07:29"],
            "sunset": ["2026-02-12T17:20", "2026-02-13T17:21"],
            "uv_index_max": [2.0, 3.5],
            "precipitation_probability_max": [90, 20],
            "wind_speed_10m_max": [24.0, 15.0],
            "wind_direction_10m_dominant": [225, 200]
        }
    })
}

pub fn air_quality_payload(european_aqi: f32) -> Value {
    json!({
        "current": {
            "time": "2026-02-12T14:00",
            "european_aqi": european_aqi,
            "pm10": 18.4,
            "pm2_5": 9.9,
            "dust": 1.0,
            "grass_pollen": 2.5,
            "olive_pollen": null
        }
    })
}

pub fn bundle(current: CurrentFixture) -> ForecastBundle {
    let body = forecast_payload(current).to_string();
    parse_snapshot(&body, Some("İstanbul")).expect("fixture payload parses")
}

pub fn rainy_afternoon() -> ForecastBundle {
    bundle(CurrentFixture::default())
}

pub fn local(value: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M").expect("valid time fixture")
}

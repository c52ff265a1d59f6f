use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::domain::weather::{
    AirQualityReading, CurrentConditions, DailyForecast, ForecastBundle, HourlyForecast, Location,
    PollenReading,
};

pub(crate) fn parse_time(value: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M").expect("valid time fixture")
}

pub(crate) fn istanbul_location() -> Location {
    Location {
        name: "İstanbul".to_string(),
        latitude: 41.0082,
        longitude: 28.9784,
        country: Some("Türkiye".to_string()),
        admin1: Some("İstanbul".to_string()),
        timezone: Some("Europe/Istanbul".to_string()),
    }
}

pub(crate) fn sample_current() -> CurrentConditions {
    CurrentConditions {
        time: parse_time("2026-02-12T10:00"),
        temperature_2m_c: 12.0,
        apparent_temperature_c: 11.0,
        relative_humidity_2m: 55.0,
        is_day: true,
        precipitation_mm: 0.0,
        weather_code: 3,
        cloud_cover: 60.0,
        wind_speed_10m: 10.0,
        wind_direction_10m: 180.0,
        surface_pressure_hpa: 1012.0,
        dew_point_2m_c: 4.0,
    }
}

/// 48 hours starting at local midnight of 2026-02-12, overcast and dry.
pub(crate) fn sample_hourly() -> Vec<HourlyForecast> {
    let start = parse_time("2026-02-12T00:00");
    (0..48)
        .map(|i| HourlyForecast {
            time: start + Duration::hours(i),
            temperature_2m_c: Some(12.0),
            weather_code: Some(3),
            is_day: Some((8..17).contains(&(i % 24))),
            wind_speed_10m: Some(10.0),
            wind_direction_10m: Some(180.0),
            precipitation_probability: Some(10.0),
        })
        .collect()
}

pub(crate) fn sample_daily() -> Vec<DailyForecast> {
    let today = NaiveDate::from_ymd_opt(2026, 2, 12).expect("valid date fixture");
    (0..2)
        .map(|i| {
            let date = today + Duration::days(i);
            DailyForecast {
                date,
                weather_code: Some(3),
                temperature_max_c: Some(14.0),
                temperature_min_c: Some(6.0),
                apparent_temperature_max_c: Some(13.0),
                apparent_temperature_min_c: Some(4.0),
                sunrise: date.and_hms_opt(7, 30, 0),
                sunset: date.and_hms_opt(17, 20, 0),
                uv_index_max: Some(3.0),
                precipitation_probability_max: Some(10.0),
                wind_speed_10m_max: Some(18.0),
                wind_direction_dominant: Some(200.0),
            }
        })
        .collect()
}

pub(crate) fn sample_air_quality(european_aqi: f32) -> AirQualityReading {
    AirQualityReading {
        european_aqi,
        pm10: Some(22.0),
        pm2_5: Some(11.0),
        dust: Some(3.0),
        pollen: vec![PollenReading {
            species: "grass".to_string(),
            grains_per_m3: 4.0,
        }],
    }
}

pub(crate) fn sample_bundle() -> ForecastBundle {
    ForecastBundle {
        location: istanbul_location(),
        current: sample_current(),
        hourly: sample_hourly(),
        daily: sample_daily(),
        air_quality: None,
        utc_offset_seconds: 10_800,
    }
}

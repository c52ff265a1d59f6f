use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

mod conditions;
mod conversions;

pub use conditions::*;
pub use conversions::*;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Celsius,
    Fahrenheit,
}

impl Units {
    /// Lenient parse for stored preferences. Anything but "fahrenheit" is celsius.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("fahrenheit") {
            Units::Fahrenheit
        } else {
            Units::Celsius
        }
    }
}

impl From<&str> for Units {
    fn from(value: &str) -> Self {
        Self::from_name(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub admin1: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
}

impl Location {
    pub fn from_coords(lat: f64, lon: f64) -> Self {
        Self {
            name: format!("{lat:.4}, {lon:.4}"),
            latitude: lat,
            longitude: lon,
            country: None,
            admin1: None,
            timezone: None,
        }
    }

    pub fn display_name(&self) -> String {
        match (&self.admin1, &self.country) {
            (Some(admin), Some(country)) => format!("{}, {}, {}", self.name, admin, country),
            (None, Some(country)) => format!("{}, {}", self.name, country),
            _ => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub time: NaiveDateTime,
    pub temperature_2m_c: f32,
    pub apparent_temperature_c: f32,
    pub relative_humidity_2m: f32,
    pub is_day: bool,
    pub precipitation_mm: f32,
    pub weather_code: u8,
    pub cloud_cover: f32,
    pub wind_speed_10m: f32,
    pub wind_direction_10m: f32,
    pub surface_pressure_hpa: f32,
    pub dew_point_2m_c: f32,
}

/// One row of the hourly block. Index 0 is the first hour the provider returned.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyForecast {
    pub time: NaiveDateTime,
    pub temperature_2m_c: Option<f32>,
    pub weather_code: Option<u8>,
    pub is_day: Option<bool>,
    pub wind_speed_10m: Option<f32>,
    pub wind_direction_10m: Option<f32>,
    pub precipitation_probability: Option<f32>,
}

/// One row of the daily block. Index 0 is today in the location's timezone.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub weather_code: Option<u8>,
    pub temperature_max_c: Option<f32>,
    pub temperature_min_c: Option<f32>,
    pub apparent_temperature_max_c: Option<f32>,
    pub apparent_temperature_min_c: Option<f32>,
    pub sunrise: Option<NaiveDateTime>,
    pub sunset: Option<NaiveDateTime>,
    pub uv_index_max: Option<f32>,
    pub precipitation_probability_max: Option<f32>,
    pub wind_speed_10m_max: Option<f32>,
    pub wind_direction_dominant: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AirQualityCategory {
    Excellent,
    Good,
    Moderate,
    Sensitive,
    Poor,
}

impl AirQualityCategory {
    #[must_use]
    pub fn from_european_aqi(aqi: f32) -> Self {
        if aqi > 80.0 {
            AirQualityCategory::Poor
        } else if aqi > 60.0 {
            AirQualityCategory::Sensitive
        } else if aqi > 40.0 {
            AirQualityCategory::Moderate
        } else if aqi > 20.0 {
            AirQualityCategory::Good
        } else {
            AirQualityCategory::Excellent
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            AirQualityCategory::Excellent => "Mükemmel",
            AirQualityCategory::Good => "İyi",
            AirQualityCategory::Moderate => "Orta",
            AirQualityCategory::Sensitive => "Hassas",
            AirQualityCategory::Poor => "Kötü",
        }
    }

    #[must_use]
    pub fn advice(self) -> &'static str {
        match self {
            AirQualityCategory::Excellent => {
                "Hava tertemiz! Pencereleri açabilir, dışarıda spor yapabilirsiniz."
            }
            AirQualityCategory::Good => {
                "Hava kalitesi gayet iyi. Dışarıdaki aktiviteler için uygun."
            }
            AirQualityCategory::Moderate => {
                "Hava kalitesi kabul edilebilir, ancak hassas bünyeler uzun süre dışarıda kalmamalı."
            }
            AirQualityCategory::Sensitive => {
                "Hassas gruplar (çocuklar, yaşlılar) için riskli olabilir. Maske takılması önerilir."
            }
            AirQualityCategory::Poor => {
                "Hava kirliliği yüksek seviyede! Mecbur kalmadıkça dışarı çıkmayın."
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PollenReading {
    pub species: String,
    pub grains_per_m3: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AirQualityReading {
    pub european_aqi: f32,
    pub pm10: Option<f32>,
    pub pm2_5: Option<f32>,
    pub dust: Option<f32>,
    pub pollen: Vec<PollenReading>,
}

impl AirQualityReading {
    #[must_use]
    pub fn category(&self) -> AirQualityCategory {
        AirQualityCategory::from_european_aqi(self.european_aqi)
    }
}

/// A single fetched weather response. Engines only ever borrow it.
#[derive(Debug, Clone)]
pub struct ForecastBundle {
    pub location: Location,
    pub current: CurrentConditions,
    pub hourly: Vec<HourlyForecast>,
    pub daily: Vec<DailyForecast>,
    pub air_quality: Option<AirQualityReading>,
    pub utc_offset_seconds: i32,
}

impl ForecastBundle {
    pub fn today(&self) -> Option<&DailyForecast> {
        self.daily.first()
    }

    pub fn tomorrow(&self) -> Option<&DailyForecast> {
        self.daily.get(1)
    }

    /// Daily max precipitation probability for `day` (0 = today), if the provider sent one.
    pub fn precipitation_probability_max(&self, day: usize) -> Option<f32> {
        self.daily
            .get(day)
            .and_then(|d| d.precipitation_probability_max)
    }

    pub fn european_aqi(&self) -> Option<f32> {
        self.air_quality.as_ref().map(|aq| aq.european_aqi)
    }

    /// Wall clock at the forecast location for a given UTC instant.
    pub fn local_time(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        instant.naive_utc() + Duration::seconds(i64::from(self.utc_offset_seconds))
    }
}

#[cfg(test)]
mod tests;

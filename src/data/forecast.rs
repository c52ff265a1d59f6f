use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    domain::weather::{
        AirQualityReading, CurrentConditions, DailyForecast, ForecastBundle, HourlyForecast,
        Location, PollenReading, parse_date, parse_datetime,
    },
    resilience::backoff::Backoff,
};

pub const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const AIR_QUALITY_URL: &str = "https://air-quality-api.open-meteo.com/v1/air-quality";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,apparent_temperature,is_day,precipitation,weather_code,cloud_cover,surface_pressure,wind_speed_10m,wind_direction_10m,dew_point_2m";
const HOURLY_FIELDS: &str = "temperature_2m,weather_code,is_day,wind_speed_10m,wind_direction_10m,precipitation_probability";
const DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min,apparent_temperature_max,apparent_temperature_min,sunrise,sunset,uv_index_max,precipitation_probability_max,wind_speed_10m_max,wind_direction_10m_dominant";
const AIR_QUALITY_FIELDS: &str = "european_aqi,pm10,pm2_5,dust,alder_pollen,birch_pollen,grass_pollen,mugwort_pollen,olive_pollen,ragweed_pollen";

#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("forecast request failed")]
    Request(#[from] reqwest::Error),
    #[error("forecast service answered with status {0}")]
    Status(StatusCode),
    #[error("malformed forecast payload")]
    Payload(#[from] serde_json::Error),
    #[error("invalid timestamp in forecast payload: {0:?}")]
    Timestamp(String),
    #[error("forecast payload has no usable {0} rows")]
    EmptyBlock(&'static str),
}

impl ForecastError {
    fn is_transient(&self) -> bool {
        match self {
            ForecastError::Request(_) => true,
            ForecastError::Status(status) => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            _ => false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ForecastClient {
    client: Client,
    forecast_url: String,
    air_quality_url: String,
    backoff: Backoff,
}

impl ForecastClient {
    pub fn with_base_urls(
        forecast_url: impl Into<String>,
        air_quality_url: impl Into<String>,
    ) -> Result<Self, ForecastError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            forecast_url: forecast_url.into(),
            air_quality_url: air_quality_url.into(),
            backoff: Backoff::default(),
        })
    }

    #[must_use]
    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    /// Fetches forecast and air quality together. Only the forecast half is required.
    pub async fn fetch(&self, location: Location) -> Result<ForecastBundle, ForecastError> {
        let coords = [
            ("latitude", location.latitude.to_string()),
            ("longitude", location.longitude.to_string()),
        ];
        let forecast_query = [
            ("current", CURRENT_FIELDS),
            ("hourly", HOURLY_FIELDS),
            ("daily", DAILY_FIELDS),
            ("timezone", "auto"),
            ("forecast_days", "16"),
            ("temperature_unit", "celsius"),
            ("wind_speed_unit", "kmh"),
            ("precipitation_unit", "mm"),
        ];
        let air_quality_query = [("current", AIR_QUALITY_FIELDS), ("timezone", "auto")];

        let (forecast, air_quality) = tokio::join!(
            self.get_with_retry(&self.forecast_url, &coords, &forecast_query),
            self.get_with_retry(&self.air_quality_url, &coords, &air_quality_query),
        );

        let mut bundle = parse_forecast_payload(&forecast?, location)?;
        if bundle.air_quality.is_none() {
            bundle.air_quality = match air_quality.and_then(|body| parse_air_quality_payload(&body))
            {
                Ok(reading) => reading,
                Err(err) => {
                    warn!(error = %err, "air quality unavailable, continuing without it");
                    None
                }
            };
        }
        info!(
            location = %bundle.location.name,
            hours = bundle.hourly.len(),
            days = bundle.daily.len(),
            "forecast fetched"
        );
        Ok(bundle)
    }

    async fn get_with_retry(
        &self,
        url: &str,
        coords: &[(&str, String)],
        query: &[(&str, &str)],
    ) -> Result<String, ForecastError> {
        let mut backoff = self.backoff.clone();
        loop {
            match self.get_once(url, coords, query).await {
                Ok(body) => return Ok(body),
                Err(err) if err.is_transient() => match backoff.next_delay() {
                    Some(delay) => {
                        warn!(%url, error = %err, ?delay, "request failed, retrying");
                        tokio::time::sleep(delay).await;
                    }
                    None => return Err(err),
                },
                Err(err) => return Err(err),
            }
        }
    }

    async fn get_once(
        &self,
        url: &str,
        coords: &[(&str, String)],
        query: &[(&str, &str)],
    ) -> Result<String, ForecastError> {
        debug!(%url, "sending request");
        let response = self
            .client
            .get(url)
            .query(coords)
            .query(query)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ForecastError::Status(status));
        }
        Ok(response.text().await?)
    }
}

/// Builds a bundle from an Open-Meteo forecast body. A top-level `air_quality` object, as saved
/// in snapshot files, is picked up as the air-quality reading.
pub fn parse_forecast_payload(
    body: &str,
    location: Location,
) -> Result<ForecastBundle, ForecastError> {
    let payload: ForecastResponse = serde_json::from_str(body)?;
    bundle_from_response(payload, location)
}

/// Reads a saved forecast body whose location comes from the payload's own coordinates.
pub fn parse_snapshot(body: &str, name: Option<&str>) -> Result<ForecastBundle, ForecastError> {
    let payload: ForecastResponse = serde_json::from_str(body)?;
    let mut location = Location::from_coords(payload.latitude, payload.longitude);
    if let Some(name) = name {
        location.name = name.to_string();
    }
    bundle_from_response(payload, location)
}

fn bundle_from_response(
    payload: ForecastResponse,
    location: Location,
) -> Result<ForecastBundle, ForecastError> {
    let hourly = parse_hourly(&payload.hourly);
    if hourly.is_empty() {
        return Err(ForecastError::EmptyBlock("hourly"));
    }
    let daily = parse_daily(&payload.daily);
    if daily.is_empty() {
        return Err(ForecastError::EmptyBlock("daily"));
    }

    let location = Location {
        timezone: location.timezone.or(payload.timezone),
        ..location
    };

    Ok(ForecastBundle {
        location,
        current: parse_current(&payload.current)?,
        hourly,
        daily,
        air_quality: payload.air_quality.as_ref().and_then(AirQualityBlock::reading),
        utc_offset_seconds: payload.utc_offset_seconds,
    })
}

/// Parses the air-quality endpoint body. A missing `current` block or AQI yields `None`.
pub fn parse_air_quality_payload(body: &str) -> Result<Option<AirQualityReading>, ForecastError> {
    let payload: AirQualityResponse = serde_json::from_str(body)?;
    Ok(payload.current.as_ref().and_then(AirQualityBlock::reading))
}

fn parse_current(current: &CurrentBlock) -> Result<CurrentConditions, ForecastError> {
    let time = parse_datetime(&current.time)
        .ok_or_else(|| ForecastError::Timestamp(current.time.clone()))?;
    Ok(CurrentConditions {
        time,
        temperature_2m_c: current.temperature_2m,
        apparent_temperature_c: current.apparent_temperature.unwrap_or(current.temperature_2m),
        relative_humidity_2m: current.relative_humidity_2m.unwrap_or_default(),
        is_day: current.is_day == 1,
        precipitation_mm: current.precipitation.unwrap_or_default(),
        weather_code: current.weather_code,
        cloud_cover: current.cloud_cover.unwrap_or_default(),
        wind_speed_10m: current.wind_speed_10m.unwrap_or_default(),
        wind_direction_10m: current.wind_direction_10m.unwrap_or_default(),
        surface_pressure_hpa: current.surface_pressure.unwrap_or_default(),
        dew_point_2m_c: current.dew_point_2m.unwrap_or_default(),
    })
}

fn parse_hourly(hourly: &HourlyBlock) -> Vec<HourlyForecast> {
    let mut out = Vec::with_capacity(hourly.time.len());
    for (idx, raw) in hourly.time.iter().enumerate() {
        let Some(time) = parse_datetime(raw) else {
            debug!(timestamp = %raw, "skipping hourly row with bad timestamp");
            continue;
        };

        out.push(HourlyForecast {
            time,
            temperature_2m_c: at(&hourly.temperature_2m, idx),
            weather_code: at(&hourly.weather_code, idx),
            is_day: at(&hourly.is_day, idx).map(|flag| flag == 1),
            wind_speed_10m: at(&hourly.wind_speed_10m, idx),
            wind_direction_10m: at(&hourly.wind_direction_10m, idx),
            precipitation_probability: at(&hourly.precipitation_probability, idx),
        });
    }
    out
}

fn parse_daily(daily: &DailyBlock) -> Vec<DailyForecast> {
    let mut out = Vec::with_capacity(daily.time.len());
    for (idx, raw) in daily.time.iter().enumerate() {
        let Some(date) = parse_date(raw) else {
            debug!(date = %raw, "skipping daily row with bad date");
            continue;
        };

        out.push(DailyForecast {
            date,
            weather_code: at(&daily.weather_code, idx),
            temperature_max_c: at(&daily.temperature_2m_max, idx),
            temperature_min_c: at(&daily.temperature_2m_min, idx),
            apparent_temperature_max_c: at(&daily.apparent_temperature_max, idx),
            apparent_temperature_min_c: at(&daily.apparent_temperature_min, idx),
            sunrise: daily
                .sunrise
                .get(idx)
                .and_then(Option::as_deref)
                .and_then(parse_datetime),
            sunset: daily
                .sunset
                .get(idx)
                .and_then(Option::as_deref)
                .and_then(parse_datetime),
            uv_index_max: at(&daily.uv_index_max, idx),
            precipitation_probability_max: at(&daily.precipitation_probability_max, idx),
            wind_speed_10m_max: at(&daily.wind_speed_10m_max, idx),
            wind_direction_dominant: at(&daily.wind_direction_10m_dominant, idx),
        });
    }
    out
}

fn at<T: Copy>(values: &[Option<T>], idx: usize) -> Option<T> {
    values.get(idx).copied().flatten()
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    latitude: f64,
    #[serde(default)]
    longitude: f64,
    #[serde(default)]
    utc_offset_seconds: i32,
    #[serde(default)]
    timezone: Option<String>,
    current: CurrentBlock,
    hourly: HourlyBlock,
    daily: DailyBlock,
    #[serde(default)]
    air_quality: Option<AirQualityBlock>,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    time: String,
    temperature_2m: f32,
    weather_code: u8,
    #[serde(default)]
    is_day: u8,
    #[serde(default)]
    apparent_temperature: Option<f32>,
    #[serde(default)]
    relative_humidity_2m: Option<f32>,
    #[serde(default)]
    precipitation: Option<f32>,
    #[serde(default)]
    cloud_cover: Option<f32>,
    #[serde(default)]
    wind_speed_10m: Option<f32>,
    #[serde(default)]
    wind_direction_10m: Option<f32>,
    #[serde(default)]
    surface_pressure: Option<f32>,
    #[serde(default)]
    dew_point_2m: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct HourlyBlock {
    time: Vec<String>,
    temperature_2m: Vec<Option<f32>>,
    weather_code: Vec<Option<u8>>,
    is_day: Vec<Option<u8>>,
    wind_speed_10m: Vec<Option<f32>>,
    wind_direction_10m: Vec<Option<f32>>,
    precipitation_probability: Vec<Option<f32>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DailyBlock {
    time: Vec<String>,
    weather_code: Vec<Option<u8>>,
    temperature_2m_max: Vec<Option<f32>>,
    temperature_2m_min: Vec<Option<f32>>,
    apparent_temperature_max: Vec<Option<f32>>,
    apparent_temperature_min: Vec<Option<f32>>,
    sunrise: Vec<Option<String>>,
    sunset: Vec<Option<String>>,
    uv_index_max: Vec<Option<f32>>,
    precipitation_probability_max: Vec<Option<f32>>,
    wind_speed_10m_max: Vec<Option<f32>>,
    wind_direction_10m_dominant: Vec<Option<f32>>,
}

#[derive(Debug, Deserialize)]
struct AirQualityResponse {
    #[serde(default)]
    current: Option<AirQualityBlock>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AirQualityBlock {
    european_aqi: Option<f32>,
    pm10: Option<f32>,
    pm2_5: Option<f32>,
    dust: Option<f32>,
    alder_pollen: Option<f32>,
    birch_pollen: Option<f32>,
    grass_pollen: Option<f32>,
    mugwort_pollen: Option<f32>,
    olive_pollen: Option<f32>,
    ragweed_pollen: Option<f32>,
}

impl AirQualityBlock {
    fn reading(&self) -> Option<AirQualityReading> {
        let species = [
            ("Ağaç (Kızılağaç)", self.alder_pollen),
            ("Huş Ağacı", self.birch_pollen),
            ("Çimen", self.grass_pollen),
            ("Pelin Otu", self.mugwort_pollen),
            ("Zeytin", self.olive_pollen),
            ("Kanarya Otu", self.ragweed_pollen),
        ];
        Some(AirQualityReading {
            european_aqi: self.european_aqi?,
            pm10: self.pm10,
            pm2_5: self.pm2_5,
            dust: self.dust,
            pollen: species
                .into_iter()
                .filter_map(|(name, value)| {
                    value.map(|grains| PollenReading {
                        species: name.to_string(),
                        grains_per_m3: grains,
                    })
                })
                .collect(),
        })
    }
}

use std::fmt::Write as _;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::{
    app::settings::Favorite,
    domain::{
        activities::{ActivityAssessment, ActivityKind, Polarity, assess_all},
        advice::{AdviceResult, generate_advice},
        alerts::{AlertLevel, WeatherAlert, detect_alerts},
        details::{UvDescriptor, dew_point_feel, uv_descriptor},
        events::{EventTarget, live_countdown, next_significant_event},
        geo::haversine_distance_km,
        sun::{GoldenHour, day_length, golden_hour},
        timefmt::{clock, compass_label},
        weather::{
            ForecastBundle, PollenReading, Units, WeatherCategory, convert_temperature, unit_label,
            weather_code_to_category, weather_label,
        },
    },
};

#[derive(Debug, Clone, Serialize)]
pub struct ConditionSummary {
    pub weather_code: u8,
    pub category: WeatherCategory,
    pub label: &'static str,
    pub temperature: i32,
    pub feels_like: i32,
    pub unit: &'static str,
    pub humidity_pct: f32,
    pub wind_kmh: f32,
    pub wind_direction: &'static str,
    pub is_day: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct NextEvent {
    #[serde(flatten)]
    pub event: EventTarget,
    pub countdown: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SunSummary {
    pub sunrise: String,
    pub sunset: String,
    pub day_length: String,
    pub golden_hour: GoldenHour,
}

#[derive(Debug, Clone, Serialize)]
pub struct AirQualitySummary {
    pub european_aqi: f32,
    pub category: &'static str,
    pub advice: &'static str,
    pub pollen: Vec<PollenReading>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DetailSummary {
    pub dew_point: &'static str,
    pub uv: Option<UvDescriptor>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FavoriteDistance {
    pub name: String,
    pub distance_km: f64,
}

/// Every engine's output for one snapshot at one instant.
#[derive(Debug, Clone, Serialize)]
pub struct InsightReport {
    pub location: String,
    pub units: Units,
    pub now: NaiveDateTime,
    pub conditions: ConditionSummary,
    pub alerts: Vec<WeatherAlert>,
    pub advice: AdviceResult,
    pub activities: Vec<ActivityAssessment>,
    pub next_event: Option<NextEvent>,
    pub sun: Option<SunSummary>,
    pub air_quality: Option<AirQualitySummary>,
    pub details: DetailSummary,
    pub favorites: Vec<FavoriteDistance>,
}

impl InsightReport {
    #[must_use]
    pub fn build(
        bundle: &ForecastBundle,
        units: Units,
        now: NaiveDateTime,
        favorites: &[Favorite],
    ) -> Self {
        let current = &bundle.current;
        let today = bundle.today();

        Self {
            location: bundle.location.display_name(),
            units,
            now,
            conditions: ConditionSummary {
                weather_code: current.weather_code,
                category: weather_code_to_category(current.weather_code),
                label: weather_label(current.weather_code),
                temperature: convert_temperature(current.temperature_2m_c, units),
                feels_like: convert_temperature(current.apparent_temperature_c, units),
                unit: unit_label(units),
                humidity_pct: current.relative_humidity_2m,
                wind_kmh: current.wind_speed_10m,
                wind_direction: compass_label(current.wind_direction_10m),
                is_day: current.is_day,
            },
            alerts: detect_alerts(bundle, units),
            advice: generate_advice(bundle, units),
            activities: assess_all(bundle),
            next_event: next_significant_event(bundle, now).map(|event| NextEvent {
                countdown: live_countdown(&event, now),
                event,
            }),
            sun: today.and_then(|day| {
                Some(SunSummary {
                    sunrise: clock(day.sunrise?),
                    sunset: clock(day.sunset?),
                    day_length: day_length(day)?,
                    golden_hour: golden_hour(day)?,
                })
            }),
            air_quality: bundle.air_quality.as_ref().map(|aq| {
                let category = aq.category();
                AirQualitySummary {
                    european_aqi: aq.european_aqi,
                    category: category.label(),
                    advice: category.advice(),
                    pollen: aq.pollen.clone(),
                }
            }),
            details: DetailSummary {
                dew_point: dew_point_feel(current.dew_point_2m_c),
                uv: today.and_then(|day| day.uv_index_max).map(uv_descriptor),
            },
            favorites: favorites
                .iter()
                .map(|fav| FavoriteDistance {
                    name: fav.name.clone(),
                    distance_km: haversine_distance_km(
                        bundle.location.latitude,
                        bundle.location.longitude,
                        fav.latitude,
                        fav.longitude,
                    ),
                })
                .collect(),
        }
    }

    /// Keeps only the listed activities. Order stays as built.
    pub fn retain_activities(&mut self, kinds: &[ActivityKind]) {
        self.activities.retain(|a| kinds.contains(&a.activity));
    }

    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let c = &self.conditions;

        let _ = writeln!(out, "{} · {}", self.location, self.now.format("%Y-%m-%d %H:%M"));
        let _ = writeln!(
            out,
            "{}, {}{} (hissedilen {}{}) · nem %{} · rüzgar {} km/sa {}",
            c.label,
            c.temperature,
            c.unit,
            c.feels_like,
            c.unit,
            c.humidity_pct,
            c.wind_kmh,
            c.wind_direction
        );

        out.push_str("\nUyarılar:\n");
        if self.alerts.is_empty() {
            out.push_str("  yok\n");
        }
        for alert in &self.alerts {
            let _ = writeln!(
                out,
                "  [{}] {}: {}",
                level_tag(alert.level),
                alert.title,
                alert.message
            );
        }

        let _ = writeln!(out, "\nRuh hali: {}", self.advice.mood);
        let _ = writeln!(out, "  {}", self.advice.advice);
        if !self.advice.activities.is_empty() {
            let _ = writeln!(out, "  Öneriler: {}", self.advice.activities.join(", "));
        }

        out.push_str("\nAktiviteler:\n");
        for activity in &self.activities {
            let _ = writeln!(out, "  {:<12} {:>2}/10", activity.label, activity.score);
            for reason in &activity.reasons {
                let _ = writeln!(out, "    {} {}", polarity_mark(reason.polarity), reason.text);
            }
        }

        match &self.next_event {
            Some(next) => {
                let _ = writeln!(
                    out,
                    "\nSıradaki olay: {} {} (kalan {})",
                    next.event.label,
                    clock(next.event.target),
                    next.countdown
                );
                if let Some(message) = &next.event.secondary_message {
                    let _ = writeln!(out, "  {message}");
                }
            }
            None => out.push_str("\nSıradaki olay: yok\n"),
        }

        if let Some(sun) = &self.sun {
            let _ = writeln!(
                out,
                "\nGüneş: doğuş {} · batış {} · gün {}",
                sun.sunrise, sun.sunset, sun.day_length
            );
            let _ = writeln!(
                out,
                "  Altın saat: {}-{}, {}-{}",
                clock(sun.golden_hour.morning.start),
                clock(sun.golden_hour.morning.end),
                clock(sun.golden_hour.evening.start),
                clock(sun.golden_hour.evening.end)
            );
        }

        match &self.air_quality {
            Some(aq) => {
                let _ = writeln!(out, "\nHava kalitesi: {} ({})", aq.european_aqi, aq.category);
                let _ = writeln!(out, "  {}", aq.advice);
            }
            None => out.push_str("\nHava kalitesi: veri yok\n"),
        }

        let _ = writeln!(out, "\nÇiy noktası: {}", self.details.dew_point);
        if let Some(uv) = &self.details.uv {
            let _ = writeln!(out, "UV: {} · {}", uv.level, uv.advice);
        }

        if !self.favorites.is_empty() {
            out.push_str("\nFavoriler:\n");
            for fav in &self.favorites {
                let _ = writeln!(out, "  {} {} km", fav.name, fav.distance_km);
            }
        }

        out
    }
}

fn level_tag(level: AlertLevel) -> &'static str {
    match level {
        AlertLevel::Info => "bilgi",
        AlertLevel::Warning => "uyarı",
        AlertLevel::Critical => "kritik",
    }
}

fn polarity_mark(polarity: Polarity) -> &'static str {
    match polarity {
        Polarity::Pos => "+",
        Polarity::Neg => "-",
        Polarity::Neutral => "·",
    }
}

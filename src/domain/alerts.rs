use serde::Serialize;

use crate::domain::weather::{
    ForecastBundle, Units, convert_temperature, is_severe_code, temperature_suffix,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeatherAlert {
    pub kind: AlertKind,
    pub level: AlertLevel,
    pub title: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Storm,
    Heat,
    Cold,
    Wind,
    Uv,
    Air,
    Rain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Info,
    Warning,
    Critical,
}

struct AlertRule {
    kind: AlertKind,
    level: AlertLevel,
    title: &'static str,
    fires: fn(&ForecastBundle) -> bool,
    message: fn(&ForecastBundle, Units) -> String,
}

const UPCOMING_RAIN_HOURS: usize = 3;

// Thresholds read the raw celsius/kph values; only the message text follows `units`.
const ALERT_RULES: &[AlertRule] = &[
    AlertRule {
        kind: AlertKind::Storm,
        level: AlertLevel::Critical,
        title: "Fırtına Uyarısı",
        fires: |b| is_severe_code(b.current.weather_code),
        message: |_, _| {
            "Dışarıda şiddetli hava koşulları hakim. Mecbur kalmadıkça güvenli alanlardan ayrılmayın."
                .to_string()
        },
    },
    AlertRule {
        kind: AlertKind::Heat,
        level: AlertLevel::Warning,
        title: "Aşırı Sıcak",
        fires: |b| b.current.temperature_2m_c > 35.0,
        message: |b, units| {
            format!(
                "Sıcaklık {}{}'ye ulaştı. Bol su tüketin ve güneşten korunun.",
                convert_temperature(b.current.temperature_2m_c, units),
                temperature_suffix(units)
            )
        },
    },
    AlertRule {
        kind: AlertKind::Cold,
        level: AlertLevel::Warning,
        title: "Don Tehlikesi",
        fires: |b| b.current.temperature_2m_c < 0.0,
        message: |_, _| {
            "Sıcaklık sıfırın altında. Buzlanmaya karşı dikkatli olun ve sıkı giyinin.".to_string()
        },
    },
    AlertRule {
        kind: AlertKind::Wind,
        level: AlertLevel::Warning,
        title: "Şiddetli Rüzgar",
        fires: |b| b.current.wind_speed_10m > 50.0,
        message: |b, _| {
            format!(
                "Rüzgar hızı {} km/s. Çatı uçması ve ağaç devrilmelerine karşı dikkatli olun.",
                b.current.wind_speed_10m
            )
        },
    },
    AlertRule {
        kind: AlertKind::Uv,
        level: AlertLevel::Critical,
        title: "Çok Yüksek UV",
        fires: |b| b.today().and_then(|d| d.uv_index_max).is_some_and(|uv| uv > 8.0),
        message: |_, _| {
            "Güneş ışınları çok zararlı seviyede. 11:00-16:00 arası doğrudan güneşe maruz kalmayın."
                .to_string()
        },
    },
    AlertRule {
        kind: AlertKind::Air,
        level: AlertLevel::Warning,
        title: "Kötü Hava Kalitesi",
        fires: |b| b.european_aqi().is_some_and(|aqi| aqi > 80.0),
        message: |_, _| {
            "Hava kirliliği yüksek seviyede. Hassas grupların dışarı çıkmaması önerilir.".to_string()
        },
    },
    AlertRule {
        kind: AlertKind::Rain,
        level: AlertLevel::Info,
        title: "Yağmur Bekleniyor",
        fires: upcoming_rain,
        message: |_, _| {
            "Önümüzdeki birkaç saat içinde yüksek yağış ihtimali var. Şemsiyenizi yanınıza alın."
                .to_string()
        },
    },
];

/// Every alert whose trigger holds, in rule order. Alerts are not mutually exclusive.
#[must_use]
pub fn detect_alerts(bundle: &ForecastBundle, units: Units) -> Vec<WeatherAlert> {
    ALERT_RULES
        .iter()
        .filter(|rule| (rule.fires)(bundle))
        .map(|rule| WeatherAlert {
            kind: rule.kind,
            level: rule.level,
            title: rule.title.to_string(),
            message: (rule.message)(bundle, units),
        })
        .collect()
}

fn upcoming_rain(bundle: &ForecastBundle) -> bool {
    if bundle.current.precipitation_mm != 0.0 {
        return false;
    }
    bundle
        .hourly
        .iter()
        .take(UPCOMING_RAIN_HOURS)
        .filter_map(|h| h.precipitation_probability)
        .any(|p| p > 70.0)
}

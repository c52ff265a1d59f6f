use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherCategory {
    Clear,
    Cloudy,
    Rain,
    Snow,
    Fog,
    Thunder,
    Unknown,
}

#[must_use]
pub fn weather_code_to_category(code: u8) -> WeatherCategory {
    match code {
        0 | 1 => WeatherCategory::Clear,
        2 | 3 => WeatherCategory::Cloudy,
        45 | 48 => WeatherCategory::Fog,
        51..=57 | 61..=67 | 80..=82 => WeatherCategory::Rain,
        71..=77 | 85..=86 => WeatherCategory::Snow,
        95 | 96 | 99 => WeatherCategory::Thunder,
        _ => WeatherCategory::Unknown,
    }
}

/// Codes the event detector treats as "precipitation is falling".
/// Freezing drizzle (56, 57) is not included.
#[must_use]
pub fn is_raining_code(code: u8) -> bool {
    matches!(
        code,
        51 | 53 | 55 | 61 | 63 | 65 | 66 | 67 | 80 | 81 | 82 | 95 | 96 | 99
    )
}

#[must_use]
pub fn is_storm_code(code: u8) -> bool {
    matches!(code, 95 | 96 | 99)
}

/// Codes that raise the storm alert: thunderstorms plus heavy rain and violent showers.
#[must_use]
pub fn is_severe_code(code: u8) -> bool {
    matches!(code, 95 | 96 | 99 | 65 | 82)
}

const WEATHER_LABELS: &[(u8, &str)] = &[
    (0, "Açık"),
    (1, "Çoğunlukla açık"),
    (2, "Parçalı bulutlu"),
    (3, "Kapalı"),
    (45, "Sisli"),
    (48, "Kırağılı sis"),
    (51, "Hafif çisenti"),
    (53, "Orta çisenti"),
    (55, "Yoğun çisenti"),
    (61, "Hafif yağmurlu"),
    (63, "Orta şiddette yağmur"),
    (65, "Şiddetli yağmur"),
    (71, "Hafif kar yağışlı"),
    (73, "Orta kar yağışlı"),
    (75, "Yoğun kar yağışlı"),
    (80, "Hafif sağanak"),
    (81, "Orta sağanak"),
    (82, "Şiddetli sağanak"),
    (95, "Fırtına"),
    (96, "Dolu karışık fırtına"),
    (99, "Şiddetli dolu fırtınası"),
];

#[must_use]
pub fn weather_label(code: u8) -> &'static str {
    WEATHER_LABELS
        .iter()
        .find_map(|(candidate, label)| (*candidate == code).then_some(*label))
        .unwrap_or("Bilinmiyor")
}

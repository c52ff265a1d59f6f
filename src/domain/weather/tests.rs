use super::*;
use proptest::prelude::*;

#[test]
fn known_codes_have_labels() {
    assert_eq!(weather_label(0), "Açık");
    assert_eq!(weather_label(82), "Şiddetli sağanak");
    assert_eq!(weather_label(99), "Şiddetli dolu fırtınası");
    assert_eq!(weather_label(42), "Bilinmiyor");
}

#[test]
fn fahrenheit_conversion_rounding() {
    assert_eq!(convert_temperature(0.0, Units::Fahrenheit), 32);
    assert_eq!(convert_temperature(100.0, Units::Fahrenheit), 212);
    assert_eq!(convert_temperature(-10.0, Units::Fahrenheit), 14);
    assert_eq!(convert_temperature(20.0, Units::Fahrenheit), 68);
}

#[test]
fn celsius_rounds_toward_nearest_integer() {
    assert_eq!(convert_temperature(-5.1, Units::Celsius), -5);
    assert_eq!(convert_temperature(21.6, Units::Celsius), 22);
    assert_eq!(convert_temperature(21.4, Units::Celsius), 21);
}

#[test]
fn unit_labels() {
    assert_eq!(unit_label(Units::Celsius), "°");
    assert_eq!(unit_label(Units::Fahrenheit), "°F");
}

#[test]
fn unknown_unit_names_fall_back_to_celsius() {
    assert_eq!(Units::from_name("fahrenheit"), Units::Fahrenheit);
    assert_eq!(Units::from_name(" Fahrenheit "), Units::Fahrenheit);
    assert_eq!(Units::from_name("kelvin"), Units::Celsius);
    assert_eq!(Units::from(""), Units::Celsius);
}

#[test]
fn abbreviated_unit_names_are_not_recognized() {
    for name in ["f", "F", "°F", "fahr", "kelvin", "celsius"] {
        assert_eq!(Units::from_name(name), Units::Celsius, "unit name {name:?}");
    }
}

#[test]
fn codes_group_into_categories() {
    assert_eq!(weather_code_to_category(1), WeatherCategory::Clear);
    assert_eq!(weather_code_to_category(3), WeatherCategory::Cloudy);
    assert_eq!(weather_code_to_category(48), WeatherCategory::Fog);
    assert_eq!(weather_code_to_category(57), WeatherCategory::Rain);
    assert_eq!(weather_code_to_category(86), WeatherCategory::Snow);
    assert_eq!(weather_code_to_category(96), WeatherCategory::Thunder);
    assert_eq!(weather_code_to_category(42), WeatherCategory::Unknown);
}

#[test]
fn raining_set_excludes_freezing_drizzle_and_snow() {
    assert!(is_raining_code(61));
    assert!(is_raining_code(95));
    assert!(!is_raining_code(56));
    assert!(!is_raining_code(71));
    assert!(!is_raining_code(3));
}

#[test]
fn severe_codes_cover_storms_and_heavy_rain() {
    for code in [95, 96, 99, 65, 82] {
        assert!(is_severe_code(code), "code {code}");
    }
    assert!(!is_severe_code(63));
    assert!(is_storm_code(96));
    assert!(!is_storm_code(82));
}

#[test]
fn air_quality_band_edges() {
    assert_eq!(
        AirQualityCategory::from_european_aqi(20.0),
        AirQualityCategory::Excellent
    );
    assert_eq!(
        AirQualityCategory::from_european_aqi(21.0),
        AirQualityCategory::Good
    );
    assert_eq!(
        AirQualityCategory::from_european_aqi(60.0),
        AirQualityCategory::Moderate
    );
    assert_eq!(
        AirQualityCategory::from_european_aqi(80.0),
        AirQualityCategory::Sensitive
    );
    assert_eq!(
        AirQualityCategory::from_european_aqi(80.5),
        AirQualityCategory::Poor
    );
    assert_eq!(AirQualityCategory::Poor.label(), "Kötü");
}

#[test]
fn parse_datetime_accepts_provider_and_rfc3339_forms() {
    let expected = NaiveDate::from_ymd_opt(2026, 2, 12)
        .unwrap()
        .and_hms_opt(18, 5, 0)
        .unwrap();
    assert_eq!(parse_datetime("2026-02-12T18:05"), Some(expected));
    assert_eq!(parse_datetime("2026-02-12T18:05:00"), Some(expected));
    assert_eq!(parse_datetime("2026-02-12T18:05:00+03:00"), Some(expected));
    assert_eq!(parse_datetime("not a date"), None);
    assert_eq!(parse_datetime(""), None);
}

#[test]
fn local_time_applies_utc_offset() {
    let mut bundle = crate::test_support::sample_bundle();
    bundle.utc_offset_seconds = 3 * 3600;
    let instant = chrono::DateTime::parse_from_rfc3339("2026-02-12T07:30:00Z")
        .unwrap()
        .with_timezone(&Utc);
    assert_eq!(
        bundle.local_time(instant),
        parse_datetime("2026-02-12T10:30").unwrap()
    );
}

proptest! {
    #[test]
    fn celsius_display_is_plain_rounding(value in -90.0f32..60.0) {
        prop_assert_eq!(convert_temperature(value, Units::Celsius), value.round() as i32);
    }

    #[test]
    fn fahrenheit_display_is_monotonic(a in -90.0f32..60.0, b in -90.0f32..60.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(
            convert_temperature(lo, Units::Fahrenheit) <= convert_temperature(hi, Units::Fahrenheit)
        );
    }
}

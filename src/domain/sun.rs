use chrono::{Duration, NaiveDateTime};
use serde::Serialize;

use crate::domain::{timefmt::format_day_length, weather::DailyForecast};

const GOLDEN_HOUR_MINUTES: i64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Photography light windows for one day: the hour after sunrise and the hour before sunset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GoldenHour {
    pub morning: TimeWindow,
    pub evening: TimeWindow,
}

#[must_use]
pub fn golden_hour(day: &DailyForecast) -> Option<GoldenHour> {
    let (sunrise, sunset) = (day.sunrise?, day.sunset?);
    let span = Duration::minutes(GOLDEN_HOUR_MINUTES);
    Some(GoldenHour {
        morning: TimeWindow {
            start: sunrise,
            end: sunrise + span,
        },
        evening: TimeWindow {
            start: sunset - span,
            end: sunset,
        },
    })
}

#[must_use]
pub fn day_length(day: &DailyForecast) -> Option<String> {
    Some(format_day_length(day.sunrise?, day.sunset?))
}

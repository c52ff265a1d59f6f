use chrono::{NaiveDateTime, Timelike};

use crate::domain::weather::parse_datetime;

pub const CLOCK_PLACEHOLDER: &str = "--:--";

const COMPASS_POINTS: [&str; 16] = [
    "K", "KKD", "KD", "DKD", "D", "DGD", "GD", "GGD", "G", "GGB", "GB", "BGB", "B", "BKB", "KB",
    "KKB",
];

/// 24-hour "HH:MM" for a provider timestamp; "--:--" when it is empty or unparseable.
#[must_use]
pub fn format_clock(timestamp: &str) -> String {
    parse_datetime(timestamp).map_or_else(|| CLOCK_PLACEHOLDER.to_string(), clock)
}

#[must_use]
pub fn clock(time: NaiveDateTime) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

/// "HH:MM:SS" for a millisecond span. Hours are not wrapped, so 100h renders as "100:00:00".
#[must_use]
pub fn format_countdown(millis: i64) -> String {
    if millis <= 0 {
        return "00:00:00".to_string();
    }
    let total_secs = millis / 1000;
    let hours = total_secs / 3600;
    let minutes = (total_secs / 60) % 60;
    let seconds = total_secs % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// 16-point compass label, Turkish initials (K north, D east, G south, B west).
#[must_use]
pub fn compass_label(degrees: f32) -> &'static str {
    let index = ((degrees / 22.5).round() as i64).rem_euclid(16) as usize;
    COMPASS_POINTS[index]
}

/// Length of daylight as "H sa M dk".
#[must_use]
pub fn format_day_length(sunrise: NaiveDateTime, sunset: NaiveDateTime) -> String {
    let minutes = (sunset - sunrise).num_minutes();
    format!("{} sa {} dk", minutes / 60, minutes % 60)
}

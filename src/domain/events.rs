use chrono::{Duration, DurationRound, NaiveDateTime, Timelike};
use serde::Serialize;
use tracing::debug;

use crate::domain::{
    timefmt::{clock, format_countdown},
    weather::{ForecastBundle, HourlyForecast, is_raining_code, is_storm_code},
};

/// Hours scanned after the current one when looking for a precipitation boundary.
const LOOKAHEAD_HOURS: usize = 11;
const RAIN_CONTINUES_PLACEHOLDER_HOURS: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    RainEnd,
    RainContinuing,
    RainStart,
    StormStart,
    Sunset,
    Sunrise,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventTarget {
    pub target: NaiveDateTime,
    pub label: String,
    pub secondary_message: Option<String>,
    pub category: EventCategory,
}

impl EventTarget {
    fn new(
        target: NaiveDateTime,
        category: EventCategory,
        label: &str,
        secondary: Option<String>,
    ) -> Self {
        Self {
            target,
            label: label.to_string(),
            secondary_message: secondary,
            category,
        }
    }
}

/// The next precipitation or sun transition after `now` (location-local wall clock).
///
/// Returns `None` when no hourly row shares `now`'s hour, or when the sun fallback needs
/// a sunrise/sunset the provider did not send.
#[must_use]
pub fn next_significant_event(bundle: &ForecastBundle, now: NaiveDateTime) -> Option<EventTarget> {
    let Some(current_index) = bundle
        .hourly
        .iter()
        .position(|h| h.time.hour() == now.hour())
    else {
        debug!(hour = now.hour(), "no hourly row for current hour");
        return None;
    };
    let ahead = lookahead(&bundle.hourly, current_index);

    let event = if is_raining_code(bundle.current.weather_code) {
        Some(rain_end_event(ahead, now))
    } else {
        rain_start_event(ahead)
    };

    event.or_else(|| sun_event(bundle, now))
}

/// Live "HH:MM:SS" until the target; "00:00:00" once it has passed.
#[must_use]
pub fn live_countdown(target: &EventTarget, now: NaiveDateTime) -> String {
    format_countdown((target.target - now).num_milliseconds())
}

fn lookahead(hourly: &[HourlyForecast], current_index: usize) -> &[HourlyForecast] {
    let start = (current_index + 1).min(hourly.len());
    let end = (start + LOOKAHEAD_HOURS).min(hourly.len());
    &hourly[start..end]
}

fn rain_end_event(ahead: &[HourlyForecast], now: NaiveDateTime) -> EventTarget {
    ahead
        .iter()
        .find(|h| h.weather_code.is_some_and(|code| !is_raining_code(code)))
        .map_or_else(
            || {
                EventTarget::new(
                    now + Duration::hours(RAIN_CONTINUES_PLACEHOLDER_HOURS),
                    EventCategory::RainContinuing,
                    "Yağış Devam Ediyor",
                    Some("Şemsiyenizi yanınızdan ayırmayın.".to_string()),
                )
            },
            |hour| {
                EventTarget::new(
                    hour.time,
                    EventCategory::RainEnd,
                    "Yağış Bitişi",
                    Some(format!(
                        "Yağışın saat {} civarında durması bekleniyor.",
                        clock(hour.time)
                    )),
                )
            },
        )
}

fn rain_start_event(ahead: &[HourlyForecast]) -> Option<EventTarget> {
    let (hour, code) = ahead
        .iter()
        .find_map(|h| h.weather_code.filter(|c| is_raining_code(*c)).map(|c| (h, c)))?;
    let probability = hour
        .precipitation_probability
        .map(|p| format!(" Yağış ihtimali %{p}."))
        .unwrap_or_default();

    Some(if is_storm_code(code) {
        EventTarget::new(
            hour.time,
            EventCategory::StormStart,
            "Fırtına Başlangıcı",
            Some(format!("Dışarıdaki planlarınıza dikkat edin.{probability}")),
        )
    } else {
        EventTarget::new(
            hour.time,
            EventCategory::RainStart,
            "Yağmur Başlangıcı",
            Some(format!(
                "Saat {} civarında yağmur başlayabilir.{probability}",
                clock(hour.time)
            )),
        )
    })
}

fn sun_event(bundle: &ForecastBundle, now: NaiveDateTime) -> Option<EventTarget> {
    let tomorrow_sunrise = || bundle.tomorrow().and_then(|d| d.sunrise);
    let sunrise_message = || Some("Aydınlık bir sabaha uyanacaksınız.".to_string());

    if bundle.current.is_day {
        let sunset = bundle.today().and_then(|d| d.sunset)?;
        if now > sunset {
            return tomorrow_sunrise().map(|at| {
                EventTarget::new(
                    at,
                    EventCategory::Sunrise,
                    "Yarın Gün Doğumu",
                    sunrise_message(),
                )
            });
        }
        return Some(EventTarget::new(
            sunset,
            EventCategory::Sunset,
            "Gün Batımı",
            Some("Altın saat yaklaşıyor.".to_string()),
        ));
    }

    let sunrise = bundle
        .today()
        .and_then(|d| d.sunrise)
        .filter(|at| *at > now)
        .or_else(tomorrow_sunrise)?;
    Some(EventTarget::new(
        sunrise,
        EventCategory::Sunrise,
        "Gün Doğumu",
        sunrise_message(),
    ))
}

/// Keeps the active target between clock ticks.
///
/// The target is recomputed when the wall clock enters a new hour, when the target
/// instant is reached, or after [`EventHorizon::reset`] (new snapshot). A recompute
/// replaces the previous target, so any countdown bound to it must restart.
#[derive(Debug, Clone, Default)]
pub struct EventHorizon {
    hour_bucket: Option<NaiveDateTime>,
    target: Option<EventTarget>,
}

impl EventHorizon {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when the target was recomputed on this call.
    pub fn refresh(&mut self, bundle: &ForecastBundle, now: NaiveDateTime) -> bool {
        let bucket = hour_bucket(now);
        let reached = self.target.as_ref().is_some_and(|t| now >= t.target);
        if self.hour_bucket == Some(bucket) && !reached {
            return false;
        }
        self.target = next_significant_event(bundle, now);
        self.hour_bucket = Some(bucket);
        debug!(
            target_event = ?self.target.as_ref().map(|t| t.category),
            "event horizon recomputed"
        );
        true
    }

    pub fn reset(&mut self) {
        self.hour_bucket = None;
        self.target = None;
    }

    #[must_use]
    pub fn target(&self) -> Option<&EventTarget> {
        self.target.as_ref()
    }

    #[must_use]
    pub fn countdown(&self, now: NaiveDateTime) -> Option<String> {
        self.target.as_ref().map(|t| live_countdown(t, now))
    }
}

fn hour_bucket(now: NaiveDateTime) -> NaiveDateTime {
    now.duration_trunc(Duration::hours(1)).unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{parse_time, sample_bundle};

    fn raining_now(code: u8) -> ForecastBundle {
        let mut bundle = sample_bundle();
        bundle.current.weather_code = code;
        for hour in &mut bundle.hourly {
            hour.weather_code = Some(code);
        }
        bundle
    }

    #[test]
    fn rain_ending_two_hours_out() {
        let mut bundle = raining_now(61);
        bundle.hourly[12].weather_code = Some(1);
        let now = parse_time("2026-02-12T10:20");

        let event = next_significant_event(&bundle, now).expect("event");
        assert_eq!(event.label, "Yağış Bitişi");
        assert_eq!(event.category, EventCategory::RainEnd);
        assert_eq!(event.target, parse_time("2026-02-12T12:00"));
    }

    #[test]
    fn rain_beyond_window_yields_placeholder_three_hours_out() {
        let mut bundle = raining_now(63);
        // 12 hours after 10:00 is outside the 11-hour window
        bundle.hourly[22].weather_code = Some(0);
        let now = parse_time("2026-02-12T10:15");

        let event = next_significant_event(&bundle, now).expect("event");
        assert_eq!(event.category, EventCategory::RainContinuing);
        assert_eq!(event.label, "Yağış Devam Ediyor");
        assert_eq!(event.target, parse_time("2026-02-12T13:15"));
    }

    #[test]
    fn last_hour_of_window_still_counts() {
        let mut bundle = raining_now(80);
        bundle.hourly[21].weather_code = Some(2);
        let event = next_significant_event(&bundle, parse_time("2026-02-12T10:00")).unwrap();
        assert_eq!(event.category, EventCategory::RainEnd);
        assert_eq!(event.target, parse_time("2026-02-12T21:00"));
    }

    #[test]
    fn rain_start_mentions_probability() {
        let mut bundle = sample_bundle();
        bundle.hourly[14].weather_code = Some(61);
        bundle.hourly[14].precipitation_probability = Some(65.0);

        let event = next_significant_event(&bundle, parse_time("2026-02-12T10:40")).unwrap();
        assert_eq!(event.category, EventCategory::RainStart);
        assert_eq!(event.label, "Yağmur Başlangıcı");
        assert_eq!(event.target, parse_time("2026-02-12T14:00"));
        assert!(event.secondary_message.unwrap().contains("%65"));
    }

    #[test]
    fn storm_start_is_labelled_separately() {
        let mut bundle = sample_bundle();
        bundle.hourly[13].weather_code = Some(96);
        let event = next_significant_event(&bundle, parse_time("2026-02-12T10:00")).unwrap();
        assert_eq!(event.category, EventCategory::StormStart);
        assert_eq!(event.label, "Fırtına Başlangıcı");
    }

    #[test]
    fn dry_day_counts_down_to_sunset() {
        let bundle = sample_bundle();
        let event = next_significant_event(&bundle, parse_time("2026-02-12T10:00")).unwrap();
        assert_eq!(event.category, EventCategory::Sunset);
        assert_eq!(event.label, "Gün Batımı");
        assert_eq!(event.target, parse_time("2026-02-12T17:20"));
        assert!(event.secondary_message.is_some());
    }

    #[test]
    fn day_flag_after_sunset_targets_tomorrow_sunrise() {
        let bundle = sample_bundle();
        let event = next_significant_event(&bundle, parse_time("2026-02-12T17:45")).unwrap();
        assert_eq!(event.label, "Yarın Gün Doğumu");
        assert_eq!(event.target, parse_time("2026-02-13T07:30"));
    }

    #[test]
    fn night_targets_next_sunrise_strictly_after_now() {
        let mut bundle = sample_bundle();
        bundle.current.is_day = false;

        let early = next_significant_event(&bundle, parse_time("2026-02-12T05:00")).unwrap();
        assert_eq!(early.category, EventCategory::Sunrise);
        assert_eq!(early.target, parse_time("2026-02-12T07:30"));

        let late = next_significant_event(&bundle, parse_time("2026-02-12T22:00")).unwrap();
        assert_eq!(late.target, parse_time("2026-02-13T07:30"));
    }

    #[test]
    fn missing_current_hour_yields_none() {
        let mut bundle = sample_bundle();
        bundle.hourly.truncate(3);
        assert!(next_significant_event(&bundle, parse_time("2026-02-12T10:00")).is_none());
    }

    #[test]
    fn missing_sun_times_yield_none() {
        let mut bundle = sample_bundle();
        bundle.daily.clear();
        assert!(next_significant_event(&bundle, parse_time("2026-02-12T10:00")).is_none());
    }

    #[test]
    fn countdown_to_target() {
        let bundle = sample_bundle();
        let now = parse_time("2026-02-12T16:18");
        let event = next_significant_event(&bundle, now).unwrap();
        assert_eq!(live_countdown(&event, now), "01:02:00");
        assert_eq!(live_countdown(&event, parse_time("2026-02-12T18:00")), "00:00:00");
    }

    #[test]
    fn detection_is_idempotent() {
        let bundle = sample_bundle();
        let now = parse_time("2026-02-12T09:59");
        assert_eq!(
            next_significant_event(&bundle, now),
            next_significant_event(&bundle, now)
        );
    }

    #[test]
    fn horizon_recomputes_on_new_hour_and_on_reaching_target() {
        let mut bundle = sample_bundle();
        let mut horizon = EventHorizon::new();
        assert!(horizon.refresh(&bundle, parse_time("2026-02-12T10:05")));
        assert!(!horizon.refresh(&bundle, parse_time("2026-02-12T10:59")));

        bundle.hourly[12].weather_code = Some(61);
        // same hour: the stale sunset target is kept
        assert!(!horizon.refresh(&bundle, parse_time("2026-02-12T10:59")));
        assert_eq!(horizon.target().unwrap().category, EventCategory::Sunset);

        assert!(horizon.refresh(&bundle, parse_time("2026-02-12T11:00")));
        let target = horizon.target().unwrap();
        assert_eq!(target.category, EventCategory::RainStart);

        assert!(!horizon.refresh(&bundle, parse_time("2026-02-12T11:00")));
        assert_eq!(
            horizon.countdown(parse_time("2026-02-12T11:30")).as_deref(),
            Some("00:30:00")
        );
    }

    #[test]
    fn horizon_reset_forces_recompute() {
        let bundle = sample_bundle();
        let mut horizon = EventHorizon::new();
        horizon.refresh(&bundle, parse_time("2026-02-12T10:05"));
        horizon.reset();
        assert!(horizon.target().is_none());
        assert!(horizon.refresh(&bundle, parse_time("2026-02-12T10:06")));
    }
}

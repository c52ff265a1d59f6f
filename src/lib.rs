pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod resilience;

#[cfg(test)]
mod test_support;

use std::io::{self, Write};
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDateTime, Utc};
use tracing::{debug, info};

use app::{
    report::InsightReport,
    settings::{Settings, load_settings, settings_path},
};
use cli::Cli;
use data::forecast::{AIR_QUALITY_URL, FORECAST_URL, ForecastClient, parse_snapshot};
use domain::{
    events::EventHorizon,
    timefmt::clock,
    weather::{ForecastBundle, Location},
};

pub async fn run(cli: Cli) -> Result<()> {
    cli.validate()?;

    let mut settings = settings_path()
        .map(|path| load_settings(&path))
        .unwrap_or_default();
    settings.apply_cli(&cli);

    let bundle = load_bundle(&cli).await?;
    let pinned_now = cli.now;
    let now = pinned_now.unwrap_or_else(|| bundle.local_time(Utc::now()));
    debug!(%now, units = ?settings.units, "evaluating snapshot");

    if cli.watch {
        return watch(&bundle, pinned_now).await;
    }

    print_report(&bundle, &settings, &cli, now)
}

async fn load_bundle(cli: &Cli) -> Result<ForecastBundle> {
    if let Some(path) = &cli.input {
        let body = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading snapshot {} failed", path.display()))?;
        info!(path = %path.display(), "loaded forecast snapshot");
        return parse_snapshot(&body, cli.name.as_deref())
            .with_context(|| format!("parsing snapshot {} failed", path.display()));
    }

    let (Some(lat), Some(lon)) = (cli.lat, cli.lon) else {
        anyhow::bail!("either --input or --lat/--lon is required");
    };
    let mut location = Location::from_coords(lat, lon);
    if let Some(name) = &cli.name {
        location.name.clone_from(name);
    }

    let client = ForecastClient::with_base_urls(
        cli.forecast_url.as_deref().unwrap_or(FORECAST_URL),
        cli.air_quality_url.as_deref().unwrap_or(AIR_QUALITY_URL),
    )
    .context("building forecast client failed")?;
    client
        .fetch(location)
        .await
        .context("fetching forecast failed")
}

fn print_report(
    bundle: &ForecastBundle,
    settings: &Settings,
    cli: &Cli,
    now: NaiveDateTime,
) -> Result<()> {
    let mut report = InsightReport::build(bundle, settings.units, now, &settings.favorites);
    report.retain_activities(&cli.selected_activities());

    let mut stdout = io::stdout().lock();
    if cli.json {
        let payload =
            serde_json::to_string_pretty(&report).context("serializing report failed")?;
        writeln!(stdout, "{payload}")?;
    } else {
        write!(stdout, "{}", report.render_text())?;
    }
    Ok(())
}

/// Ticks once a second until Ctrl-C. A pinned `--now` advances with the real clock.
async fn watch(bundle: &ForecastBundle, pinned_now: Option<NaiveDateTime>) -> Result<()> {
    let started = Instant::now();
    let clock_now = || match pinned_now {
        Some(start) => {
            start + Duration::from_std(started.elapsed()).unwrap_or_else(|_| Duration::zero())
        }
        None => bundle.local_time(Utc::now()),
    };

    let mut horizon = EventHorizon::new();
    let mut ticker = tokio::time::interval(std::time::Duration::from_secs(1));
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut stdout = io::stdout();
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let now = clock_now();
                if horizon.refresh(bundle, now) {
                    match horizon.target() {
                        Some(target) => {
                            writeln!(stdout, "\n{} · {}", target.label, clock(target.target))?;
                            if let Some(message) = &target.secondary_message {
                                writeln!(stdout, "{message}")?;
                            }
                        }
                        None => writeln!(stdout, "\nSıradaki olay yok")?,
                    }
                }
                if let Some(countdown) = horizon.countdown(now) {
                    write!(stdout, "\r{countdown}")?;
                    stdout.flush()?;
                }
            }
            result = &mut ctrl_c => {
                result.context("listening for ctrl-c failed")?;
                writeln!(stdout)?;
                return Ok(());
            }
        }
    }
}

pub mod config;

mod dashboard;
mod feed;
mod models;
mod renderer;
mod status;

pub use models::{MachineRegistry, SensorReading};
pub use status::{classify, MetricKind, Status};

use crate::config::AppConfig;
use crate::feed::{FeedError, SensorFeed};
use crate::renderer::fonts::FontSet;
use anyhow::Context;
use log::{debug, error, info, warn};
use std::time::Duration;

pub async fn run() -> anyhow::Result<()> {
    info!("Starting dashboard");

    tokio::select! {
        result = main_loop() => {
            match result {
                Ok(_) => info!("Dashboard completed successfully"),
                Err(e) => {
                    error!("Dashboard error: {e:#}");
                    // Print chain of error causes
                    let mut source = e.source();
                    while let Some(e) = source {
                        error!("Caused by: {e}");
                        source = e.source();
                    }
                    return Err(e).context("Dashboard failed to run");
                }
            }
        }
        _ = tokio::signal::ctrl_c() => {
            // Teardown is lifecycle-bound: dropping the loop future cancels
            // the interval and any in-flight fetch
            info!("Shutdown requested, stopping refresh loop");
        }
    }

    Ok(())
}

async fn main_loop() -> anyhow::Result<()> {
    debug!("Loading configuration");
    let config = AppConfig::new().unwrap_or_else(|e| {
        warn!("Falling back to default configuration: {e:#}");
        AppConfig::default()
    });

    let mut registry = config.machines.seed_registry();
    info!("Tracking {} machines", registry.len());

    let polling = config.dashboard.polling.max(1);
    let feed = if config.feed.enabled {
        let timeout = Duration::from_secs(config.feed.timeout_secs(polling));
        let feed = SensorFeed::new(&config.feed.url, timeout)
            .context("Failed to build sensor feed client")?;
        info!("Polling sensor feed at {}", config.feed.url);
        Some(feed)
    } else {
        info!("Sensor feed disabled, showing seeded readings only");
        None
    };

    let mut interval = tokio::time::interval(Duration::from_secs(polling));
    let mut fonts: Option<FontSet> = None;

    loop {
        interval.tick().await; // Wait for the next tick

        if let Some(ref feed) = feed {
            refresh_registry(&mut registry, feed).await;
        }

        if fonts.is_none() {
            match FontSet::load(&config.dashboard.font) {
                Ok(set) => fonts = Some(set),
                Err(e) => {
                    error!("Failed to load dashboard font: {e:#}");
                    continue;
                }
            }
        }

        if let Some(ref fonts) = fonts {
            let img = dashboard::create_image(&config, &registry, fonts);

            if config.dashboard.save_to_file {
                if let Err(e) = dashboard::save_image(&config, &img) {
                    error!("Failed to write dashboard image: {e:#}");
                }
            }
        }
    }
}

/// Fetch a fresh reading for every tracked machine, one at a time.
///
/// Awaiting each fetch inline keeps at most one request in flight, so a slow
/// endpoint delays the next tick instead of stacking requests.
async fn refresh_registry(registry: &mut MachineRegistry, feed: &SensorFeed) {
    for id in registry.ids() {
        let result = feed.fetch_reading(&id).await;
        apply_fetch(registry, &id, result);
    }
}

/// Replace the stored reading wholesale on success; on failure log and keep
/// the last known good reading.
fn apply_fetch(registry: &mut MachineRegistry, id: &str, result: Result<SensorReading, FeedError>) {
    match result {
        Ok(reading) => {
            debug!("Updated reading for {id}");
            registry.insert(id, reading);
        }
        Err(e) => error!("Fetch failed for {id}: {e}"),
    }
}

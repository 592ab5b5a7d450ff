//! Periodic fetch-and-publish loop.

use crate::domain::errors::ConfigError;
use crate::domain::ports::{SnapshotPublisher, StationFetcher};
use crate::domain::station::StationSnapshot;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, error, info, warn};

/// Upper bound on polled stations; the price API accepts at most ten ids
/// per multi-station query.
pub const MAX_STATIONS: usize = 10;

/// Station ids to poll, capped at [`MAX_STATIONS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationIds {
    ids: Vec<String>,
    ignored: usize,
}

impl StationIds {
    /// Keep the first [`MAX_STATIONS`] ids. Warns once if any are dropped.
    pub fn new(mut ids: Vec<String>) -> Result<Self, ConfigError> {
        if ids.is_empty() {
            return Err(ConfigError::NoStations);
        }

        let ignored = ids.len().saturating_sub(MAX_STATIONS);
        if ignored > 0 {
            warn!(
                "More than {} station IDs given; ignoring the remaining {}.",
                MAX_STATIONS, ignored
            );
            ids.truncate(MAX_STATIONS);
        }

        Ok(Self { ids, ignored })
    }

    pub fn as_slice(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Number of ids dropped by the cap.
    pub fn ignored(&self) -> usize {
        self.ignored
    }
}

/// Counters for one pass over all stations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub fetched: usize,
    pub fetch_failures: usize,
    pub publish_failures: usize,
}

impl CycleReport {
    pub fn is_clean(&self) -> bool {
        self.fetch_failures == 0 && self.publish_failures == 0
    }
}

pub struct PollScheduler {
    fetcher: Arc<dyn StationFetcher>,
    publishers: Vec<Arc<dyn SnapshotPublisher>>,
    stations: StationIds,
    interval: Duration,
}

impl PollScheduler {
    pub fn new(
        fetcher: Arc<dyn StationFetcher>,
        publishers: Vec<Arc<dyn SnapshotPublisher>>,
        stations: StationIds,
        interval: Duration,
    ) -> Self {
        Self {
            fetcher,
            publishers,
            stations,
            interval,
        }
    }

    pub fn stations(&self) -> &StationIds {
        &self.stations
    }

    /// Fetch every station once, in order, and forward each snapshot to all
    /// publishers. Failures are logged and counted, never propagated.
    pub async fn run_cycle(&self) -> CycleReport {
        let mut report = CycleReport::default();

        for id in self.stations.as_slice() {
            debug!("Checking prices for id {}", id);

            let snapshot = match self.fetcher.fetch(id).await {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    warn!("Could not get details for station {}: {}", id, e);
                    report.fetch_failures += 1;
                    continue;
                }
            };
            report.fetched += 1;

            let timestamp = Utc::now();
            log_snapshot(&snapshot, &timestamp.to_rfc3339());

            for publisher in &self.publishers {
                if let Err(e) = publisher.publish(&snapshot, timestamp).await {
                    error!(
                        "Publishing station {} to {} failed: {}",
                        snapshot.id,
                        publisher.name(),
                        e
                    );
                    report.publish_failures += 1;
                }
            }
        }

        report
    }

    /// Run cycles every `interval` until `shutdown` becomes `true`.
    ///
    /// The first cycle starts one interval after the call. A cycle that has
    /// started always completes; no fetch is issued once shutdown was seen.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        info!(
            "Checking prices for {} station(s) every {:?}",
            self.stations.len(),
            self.interval
        );

        // tokio rejects a zero period
        let period = self.interval.max(Duration::from_millis(1));
        let mut ticker = time::interval_at(time::Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            if *shutdown.borrow() {
                break;
            }

            tokio::select! {
                // shutdown wins over a tick that is ready at the same time
                biased;

                changed = shutdown.changed() => {
                    // a dropped sender also means stop
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    let report = self.run_cycle().await;
                    debug!(
                        "Cycle done: {} fetched, {} fetch failures, {} publish failures",
                        report.fetched, report.fetch_failures, report.publish_failures
                    );
                }
            }
        }

        info!("Shutting down ticker");
    }
}

fn log_snapshot(snapshot: &StationSnapshot, time: &str) {
    let show = |price: Option<f64>| match price {
        Some(p) => format!("{} €/l", p),
        None => "-".to_string(),
    };

    info!("{} ({})", snapshot.label(), snapshot.id);
    info!("  Time:   {}", time);
    info!("  Open:   {}", snapshot.open);
    info!("  Diesel: {}", show(snapshot.diesel));
    info!("  E5:     {}", show(snapshot.e5));
    info!("  E10:    {}", show(snapshot.e10));
}

//! Composition of fetcher, publishers and scheduler for both run modes.

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::application::publishers::{InfluxPublisher, MetricsPublisher};
use crate::application::scheduler::{CycleReport, PollScheduler, StationIds};
use crate::application::shutdown::{self, ShutdownTrigger};
use crate::config::{ExporterConfig, InfluxConfig};
use crate::domain::ports::{SnapshotPublisher, StationFetcher};
use crate::infrastructure::observability::{PriceMetrics, server};
use crate::infrastructure::tankerkoenig::TankerkoenigClient;

/// Continuous mode: poll on an interval and serve the gauges to scrapers
/// until interrupted.
pub async fn run_exporter(config: ExporterConfig) -> Result<()> {
    let (trigger, _) = shutdown::channel();
    let signal_handle = trigger.clone().watch_interrupt();

    let result = serve_exporter(config, trigger).await;

    signal_handle.abort();
    result
}

/// Continuous mode driven by an external trigger. Returns once `trigger`
/// fired and both the poller and the scrape server have stopped.
pub async fn serve_exporter(config: ExporterConfig, trigger: ShutdownTrigger) -> Result<()> {
    let stations = StationIds::new(config.station_ids.clone())?;
    let metrics = PriceMetrics::new().context("Failed to create metrics registry")?;
    let fetcher: Arc<dyn StationFetcher> = Arc::new(TankerkoenigClient::new(&config.api));
    let publisher: Arc<dyn SnapshotPublisher> = Arc::new(MetricsPublisher::new(metrics.clone()));

    let scheduler = PollScheduler::new(fetcher, vec![publisher], stations, config.interval);

    let scheduler_shutdown = trigger.subscribe();
    let scheduler_handle = tokio::spawn(async move {
        scheduler.run(scheduler_shutdown).await;
    });

    let served = server::serve(
        metrics,
        &config.bind_address,
        &config.metrics_path,
        trigger.subscribe(),
    )
    .await;

    // a server that failed to start must not leave the poller running
    trigger.trigger();
    let _ = scheduler_handle.await;

    served.with_context(|| format!("Metrics server on {} failed", config.bind_address))?;
    info!("Shutting down program");
    Ok(())
}

/// One-shot mode: fetch every station once and write one point per
/// station. Failures are reported in the returned counters.
pub async fn run_influx_once(config: InfluxConfig) -> Result<CycleReport> {
    let stations = StationIds::new(config.station_ids.clone())?;
    let fetcher: Arc<dyn StationFetcher> = Arc::new(TankerkoenigClient::new(&config.api));
    let publisher: Arc<dyn SnapshotPublisher> = Arc::new(InfluxPublisher::new(config.target));

    // the interval is unused for a single pass
    let scheduler = PollScheduler::new(fetcher, vec![publisher], stations, Duration::ZERO);
    let report = scheduler.run_cycle().await;

    if report.is_clean() {
        info!("Wrote {} station(s)", report.fetched);
    } else {
        warn!(
            "Finished with {} fetch failure(s) and {} write failure(s)",
            report.fetch_failures, report.publish_failures
        );
    }

    Ok(report)
}

use crate::domain::errors::PublishError;
use crate::domain::ports::SnapshotPublisher;
use crate::domain::station::{FuelGrade, StationSnapshot};
use crate::infrastructure::observability::PriceMetrics;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

/// A series that was left untouched because the snapshot had no value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkippedSeries {
    OpenState,
    Price(FuelGrade),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordOutcome {
    /// Number of gauge set operations performed.
    pub updated: usize,
    pub skipped: Vec<SkippedSeries>,
}

/// Copies station snapshots into the scrape gauges.
#[derive(Clone)]
pub struct MetricsPublisher {
    metrics: PriceMetrics,
}

impl MetricsPublisher {
    pub fn new(metrics: PriceMetrics) -> Self {
        Self { metrics }
    }

    pub fn metrics(&self) -> &PriceMetrics {
        &self.metrics
    }

    /// Set open-state and every present price for the snapshot's station.
    /// Missing values are an expected condition and only logged.
    pub fn record(&self, snapshot: &StationSnapshot) -> RecordOutcome {
        let label = snapshot.label();
        let mut outcome = RecordOutcome::default();

        match snapshot.open.as_gauge() {
            Some(value) => {
                debug!("Publishing Open state {} as {}", label, snapshot.open);
                self.metrics.set_open_state(&label, value);
                outcome.updated += 1;
            }
            None => {
                info!("{} has no state for Open", label);
                outcome.skipped.push(SkippedSeries::OpenState);
            }
        }

        for grade in FuelGrade::ALL {
            match snapshot.price(grade) {
                Some(price) => {
                    debug!("Publishing {} price {} at {}", grade, label, price);
                    self.metrics.set_price(grade, &label, price);
                    outcome.updated += 1;
                }
                None => {
                    info!("{} has no price for {}", label, grade);
                    outcome.skipped.push(SkippedSeries::Price(grade));
                }
            }
        }

        outcome
    }
}

#[async_trait]
impl SnapshotPublisher for MetricsPublisher {
    fn name(&self) -> &'static str {
        "prometheus"
    }

    async fn publish(
        &self,
        snapshot: &StationSnapshot,
        _timestamp: DateTime<Utc>,
    ) -> Result<(), PublishError> {
        self.record(snapshot);
        Ok(())
    }
}

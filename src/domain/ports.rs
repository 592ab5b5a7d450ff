use crate::domain::errors::{FetchError, PublishError};
use crate::domain::station::StationSnapshot;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Source of station snapshots. Authentication is the implementation's
/// business.
#[async_trait]
pub trait StationFetcher: Send + Sync {
    async fn fetch(&self, id: &str) -> Result<StationSnapshot, FetchError>;
}

/// Sink that a fetched snapshot is forwarded to.
#[async_trait]
pub trait SnapshotPublisher: Send + Sync {
    /// Short name used in log lines.
    fn name(&self) -> &'static str;

    async fn publish(
        &self,
        snapshot: &StationSnapshot,
        timestamp: DateTime<Utc>,
    ) -> Result<(), PublishError>;
}

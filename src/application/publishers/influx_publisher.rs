use crate::config::InfluxTarget;
use crate::domain::errors::{ConfigError, PublishError};
use crate::domain::ports::SnapshotPublisher;
use crate::domain::station::StationSnapshot;
use crate::infrastructure::influx::{InfluxClient, Point};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;

pub const MEASUREMENT: &str = "price";

/// Writes one `price` point per snapshot to InfluxDB.
pub struct InfluxPublisher {
    client: InfluxClient,
}

impl InfluxPublisher {
    pub fn new(target: InfluxTarget) -> Self {
        Self {
            client: InfluxClient::new(target),
        }
    }

    /// Parse the destination URL. Fails before any connection is made when
    /// the URL names no database.
    pub fn from_url(raw: &str) -> Result<Self, ConfigError> {
        Ok(Self::new(InfluxTarget::parse(raw)?))
    }

    pub fn target(&self) -> &InfluxTarget {
        self.client.target()
    }
}

/// Build the point for one snapshot: station attributes as tags, present
/// prices as fields.
pub fn station_point(
    snapshot: &StationSnapshot,
    timestamp: DateTime<Utc>,
) -> Result<Point, PublishError> {
    let mut point = Point::new(MEASUREMENT, timestamp.timestamp())
        .tag("station.id", snapshot.id.as_str())
        .tag("station.brand", snapshot.brand.as_str())
        .tag("station.is-open", snapshot.open.to_string())
        .tag("station.name", snapshot.name.as_str())
        .tag("station.place", snapshot.place.as_str())
        .tag("station.postcode", snapshot.post_code.clone().unwrap_or_default());

    for (grade, price) in snapshot.prices() {
        point = point.field(grade.field_name(), price);
    }

    if point.fields.is_empty() {
        return Err(PublishError::NoFields {
            id: snapshot.id.clone(),
        });
    }

    Ok(point)
}

#[async_trait]
impl SnapshotPublisher for InfluxPublisher {
    fn name(&self) -> &'static str {
        "influxdb"
    }

    async fn publish(
        &self,
        snapshot: &StationSnapshot,
        timestamp: DateTime<Utc>,
    ) -> Result<(), PublishError> {
        let point = station_point(snapshot, timestamp)?;
        self.client.write(&point).await?;
        debug!(
            "Wrote {} to database {}",
            snapshot.id,
            self.target().database
        );
        Ok(())
    }
}

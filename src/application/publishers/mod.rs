// Scrape gauges
pub mod metrics_publisher;

// Time-series push
pub mod influx_publisher;

pub use influx_publisher::InfluxPublisher;
pub use metrics_publisher::MetricsPublisher;

//! Configuration module for fuelwatch.
//!
//! Startup configuration is assembled from command line flags and
//! environment variables. Every failure here is fatal.

mod api_config;
mod influx_config;
mod interval;

pub use api_config::{API_KEY_ENV, ApiConfig, BASE_URL_ENV, DEFAULT_BASE_URL};
pub use influx_config::{INFLUXDB_URL_ENV, InfluxTarget, database_from_path};
pub use interval::{DEFAULT_INTERVAL, parse_interval};

use crate::cli::{ExporterArgs, InfluxArgs};
use crate::domain::errors::ConfigError;
use std::time::Duration;

/// Configuration of the continuous scrape exporter.
#[derive(Debug, Clone)]
pub struct ExporterConfig {
    pub api: ApiConfig,
    pub station_ids: Vec<String>,
    pub interval: Duration,
    pub bind_address: String,
    pub metrics_path: String,
}

impl ExporterConfig {
    pub fn from_args(args: &ExporterArgs) -> Result<Self, ConfigError> {
        let api = ApiConfig::from_env()?;
        Self::with_api(args, api)
    }

    pub fn with_api(args: &ExporterArgs, api: ApiConfig) -> Result<Self, ConfigError> {
        if args.common.station_ids.is_empty() {
            return Err(ConfigError::NoStations);
        }

        let metrics_path = if args.metrics_path.starts_with('/') {
            args.metrics_path.clone()
        } else {
            format!("/{}", args.metrics_path)
        };

        Ok(Self {
            api,
            station_ids: args.common.station_ids.clone(),
            interval: parse_interval(&args.interval)?,
            bind_address: args.bind_address.clone(),
            metrics_path,
        })
    }
}

/// Configuration of the one-shot time-series push.
#[derive(Debug, Clone)]
pub struct InfluxConfig {
    pub api: ApiConfig,
    pub station_ids: Vec<String>,
    pub target: InfluxTarget,
}

impl InfluxConfig {
    pub fn from_args(args: &InfluxArgs) -> Result<Self, ConfigError> {
        if args.common.station_ids.is_empty() {
            return Err(ConfigError::NoStations);
        }

        Ok(Self {
            api: ApiConfig::from_env()?,
            station_ids: args.common.station_ids.clone(),
            target: InfluxTarget::from_env()?,
        })
    }
}

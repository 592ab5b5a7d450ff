use thiserror::Error;

/// Problems with the startup configuration. All of them are fatal.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Required environment variable {name} not present")]
    MissingEnv { name: &'static str },

    #[error("No station ID given")]
    NoStations,

    #[error("Invalid interval {input:?}: {reason}")]
    InvalidInterval { input: String, reason: String },

    #[error("Invalid InfluxDB URL {input:?}: {reason}")]
    InvalidUrl { input: String, reason: String },

    #[error("Database missing in InfluxDB URL {url}")]
    MissingDatabase { url: String },
}

/// Errors from the station price lookup.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request for station {id} failed: {reason}")]
    Transport { id: String, reason: String },

    #[error("Price API returned status {status} for station {id}")]
    Status { id: String, status: u16 },

    #[error("Price API rejected station {id}: {message}")]
    Api { id: String, message: String },

    #[error("Could not decode response for station {id}: {reason}")]
    Decode { id: String, reason: String },
}

/// Errors from writing a snapshot to a sink.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Snapshot for station {id} has no price fields to write")]
    NoFields { id: String },

    #[error("Time-series write failed: {reason}")]
    Transport { reason: String },

    #[error("Time-series store rejected write with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

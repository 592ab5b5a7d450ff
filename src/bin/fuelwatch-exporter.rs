//! fuelwatch exporter - Prometheus scrape endpoint for fuel prices
//!
//! Polls the Tankerkönig API for up to ten stations on a fixed interval and
//! serves the latest prices and open-state as gauges.
//!
//! # Usage
//! ```sh
//! TANKERKOENIG_API_KEY=... fuelwatch-exporter -i 10m <STATION_ID>...
//! ```
//!
//! # Environment Variables
//! - `TANKERKOENIG_API_KEY` - API key (required)
//! - `TANKERKOENIG_BASE_URL` - API base URL override
//! - `RUST_LOG` - log filter

use fuelwatch::application::system;
use fuelwatch::cli::{self, EXIT_CONFIG_ERROR, ExporterArgs};
use fuelwatch::config::ExporterConfig;
use fuelwatch::logging;
use tracing::error;

#[tokio::main]
async fn main() {
    let args: ExporterArgs = cli::parse_or_exit();

    dotenvy::dotenv().ok();
    logging::init(args.common.verbose);

    let config = match ExporterConfig::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            error!("Error: {}", e);
            std::process::exit(EXIT_CONFIG_ERROR);
        }
    };

    if let Err(e) = system::run_exporter(config).await {
        error!("Error: {:#}", e);
        std::process::exit(1);
    }
}

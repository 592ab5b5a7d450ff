//! Command line arguments shared by the fuelwatch binaries.

use crate::config::DEFAULT_INTERVAL;
use clap::error::ErrorKind;
use clap::{Args, Parser};

/// Exit code for argument and configuration errors.
pub const EXIT_CONFIG_ERROR: i32 = 1;

#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Show verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Station IDs to poll (at most 10 are used)
    #[arg(value_name = "STATION_ID")]
    pub station_ids: Vec<String>,
}

/// Exports Tankerkönig data for Prometheus.
///
/// Fetches the current prices from Tankerkönig and exports them for
/// Prometheus.
#[derive(Parser, Debug, Clone)]
#[command(name = "fuelwatch-exporter", version, about, long_about)]
pub struct ExporterArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Bind address of the Prometheus metrics server
    #[arg(long, default_value = "localhost:9104")]
    pub bind_address: String,

    /// HTTP path the metrics are served on
    #[arg(long, default_value = "/metrics")]
    pub metrics_path: String,

    /// Fetch interval for price info (e.g. 15m, 1h30m, 90s)
    #[arg(short, long, default_value = DEFAULT_INTERVAL)]
    pub interval: String,
}

/// Pushes current Tankerkönig prices into InfluxDB.
///
/// Fetches each station once and writes one point per station to the
/// database named by INFLUXDB_URL.
#[derive(Parser, Debug, Clone)]
#[command(name = "fuelwatch-influx", version, about, long_about)]
pub struct InfluxArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Parse the process arguments, exiting 0 for help/version and
/// [`EXIT_CONFIG_ERROR`] for anything clap rejects.
pub fn parse_or_exit<T: Parser>() -> T {
    match T::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let code = exit_code_for(err.kind());
            let _ = err.print();
            std::process::exit(code);
        }
    }
}

pub fn exit_code_for(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => 0,
        _ => EXIT_CONFIG_ERROR,
    }
}

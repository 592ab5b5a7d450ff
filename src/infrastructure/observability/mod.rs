//! Pull-based observability for fuelwatch
//!
//! Station prices are kept in an owned prometheus registry and served to
//! scrapers over HTTP. Nothing is pushed from here.

pub mod metrics;
pub mod server;

pub use metrics::PriceMetrics;

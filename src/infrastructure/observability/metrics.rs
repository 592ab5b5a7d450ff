//! Prometheus gauge definitions for station prices.
//!
//! All series use the `tankerkoenig_` prefix and a single `station` label.

use crate::domain::station::FuelGrade;
use prometheus::{
    GaugeVec, Opts, Registry, TextEncoder,
    core::{AtomicF64, GenericGaugeVec},
};
use std::sync::Arc;

pub const STATION_LABEL: &str = "station";
pub const OPEN_STATE_METRIC: &str = "tankerkoenig_open_state";
pub const DIESEL_METRIC: &str = "tankerkoenig_diesel_euro_liter";
pub const E5_METRIC: &str = "tankerkoenig_e5_euro_liter";
pub const E10_METRIC: &str = "tankerkoenig_e10_euro_liter";

/// Owned registry holding the four station gauges.
///
/// Cloning is cheap and shares the underlying series.
#[derive(Clone)]
pub struct PriceMetrics {
    registry: Arc<Registry>,
    /// Whether the station is open (1 = open, 0 = closed)
    pub open_state: GenericGaugeVec<AtomicF64>,
    /// Price of Diesel in €/l
    pub diesel: GenericGaugeVec<AtomicF64>,
    /// Price of E5 in €/l
    pub e5: GenericGaugeVec<AtomicF64>,
    /// Price of E10 in €/l
    pub e10: GenericGaugeVec<AtomicF64>,
}

impl PriceMetrics {
    /// Create the gauges and register them on a fresh registry.
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let open_state = GaugeVec::new(
            Opts::new(OPEN_STATE_METRIC, "whether the station is open"),
            &[STATION_LABEL],
        )?;
        registry.register(Box::new(open_state.clone()))?;

        let diesel = GaugeVec::new(
            Opts::new(DIESEL_METRIC, "price of Diesel, in €/l"),
            &[STATION_LABEL],
        )?;
        registry.register(Box::new(diesel.clone()))?;

        let e5 = GaugeVec::new(
            Opts::new(E5_METRIC, "price of E5, in €/l"),
            &[STATION_LABEL],
        )?;
        registry.register(Box::new(e5.clone()))?;

        let e10 = GaugeVec::new(
            Opts::new(E10_METRIC, "price of E10, in €/l"),
            &[STATION_LABEL],
        )?;
        registry.register(Box::new(e10.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            open_state,
            diesel,
            e5,
            e10,
        })
    }

    pub fn price_gauge(&self, grade: FuelGrade) -> &GenericGaugeVec<AtomicF64> {
        match grade {
            FuelGrade::Diesel => &self.diesel,
            FuelGrade::E5 => &self.e5,
            FuelGrade::E10 => &self.e10,
        }
    }

    pub fn set_open_state(&self, station: &str, value: f64) {
        self.open_state.with_label_values(&[station]).set(value);
    }

    pub fn set_price(&self, grade: FuelGrade, station: &str, price: f64) {
        self.price_gauge(grade)
            .with_label_values(&[station])
            .set(price);
    }

    /// Render all series in the Prometheus text format.
    pub fn render(&self) -> String {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        encoder
            .encode_to_string(&metric_families)
            .unwrap_or_default()
    }
}

#[cfg(test)]
impl PriceMetrics {
    /// Current value of a series as a scraper would read it, `None` if it
    /// was never set. Station labels in tests need no escaping.
    pub(crate) fn value(&self, metric_name: &str, station: &str) -> Option<f64> {
        let prefix = format!("{}{{{}=\"{}\"}} ", metric_name, STATION_LABEL, station);
        self.render()
            .lines()
            .find_map(|line| line.strip_prefix(prefix.as_str()))
            .and_then(|value| value.trim().parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_registry_renders_nothing() {
        let metrics = PriceMetrics::new().expect("Failed to create metrics");
        assert!(!metrics.render().contains("tankerkoenig_diesel_euro_liter{"));
    }

    #[test]
    fn test_price_per_station() {
        let metrics = PriceMetrics::new().expect("Failed to create metrics");
        metrics.set_price(FuelGrade::Diesel, "JET Berlin", 1.659);
        metrics.set_price(FuelGrade::Diesel, "ARAL Hamburg", 1.699);

        let output = metrics.render();
        assert!(output.contains(r#"tankerkoenig_diesel_euro_liter{station="JET Berlin"} 1.659"#));
        assert!(output.contains(r#"tankerkoenig_diesel_euro_liter{station="ARAL Hamburg"} 1.699"#));
        assert_eq!(metrics.value(DIESEL_METRIC, "JET Berlin"), Some(1.659));
        assert_eq!(metrics.value(E5_METRIC, "JET Berlin"), None);
    }

    #[test]
    fn test_registries_are_independent() {
        let first = PriceMetrics::new().expect("Failed to create metrics");
        let second = PriceMetrics::new().expect("Failed to create metrics");
        first.set_open_state("JET Berlin", 1.0);

        assert_eq!(first.value(OPEN_STATE_METRIC, "JET Berlin"), Some(1.0));
        assert_eq!(second.value(OPEN_STATE_METRIC, "JET Berlin"), None);
    }
}

use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` is honoured; `verbose` additionally enables debug output for
/// this crate.
pub fn init(verbose: bool) {
    let mut filter = EnvFilter::from_default_env().add_directive(Level::INFO.into());
    if verbose {
        if let Ok(directive) = "fuelwatch=debug".parse() {
            filter = filter.add_directive(directive);
        }
    }

    // no timestamps or targets: the service manager's journal adds its own
    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .without_time();

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .init();
}

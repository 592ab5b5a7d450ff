//! Pull-based scrape endpoint.
//!
//! Serves the in-memory price gauges on a single GET path. The server never
//! pushes anything; it only answers scrapes.

use crate::infrastructure::observability::metrics::PriceMetrics;
use axum::Router;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::info;

const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Router exposing `metrics` on `path`.
pub fn build_router(metrics: PriceMetrics, path: &str) -> Router {
    Router::new()
        .route(path, get(scrape))
        .with_state(metrics)
}

async fn scrape(State(metrics): State<PriceMetrics>) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, CONTENT_TYPE)], metrics.render())
}

/// Serve scrapes on `bind_address` until `shutdown` flips to `true`.
pub async fn serve(
    metrics: PriceMetrics,
    bind_address: &str,
    path: &str,
    mut shutdown: watch::Receiver<bool>,
) -> anyhow::Result<()> {
    let listener = TcpListener::bind(bind_address).await?;
    info!(
        "Starting metrics server at {} (path {})",
        listener.local_addr()?,
        path
    );

    axum::serve(listener, build_router(metrics, path))
        .with_graceful_shutdown(async move {
            let _ = shutdown.wait_for(|stop| *stop).await;
            info!("Metrics server shutting down");
        })
        .await?;

    Ok(())
}

//! Shared stand-ins for the price API and InfluxDB, plus log capture.
#![allow(dead_code)]

use axum::Router;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use serde_json::json;
use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

pub const API_KEY: &str = "00000000-0000-0000-0000-000000000002";

async fn serve_on_ephemeral_port(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr.to_string()
}

// ---------------------------------------------------------------------------
// Price API

async fn detail(Query(query): Query<HashMap<String, String>>) -> (StatusCode, String) {
    if query.get("apikey").map(String::as_str) != Some(API_KEY) {
        let body = json!({"ok": false, "message": "apikey nicht angegeben, falsch, oder im falschen Format", "status": "error"});
        return (StatusCode::OK, body.to_string());
    }

    let body = match query.get("id").map(String::as_str) {
        Some("open-station") => json!({
            "ok": true,
            "status": "ok",
            "station": {
                "id": "open-station",
                "name": "ARAL Tankstelle",
                "brand": "ARAL",
                "postCode": 80331,
                "place": "München",
                "isOpen": true,
                "e5": 1.789,
                "e10": 1.729,
                "diesel": 1.639
            }
        }),
        Some("closed-station") => json!({
            "ok": true,
            "status": "ok",
            "station": {
                "id": "closed-station",
                "name": "Freie Tankstelle",
                "brand": "",
                "postCode": 80333,
                "place": "München",
                "isOpen": false,
                "e5": false,
                "e10": false,
                "diesel": 1.599
            }
        }),
        _ => return (StatusCode::NOT_FOUND, String::new()),
    };

    (StatusCode::OK, body.to_string())
}

/// Price API knowing `open-station` and `closed-station`; other ids are 404.
pub async fn start_fake_api() -> String {
    let router = Router::new().route("/json/detail.php", get(detail));
    format!("http://{}", serve_on_ephemeral_port(router).await)
}

/// Price API answering every request with 503. Returns the request counter.
pub async fn start_unavailable_api() -> (String, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let router = Router::new().route(
        "/json/detail.php",
        get(move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                StatusCode::SERVICE_UNAVAILABLE
            }
        }),
    );
    (
        format!("http://{}", serve_on_ephemeral_port(router).await),
        hits,
    )
}

// ---------------------------------------------------------------------------
// InfluxDB /write

#[derive(Debug, Clone)]
pub struct CapturedWrite {
    pub query: HashMap<String, String>,
    pub authorization: Option<String>,
    pub body: String,
}

#[derive(Clone)]
struct FakeInflux {
    writes: Arc<Mutex<Vec<CapturedWrite>>>,
    status: StatusCode,
}

async fn write_handler(
    State(fake): State<FakeInflux>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, &'static str) {
    fake.writes.lock().unwrap().push(CapturedWrite {
        query,
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    });

    if fake.status.is_success() {
        (fake.status, "")
    } else {
        (fake.status, "{\"error\":\"authorization failed\"}")
    }
}

/// Stand-in for the InfluxDB write endpoint answering every write with
/// `status`. Returns a destination URL for database `mydb` with credentials
/// `user`/`pass`.
pub async fn start_fake_influx(status: StatusCode) -> (String, Arc<Mutex<Vec<CapturedWrite>>>) {
    let writes = Arc::new(Mutex::new(Vec::new()));
    let fake = FakeInflux {
        writes: writes.clone(),
        status,
    };
    let router = Router::new()
        .route("/write", post(write_handler))
        .with_state(fake);

    let addr = serve_on_ephemeral_port(router).await;
    (format!("http://user:pass@{addr}/mydb"), writes)
}

// ---------------------------------------------------------------------------
// Scrape output

/// Value of `metric{station="..."}` in a text exposition, `None` if absent.
pub fn scraped_value(text: &str, metric: &str, station: &str) -> Option<f64> {
    let prefix = format!("{metric}{{station=\"{station}\"}} ");
    text.lines()
        .find_map(|line| line.strip_prefix(prefix.as_str()))
        .and_then(|value| value.trim().parse().ok())
}

// ---------------------------------------------------------------------------
// Log capture

pub struct CaptureWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl io::Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Collects formatted log output in memory.
#[derive(Clone, Default)]
pub struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = CaptureWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CaptureWriter {
            buffer: self.buffer.clone(),
        }
    }
}

impl LogCapture {
    pub fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync + 'static {
        tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_target(false)
            .without_time()
            .finish()
    }

    pub fn lines_containing(&self, needle: &str) -> usize {
        let buffer = self.buffer.lock().unwrap();
        String::from_utf8_lossy(&buffer)
            .lines()
            .filter(|line| line.contains(needle))
            .count()
    }
}

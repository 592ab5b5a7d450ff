use reqwest::Client;
use std::time::Duration;

pub struct HttpClientFactory;

impl HttpClientFactory {
    /// Shared client settings for the price API and time-series writes.
    ///
    /// There is no retry layer: a failed request is reported once and the
    /// next scheduled run tries again.
    pub fn create_client() -> Client {
        Client::builder()
            .pool_max_idle_per_host(5)
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("fuelwatch/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new())
    }
}

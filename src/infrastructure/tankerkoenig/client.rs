use crate::config::ApiConfig;
use crate::domain::errors::FetchError;
use crate::domain::ports::StationFetcher;
use crate::domain::station::StationSnapshot;
use crate::infrastructure::http_client_factory::HttpClientFactory;
use crate::infrastructure::tankerkoenig::types::DetailResponse;
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

/// Station lookup against the Tankerkönig `detail.php` endpoint.
pub struct TankerkoenigClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl TankerkoenigClient {
    pub fn new(config: &ApiConfig) -> Self {
        Self::with_client(HttpClientFactory::create_client(), config)
    }

    pub fn with_client(client: Client, config: &ApiConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    fn detail_url(&self) -> String {
        format!("{}/json/detail.php", self.base_url)
    }
}

#[async_trait]
impl StationFetcher for TankerkoenigClient {
    async fn fetch(&self, id: &str) -> Result<StationSnapshot, FetchError> {
        debug!("Requesting station detail for {}", id);

        let response = self
            .client
            .get(self.detail_url())
            .query(&[("id", id), ("apikey", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                id: id.to_string(),
                // the request URL carries the API key
                reason: e.without_url().to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                id: id.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| FetchError::Transport {
            id: id.to_string(),
            reason: e.without_url().to_string(),
        })?;

        let detail: DetailResponse =
            serde_json::from_str(&body).map_err(|e| FetchError::Decode {
                id: id.to_string(),
                reason: e.to_string(),
            })?;

        detail.into_snapshot(id)
    }
}

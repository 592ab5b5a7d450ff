use crate::config::InfluxTarget;
use crate::domain::errors::PublishError;
use crate::infrastructure::http_client_factory::HttpClientFactory;
use crate::infrastructure::influx::line_protocol::Point;
use reqwest::Client;
use tracing::debug;

/// Minimal InfluxDB 1.x write client.
///
/// Each call is one synchronous `/write` request with second precision.
/// Nothing is buffered and nothing is retried.
pub struct InfluxClient {
    client: Client,
    target: InfluxTarget,
}

impl InfluxClient {
    pub fn new(target: InfluxTarget) -> Self {
        Self::with_client(HttpClientFactory::create_client(), target)
    }

    pub fn with_client(client: Client, target: InfluxTarget) -> Self {
        Self { client, target }
    }

    pub fn target(&self) -> &InfluxTarget {
        &self.target
    }

    fn write_url(&self) -> String {
        format!("{}/write", self.target.address)
    }

    pub async fn write(&self, point: &Point) -> Result<(), PublishError> {
        let body = point.to_line();
        debug!("Writing to {}: {}", self.target.database, body);

        let mut request = self
            .client
            .post(self.write_url())
            .query(&[("db", self.target.database.as_str()), ("precision", "s")])
            .body(body);
        if let Some(username) = &self.target.username {
            request = request.basic_auth(username, self.target.password.as_ref());
        }

        let response = request.send().await.map_err(|e| PublishError::Transport {
            reason: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PublishError::Rejected {
                status: status.as_u16(),
                body: body.trim().to_string(),
            });
        }

        Ok(())
    }
}

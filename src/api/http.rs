//! reqwest-backed [`Transport`].

use async_trait::async_trait;
use tracing::debug;

use super::{ApiResponse, Transport};
use crate::config::ClientConfig;
use crate::error::{ApiError, ConfigError};

/// Talks JSON over HTTP to the configured API base.
pub struct HttpTransport {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
        Ok(Self {
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn read(path: &str, resp: reqwest::Response) -> Result<ApiResponse, ApiError> {
        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(|e| ApiError::Transport {
            path: path.to_string(),
            reason: format!("failed to read body: {e}"),
        })?;
        debug!(path, status, bytes = body.len(), "API response");
        Ok(ApiResponse { status, body })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str) -> Result<ApiResponse, ApiError> {
        debug!(path, "API GET");
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| ApiError::Transport {
                path: path.to_string(),
                reason: e.to_string(),
            })?;
        Self::read(path, resp).await
    }

    async fn post(&self, path: &str, body: &serde_json::Value) -> Result<ApiResponse, ApiError> {
        debug!(path, "API POST");
        let resp = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Transport {
                path: path.to_string(),
                reason: e.to_string(),
            })?;
        Self::read(path, resp).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_without_double_slashes() {
        let config = ClientConfig {
            api_base_url: "http://localhost:5000/api/v1/".to_string(),
            ..ClientConfig::default()
        };
        let transport = HttpTransport::new(&config).unwrap();
        assert_eq!(
            transport.url("/users/register"),
            "http://localhost:5000/api/v1/users/register"
        );
        assert_eq!(
            transport.url("growth-path/42"),
            "http://localhost:5000/api/v1/growth-path/42"
        );
    }

    #[tokio::test]
    async fn unreachable_host_is_a_transport_error() {
        let config = ClientConfig {
            // Port 9 (discard) on localhost is closed in test environments.
            api_base_url: "http://127.0.0.1:9".to_string(),
            request_timeout: std::time::Duration::from_secs(2),
            ..ClientConfig::default()
        };
        let transport = HttpTransport::new(&config).unwrap();
        let err = transport.get("/users/1").await.unwrap_err();
        assert!(matches!(err, ApiError::Transport { ref path, .. } if path == "/users/1"));
    }
}

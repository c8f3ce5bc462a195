//! HTTP client backed by reqwest.

use std::time::Duration;

use async_trait::async_trait;
use hostfacts_core::ports::{HttpClient, HttpError};
use serde_json::Value;
use tracing::debug;

use crate::error::RuntimeError;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Fetches JSON with a per-request timeout.
#[derive(Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    pub fn new(timeout: Duration) -> Result<Self, RuntimeError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| RuntimeError::HttpClient(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get_json(&self, url: &str) -> Result<Value, HttpError> {
        debug!(url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| HttpError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(HttpError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response.json::<Value>().await.map_err(|e| HttpError::Body {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unreachable_host_is_a_transport_error() {
        let client = ReqwestHttpClient::new(Duration::from_millis(500)).unwrap();
        // Port 9 on the loopback interface is not expected to accept connections.
        let err = client.get_json("http://127.0.0.1:9/").await.unwrap_err();
        assert!(err.is_transport(), "{err}");
    }
}

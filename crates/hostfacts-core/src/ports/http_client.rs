//! Remote HTTP lookup port.

use async_trait::async_trait;
use serde_json::Value;

use super::HttpError;

/// Fetches JSON documents from remote endpoints.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get_json(&self, url: &str) -> Result<Value, HttpError>;
}

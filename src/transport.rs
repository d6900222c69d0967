use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;

use crate::error::ApiError;

/// Performs a single GET and hands back the decoded JSON body.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get_json(&self, url: &str) -> Result<Value, ApiError>;
}

pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new())
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_json(&self, url: &str) -> Result<Value, ApiError> {
        tracing::debug!(url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| ApiError::fetch(url, err))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::not_found(url));
        }
        if !status.is_success() {
            return Err(ApiError::fetch(url, format!("HTTP {status}")));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|err| ApiError::fetch(url, err))?;
        serde_json::from_slice(&bytes).map_err(|err| ApiError::malformed(url, err))
    }
}

//! HTTP client wrapper - builds API endpoints and decodes JSON bodies

use std::time::Duration;

use reqwest::Url;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),
    #[error("Request timed out")]
    Timeout,
    #[error("Connection failed: {0}")]
    Connect(String),
    #[error("Request failed: {0}")]
    Request(String),
    #[error("Server responded with HTTP {0}")]
    Status(u16),
    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status when the server answered at all
    pub fn http_status(&self) -> Option<u16> {
        match self {
            ApiError::Status(status) => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout
        } else if e.is_connect() {
            ApiError::Connect(e.to_string())
        } else if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            ApiError::Status(status.as_u16())
        } else {
            ApiError::Request(e.to_string())
        }
    }
}

/// Client for the three endpoints the query view needs
#[derive(Clone, Debug)]
pub struct MetadictClient {
    http: reqwest::Client,
    base_url: Url,
}

impl MetadictClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Ok(MetadictClient { http, base_url })
    }

    /// `GET {api}/dictionaries/bidirected`
    pub async fn list_dictionaries(&self) -> Result<Value, ApiError> {
        self.get_json(self.endpoint(&["dictionaries", "bidirected"])?).await
    }

    /// `GET {api}/query/{keys}/{text}` with keys joined by commas
    pub async fn query(&self, text: &str, dictionaries: &[String]) -> Result<Value, ApiError> {
        let keys = dictionaries.join(",");
        self.get_json(self.endpoint(&["query", keys.as_str(), text])?).await
    }

    /// `GET {api}/status`
    pub async fn get_status(&self) -> Result<Value, ApiError> {
        self.get_json(self.endpoint(&["status"])?).await
    }

    /// Append percent-encoded path segments to the base URL
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json(&self, url: Url) -> Result<Value, ApiError> {
        tracing::debug!(url = %url, "GET");
        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }
        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

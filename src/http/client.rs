//! reqwest-backed transport
//!
//! Sends a [`RequestDescriptor`] as-is, classifies the status, and parses
//! the body as JSON (falling back to a string for non-JSON payloads).

use super::types::{PageResponse, RequestDescriptor, Transport};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::types::{JsonValue, StringMap};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

/// HTTP transport built on a shared reqwest client
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    config: ClientConfig,
}

impl HttpTransport {
    /// Create a transport with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a transport with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { client, config })
    }

    /// Create a transport around an existing reqwest client
    pub fn with_client(client: Client, config: ClientConfig) -> Self {
        Self { client, config }
    }

    /// Get the configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &RequestDescriptor) -> Result<PageResponse> {
        let mut req = self
            .client
            .request(request.method.into(), request.url.as_str());

        for (key, value) in &request.headers {
            req = req.header(key.as_str(), value.as_str());
        }

        let response = req.send().await?;
        let status = response.status();
        let url = response.url().to_string();

        let mut headers = StringMap::new();
        for (name, value) in response.headers() {
            if let Ok(value) = value.to_str() {
                headers.insert(name.as_str().to_ascii_lowercase(), value.to_string());
            }
        }

        let text = response.text().await?;

        if status.is_client_error() || status.is_server_error() {
            debug!("{} {} failed with {}", request.method, url, status.as_u16());
            return Err(Error::http_status(status.as_u16(), text));
        }

        debug!("{} {} -> {}", request.method, url, status.as_u16());
        Ok(PageResponse {
            status: status.as_u16(),
            headers,
            data: parse_body(&text),
            url,
        })
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.config.base_url)
            .field("has_token", &self.config.token.is_some())
            .finish_non_exhaustive()
    }
}

/// Parse a response body, keeping non-JSON payloads as a string
fn parse_body(text: &str) -> JsonValue {
    if text.trim().is_empty() {
        return JsonValue::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| JsonValue::String(text.to_string()))
}

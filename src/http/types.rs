//! Request and response types exchanged with the transport

use crate::error::Result;
use crate::types::{JsonValue, Method, StringMap};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A single resolved HTTP request
///
/// Created once per pagination session; only `url` changes between pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestDescriptor {
    /// HTTP method
    pub method: Method,
    /// Absolute request URL
    pub url: String,
    /// Request headers (lower-case names)
    #[serde(default)]
    pub headers: StringMap,
}

impl RequestDescriptor {
    /// Create a descriptor without headers
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: StringMap::new(),
        }
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .insert(key.into().to_ascii_lowercase(), value.into());
        self
    }

    /// Same request pointed at another URL
    #[must_use]
    pub fn with_url(&self, url: impl Into<String>) -> Self {
        Self {
            method: self.method,
            url: url.into(),
            headers: self.headers.clone(),
        }
    }
}

/// Raw result of one HTTP call, before normalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers (lower-case names)
    #[serde(default)]
    pub headers: StringMap,
    /// Parsed response body
    pub data: JsonValue,
    /// URL that produced this response, after redirects
    pub url: String,
}

impl PageResponse {
    /// Create a 200 response for the given URL
    pub fn ok(url: impl Into<String>, data: JsonValue) -> Self {
        Self {
            status: 200,
            headers: StringMap::new(),
            data,
            url: url.into(),
        }
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .insert(key.into().to_ascii_lowercase(), value.into());
        self
    }

    /// Look up a header by case-insensitive name
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Performs one HTTP call per request
///
/// Implementations own authentication, retries, and transport concerns.
/// They must be safe to call from several pagination sessions at once.
/// A non-success status must be reported as an error whose
/// [`status`](crate::Error::status) returns the code.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request and return the parsed response
    async fn send(&self, request: &RequestDescriptor) -> Result<PageResponse>;
}

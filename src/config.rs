//! Client configuration
//!
//! Settings shared by every request a paginator sends: where the API lives,
//! how to authenticate, and which headers go out by default. Loadable from
//! a YAML or JSON file and overridable from the environment.

use crate::error::{Error, Result, ResultExt};
use crate::types::StringMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default API root
pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Default media type sent in the `accept` header
pub const DEFAULT_ACCEPT: &str = "application/vnd.github.v3+json";

/// Environment variable holding the API token
pub const ENV_TOKEN: &str = "GITHUB_TOKEN";

/// Environment variable overriding the base URL
pub const ENV_BASE_URL: &str = "REST_PAGINATE_BASE_URL";

/// Configuration for the HTTP transport and route resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL relative routes are resolved against
    pub base_url: String,

    /// API token, sent as `authorization: token <value>`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// User agent string
    pub user_agent: String,

    /// Accept header value
    pub accept: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Extra headers sent with every request
    pub headers: StringMap,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            user_agent: format!("rest-paginate/{}", env!("CARGO_PKG_VERSION")),
            accept: DEFAULT_ACCEPT.to_string(),
            timeout_secs: 30,
            headers: StringMap::new(),
        }
    }
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Load config from a YAML or JSON file, chosen by extension
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        let config: Self = if is_json {
            serde_json::from_str(&contents)?
        } else {
            serde_yaml::from_str(&contents)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Apply `GITHUB_TOKEN` and `REST_PAGINATE_BASE_URL` from the process
    /// environment
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        self.apply_env(|key| std::env::var(key).ok());
        self
    }

    /// Apply environment overrides using the given lookup
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(token) = lookup(ENV_TOKEN).filter(|t| !t.is_empty()) {
            self.token = Some(token);
        }
        if let Some(url) = lookup(ENV_BASE_URL).filter(|u| !u.is_empty()) {
            self.base_url = url;
        }
    }

    /// Check the config for values that cannot work
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(Error::missing_field("base_url"));
        }
        url::Url::parse(&self.base_url)?;
        if self.timeout_secs == 0 {
            return Err(Error::config("timeout_secs must be greater than zero"));
        }
        Ok(())
    }

    /// Request timeout as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Headers every request starts from, with lower-cased names
    pub fn default_headers(&self) -> StringMap {
        let mut headers = StringMap::new();
        headers.insert("accept".to_string(), self.accept.clone());
        headers.insert("user-agent".to_string(), self.user_agent.clone());
        if let Some(token) = &self.token {
            headers.insert("authorization".to_string(), format!("token {token}"));
        }
        for (key, value) in &self.headers {
            headers.insert(key.to_ascii_lowercase(), value.clone());
        }
        headers
    }
}

/// Builder for client config
#[derive(Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the API token
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.config.token = Some(token.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Set the accept header
    pub fn accept(mut self, accept: impl Into<String>) -> Self {
        self.config.accept = accept.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout_secs = timeout.as_secs().max(1);
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.headers.insert(key.into(), value.into());
        self
    }

    /// Build the config
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

//! Endpoint options and request resolution
//!
//! URL templates use `{name}` (or the older `:name`) placeholders in the
//! path. Parameters not consumed by a placeholder become query parameters,
//! except for a few reserved keys.

use super::route::Route;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::http::{RequestDescriptor, Transport};
use crate::types::{JsonObject, JsonValue, Method, StringMap};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;
use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, LazyLock};
use url::Url;

/// URL, query, and reserved parameters for an endpoint
pub type Parameters = JsonObject;

/// Parameter whose object value is merged into the request headers
const HEADERS_KEY: &str = "headers";

/// Parameter overriding the configured base URL
const BASE_URL_KEY: &str = "baseUrl";

/// Parameters that never reach the query string
const RESERVED_KEYS: &[&str] = &[HEADERS_KEY, BASE_URL_KEY, "request", "mediaType"];

/// Characters escaped in a substituted path value: all but RFC 3986 unreserved
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Matches `{name}` and `:name` placeholders
static PLACEHOLDER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}|:([A-Za-z_][A-Za-z0-9_]*)").unwrap()
});

/// Method, URL template, parameters, and headers for one endpoint
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EndpointOptions {
    /// HTTP method
    pub method: Method,
    /// URL template
    pub url: String,
    /// URL, query, and reserved parameters
    pub parameters: Parameters,
    /// Request headers
    pub headers: StringMap,
}

impl EndpointOptions {
    /// Create options for a method and URL template
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            ..Default::default()
        }
    }

    /// Add a parameter
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Merge parameters over the existing ones
    #[must_use]
    pub fn with_parameters(mut self, parameters: Option<Parameters>) -> Self {
        if let Some(parameters) = parameters {
            self.parameters.extend(parameters);
        }
        self
    }

    /// The route this endpoint answers to
    pub fn route(&self) -> Route {
        Route::new(self.method, self.url.clone())
    }
}

impl From<Route> for EndpointOptions {
    fn from(route: Route) -> Self {
        Self::new(route.method, route.url)
    }
}

/// A route bound to its own transport
///
/// Paginating through a request method sends every page through
/// `transport` instead of the paginator's own transport.
#[derive(Clone)]
pub struct RequestMethod {
    /// Route the method requests
    pub route: Route,
    /// Parameters applied before caller parameters
    pub defaults: Parameters,
    /// Transport that executes the request
    pub transport: Arc<dyn Transport>,
}

impl RequestMethod {
    /// Bind a route to a transport
    pub fn new(route: Route, transport: Arc<dyn Transport>) -> Self {
        Self {
            route,
            defaults: Parameters::new(),
            transport,
        }
    }

    /// Set default parameters
    #[must_use]
    pub fn with_defaults(mut self, defaults: Parameters) -> Self {
        self.defaults = defaults;
        self
    }

    /// Endpoint options for this method with caller parameters applied
    pub fn endpoint(&self, parameters: Option<Parameters>) -> EndpointOptions {
        EndpointOptions::from(self.route.clone())
            .with_parameters(Some(self.defaults.clone()))
            .with_parameters(parameters)
    }
}

impl fmt::Debug for RequestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestMethod")
            .field("route", &self.route)
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}

/// Resolve endpoint options into a request descriptor
pub fn resolve(options: &EndpointOptions, config: &ClientConfig) -> Result<RequestDescriptor> {
    let params = &options.parameters;

    let mut headers = config.default_headers();
    for (key, value) in &options.headers {
        headers.insert(key.to_ascii_lowercase(), value.clone());
    }
    if let Some(extra) = params.get(HEADERS_KEY) {
        let JsonValue::Object(extra) = extra else {
            return Err(Error::invalid_header(HEADERS_KEY, "expected an object"));
        };
        for (key, value) in extra {
            headers.insert(key.to_ascii_lowercase(), value_to_string(value));
        }
    }

    let (path, used) = expand_template(&options.url, params)?;

    let full_url = if path.starts_with("http://") || path.starts_with("https://") {
        path
    } else {
        let base = match params.get(BASE_URL_KEY) {
            Some(JsonValue::String(base)) => base.as_str(),
            _ => config.base_url.as_str(),
        };
        format!(
            "{}/{}",
            base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    };

    let mut url = Url::parse(&full_url)?;

    let query: Vec<(&String, String)> = params
        .iter()
        .filter(|(key, value)| {
            !used.contains(key.as_str())
                && !RESERVED_KEYS.contains(&key.as_str())
                && !value.is_null()
        })
        .map(|(key, value)| (key, value_to_string(value)))
        .collect();

    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in query {
            pairs.append_pair(key, &value);
        }
    }

    Ok(RequestDescriptor {
        method: options.method,
        url: url.to_string(),
        headers,
    })
}

/// Substitute placeholders in the path part of a URL template
///
/// Returns the expanded URL and the names of the parameters consumed.
fn expand_template(template: &str, params: &Parameters) -> Result<(String, HashSet<String>)> {
    let (path, query) = match template.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (template, None),
    };

    let mut used = HashSet::new();
    let mut expanded = String::with_capacity(path.len());
    let mut last = 0;

    for cap in PLACEHOLDER_REGEX.captures_iter(path) {
        let Some(whole) = cap.get(0) else { continue };
        let Some(name) = cap.get(1).or_else(|| cap.get(2)).map(|m| m.as_str()) else {
            continue;
        };

        let value = match params.get(name) {
            Some(value) if !value.is_null() => value_to_string(value),
            _ => return Err(Error::missing_parameter(name)),
        };

        expanded.push_str(&path[last..whole.start()]);
        expanded.extend(utf8_percent_encode(&value, PATH_SEGMENT));
        last = whole.end();
        used.insert(name.to_string());
    }
    expanded.push_str(&path[last..]);

    if let Some(query) = query {
        expanded.push('?');
        expanded.push_str(query);
    }

    Ok((expanded, used))
}

/// Render a parameter value the way it appears in a URL
fn value_to_string(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        JsonValue::Array(items) => items
            .iter()
            .map(value_to_string)
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}

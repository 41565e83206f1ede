//! Pagination types
//!
//! Defines the normalized page handed to callers, the pagination target,
//! and the early-exit flag passed to mapping functions.

use crate::endpoint::{EndpointOptions, RequestMethod, Route};
use crate::types::{JsonObject, JsonValue, StringMap};
use serde::Serialize;

/// One page after normalization
///
/// `data` holds the page items when the endpoint returns a list. For
/// namespaced responses the list metadata (`total_count` and friends) is
/// moved into `metadata`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers (lower-case names)
    pub headers: StringMap,
    /// Page items, or the untouched body for responses that are not lists
    pub data: JsonValue,
    /// List metadata lifted out of a namespaced response
    #[serde(skip_serializing_if = "JsonObject::is_empty")]
    pub metadata: JsonObject,
    /// URL that produced this page
    pub url: String,
}

impl NormalizedResponse {
    /// Synthetic terminal page with no items
    pub fn empty(url: impl Into<String>) -> Self {
        Self {
            status: 200,
            headers: StringMap::new(),
            data: JsonValue::Array(Vec::new()),
            metadata: JsonObject::new(),
            url: url.into(),
        }
    }

    /// Items on this page
    ///
    /// A body that is not a list counts as a single item.
    pub fn items(&self) -> Vec<JsonValue> {
        self.clone().into_items()
    }

    /// Consume the page and return its items
    pub fn into_items(self) -> Vec<JsonValue> {
        match self.data {
            JsonValue::Array(items) => items,
            JsonValue::Null => Vec::new(),
            other => vec![other],
        }
    }

    /// Number of items on this page
    pub fn item_count(&self) -> usize {
        match &self.data {
            JsonValue::Array(items) => items.len(),
            JsonValue::Null => 0,
            _ => 1,
        }
    }

    /// The raw `link` header, if any
    pub fn link(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("link"))
            .map(|(_, v)| v.as_str())
    }

    /// Look up a list metadata field
    ///
    /// Falls back to the body itself when the response was not namespaced,
    /// e.g. a commit comparison carrying `total_commits` next to other keys.
    pub fn metadata_field(&self, name: &str) -> Option<&JsonValue> {
        self.metadata
            .get(name)
            .or_else(|| self.data.as_object().and_then(|body| body.get(name)))
    }

    /// Total number of items across all pages
    pub fn total_count(&self) -> Option<u64> {
        self.metadata_field("total_count").and_then(JsonValue::as_u64)
    }

    /// Whether a search timed out before finding every match
    pub fn incomplete_results(&self) -> Option<bool> {
        self.metadata_field("incomplete_results")
            .and_then(JsonValue::as_bool)
    }

    /// Repository selection of an installation (`all` or `selected`)
    pub fn repository_selection(&self) -> Option<&str> {
        self.metadata_field("repository_selection")
            .and_then(JsonValue::as_str)
    }

    /// Total number of commits in a comparison
    pub fn total_commits(&self) -> Option<u64> {
        self.metadata_field("total_commits")
            .and_then(JsonValue::as_u64)
    }
}

/// What to paginate
///
/// Mirrors the three ways a list request can be described: full endpoint
/// options, a route string, or a request method bound to its own transport.
#[derive(Debug, Clone)]
pub enum Target {
    /// Method, URL template, parameters, and headers
    Options(EndpointOptions),
    /// Route identifier such as `"GET /orgs/{org}/repos"`
    Route(String),
    /// Route bound to a transport
    Method(RequestMethod),
}

impl From<EndpointOptions> for Target {
    fn from(options: EndpointOptions) -> Self {
        Self::Options(options)
    }
}

impl From<Route> for Target {
    fn from(route: Route) -> Self {
        Self::Options(EndpointOptions::from(route))
    }
}

impl From<RequestMethod> for Target {
    fn from(method: RequestMethod) -> Self {
        Self::Method(method)
    }
}

impl From<&str> for Target {
    fn from(route: &str) -> Self {
        Self::Route(route.to_string())
    }
}

impl From<String> for Target {
    fn from(route: String) -> Self {
        Self::Route(route)
    }
}

/// Early-exit flag handed to mapping functions
///
/// Calling [`done`](Self::done) stops pagination once the current page has
/// been mapped; no further page is requested.
#[derive(Debug, Default)]
pub struct EarlyExit {
    requested: bool,
}

impl EarlyExit {
    /// Create a flag that has not been raised
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that pagination stop after this page
    pub fn done(&mut self) {
        self.requested = true;
    }

    /// Whether an early exit was requested
    pub fn is_requested(&self) -> bool {
        self.requested
    }
}

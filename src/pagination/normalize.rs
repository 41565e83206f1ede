//! Response normalization
//!
//! Some list endpoints wrap their items in an object next to metadata:
//!
//! ```text
//! { "total_count": 2, "incomplete_results": false, "items": [ ... ] }
//! ```
//!
//! The name of the items key varies per endpoint (`items`, `repositories`,
//! `workflow_runs`, ...). Normalization hoists that list into `data` and
//! keeps the metadata fields alongside it, so every paginated response has
//! the same shape.
//!
//! An object is only flattened when, ignoring the metadata fields, exactly
//! one key is left and it holds an array. Anything else (a combined status
//! with `state`, `total_count`, and `statuses`, a single resource, a bare
//! array) passes through unchanged.

use super::types::NormalizedResponse;
use crate::http::PageResponse;
use crate::types::{JsonObject, JsonValue};

/// Fields that may sit next to the items list of a namespaced response
pub const LIST_METADATA_FIELDS: &[&str] = &[
    "total_count",
    "incomplete_results",
    "repository_selection",
    "total_commits",
];

/// Normalize one raw page
pub fn normalize(response: PageResponse) -> NormalizedResponse {
    let PageResponse {
        status,
        headers,
        data,
        url,
    } = response;
    let (data, metadata) = normalize_data(data);

    NormalizedResponse {
        status,
        headers,
        data,
        metadata,
        url,
    }
}

/// Normalize a response body, returning the items and the lifted metadata
///
/// A null body becomes an empty list.
pub fn normalize_data(data: JsonValue) -> (JsonValue, JsonObject) {
    match data {
        JsonValue::Null => (JsonValue::Array(Vec::new()), JsonObject::new()),
        JsonValue::Object(mut body) => {
            let Some(key) = items_key(&body) else {
                return (JsonValue::Object(body), JsonObject::new());
            };
            let items = body.remove(&key).unwrap_or(JsonValue::Null);

            let mut metadata = JsonObject::new();
            for field in LIST_METADATA_FIELDS {
                if let Some(value) = body.remove(*field) {
                    metadata.insert((*field).to_string(), value);
                }
            }
            (items, metadata)
        }
        other => (other, JsonObject::new()),
    }
}

/// The single non-metadata key holding an array, if there is exactly one
fn items_key(body: &JsonObject) -> Option<String> {
    let mut candidates = body
        .iter()
        .filter(|(key, _)| !LIST_METADATA_FIELDS.contains(&key.as_str()));

    let (key, value) = candidates.next()?;
    if candidates.next().is_some() || !value.is_array() {
        return None;
    }
    Some(key.clone())
}

// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # rest-paginate
//!
//! Transparent pagination for REST list endpoints that page with `link`
//! headers. One logical list request walks every page, normalizes
//! namespaced responses into a flat list, and hands back either all items
//! at once or one page at a time.
//!
//! ## Features
//!
//! - **Link Header Pagination**: follows `rel="next"` wherever it points
//! - **Response Normalization**: `{ total_count, items: [...] }` becomes `[...]` plus metadata
//! - **Eager or Lazy**: gather everything, or iterate / stream page by page
//! - **Early Exit**: a mapping function can stop pagination after any page
//! - **Empty Repositories**: a `409 Conflict` on commit listings is an empty result
//! - **Endpoint Table**: look up whether a route is known to paginate
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rest_paginate::{ClientConfig, Paginator, Result};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let paginator = Paginator::from_config(ClientConfig::default().with_env_overrides())?;
//!
//!     // Every issue, across all pages
//!     let params = json!({ "owner": "octokit", "repo": "rest.js", "per_page": 100 });
//!     let issues = paginator
//!         .paginate("GET /repos/{owner}/{repo}/issues", params.as_object().cloned())
//!         .await?;
//!
//!     // Titles of the first two pages only
//!     let mut seen = 0;
//!     let titles = paginator
//!         .paginate_map("GET /repos/{owner}/{repo}/issues", params.as_object().cloned(), |page, exit| {
//!             seen += 1;
//!             if seen == 2 {
//!                 exit.done();
//!             }
//!             page.into_items().into_iter().map(|issue| issue["title"].clone()).collect::<Vec<_>>()
//!         })
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  Paginator::paginate / paginate_map / iterator / stream  │
//! └──────────────────────────────────────────────────────────┘
//!          │                   │                    │
//! ┌────────┴───────┐  ┌────────┴────────┐  ┌────────┴───────┐
//! │    Endpoint    │  │  PageIterator   │  │   Normalizer   │
//! ├────────────────┤  ├─────────────────┤  ├────────────────┤
//! │ Route parsing  │  │ link rel="next" │  │ items key      │
//! │ URL templates  │  │ total_commits   │  │ metadata       │
//! │ Query building │  │ 409 → empty     │  │ null → []      │
//! └────────────────┘  └─────────────────┘  └────────────────┘
//!                              │
//!                   ┌──────────┴──────────┐
//!                   │  Transport (trait)  │
//!                   │  HttpTransport      │
//!                   └─────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Client configuration
pub mod config;

/// HTTP transport
pub mod http;

/// Route parsing and request resolution
pub mod endpoint;

/// Page iteration, normalization, and gathering
pub mod pagination;

/// Known paginating endpoints
pub mod endpoints;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::ClientConfig;
pub use endpoint::{EndpointOptions, Parameters, RequestMethod, Route};
pub use endpoints::{is_paginating_endpoint, is_paginating_value, PAGINATING_ENDPOINTS};
pub use error::{Error, Result};
pub use http::{HttpTransport, PageResponse, RequestDescriptor, Transport};
pub use pagination::{EarlyExit, NormalizedResponse, PageIterator, Paginator, Target};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

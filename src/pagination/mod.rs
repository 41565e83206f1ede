//! Pagination module
//!
//! Walks every page of a list endpoint by following `rel="next"` links.
//!
//! # Overview
//!
//! - [`normalize`] - flattens namespaced list responses into a plain array
//! - [`PageIterator`] - fetches one page per advance, strictly in sequence
//! - [`Paginator`] - resolves a [`Target`] and gathers every page into one `Vec`
//!
//! Pages are never fetched concurrently: each page's URL comes from the
//! previous response. Separate sessions share nothing but the transport.

mod iterator;
mod link;
mod normalize;
mod paginator;
mod types;

pub use iterator::PageIterator;
pub use link::{next_commits_page, parse_link_header, DEFAULT_COMMITS_PER_PAGE};
pub use normalize::{normalize, normalize_data, LIST_METADATA_FIELDS};
pub use paginator::{gather, Paginator};
pub use types::{EarlyExit, NormalizedResponse, Target};

#[cfg(test)]
mod tests;

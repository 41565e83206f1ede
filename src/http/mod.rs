//! HTTP transport module
//!
//! The paginator never talks to the network directly. It hands a
//! [`RequestDescriptor`] to a [`Transport`] and gets back a [`PageResponse`]
//! or an error carrying the HTTP status.
//!
//! # Features
//!
//! - **Injectable**: anything implementing [`Transport`] can drive pagination
//! - **reqwest-backed default**: [`HttpTransport`] applies [`ClientConfig`] headers
//!
//! [`ClientConfig`]: crate::config::ClientConfig

mod client;
mod types;

pub use client::HttpTransport;
pub use types::{PageResponse, RequestDescriptor, Transport};

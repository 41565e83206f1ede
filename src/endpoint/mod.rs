//! Endpoint module
//!
//! Turns a route string or endpoint options plus parameters into a
//! [`RequestDescriptor`](crate::http::RequestDescriptor).
//!
//! # Overview
//!
//! - [`Route`] - `"GET /repos/{owner}/{repo}/commits"` split into method and URL template
//! - [`EndpointOptions`] - method, URL template, parameters, and headers
//! - [`RequestMethod`] - a route bound to its own transport
//! - [`resolve`] - URL template expansion and query building

mod options;
mod route;

pub use options::{resolve, EndpointOptions, Parameters, RequestMethod};
pub use route::Route;

//! CLI module
//!
//! Command-line interface for paginating list endpoints.
//!
//! # Commands
//!
//! - `fetch` - Fetch every page of a route and print the items
//! - `check` - Report whether a route is a known paginating endpoint
//! - `endpoints` - List known paginating endpoints

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;

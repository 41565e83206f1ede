//! CLI commands and argument parsing

use crate::types::JsonValue;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Paginate REST list endpoints by following link headers
#[derive(Parser, Debug)]
#[command(name = "rest-paginate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Client configuration file (YAML or JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// API base URL (overrides config and environment)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// API token (overrides config and GITHUB_TOKEN)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch every page of a route and print the collected items
    Fetch {
        /// Route, e.g. "GET /repos/{owner}/{repo}/issues"
        route: String,

        /// Parameter as key=value (repeatable); JSON values are parsed
        #[arg(short = 'p', long = "param", value_parser = parse_param)]
        params: Vec<(String, JsonValue)>,

        /// Stop after this many pages (at least 1)
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        max_pages: Option<u64>,

        /// Print one normalized page per line instead of the items
        #[arg(long)]
        pages: bool,
    },

    /// Check whether a route is a known paginating endpoint
    Check {
        /// Route, e.g. "GET /repos/{owner}/{repo}/releases"
        route: String,
    },

    /// List known paginating endpoints
    Endpoints {
        /// Only show routes containing this text
        #[arg(long)]
        filter: Option<String>,
    },
}

/// Parse a `key=value` parameter
///
/// The value is read as JSON when it parses (`per_page=100` gives a number),
/// and as a plain string otherwise.
pub fn parse_param(raw: &str) -> Result<(String, JsonValue), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))?;
    if key.is_empty() {
        return Err(format!("empty parameter name in '{raw}'"));
    }

    let value =
        serde_json::from_str(value).unwrap_or_else(|_| JsonValue::String(value.to_string()));
    Ok((key.to_string(), value))
}

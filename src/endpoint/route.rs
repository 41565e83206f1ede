//! Route identifiers

use crate::error::{Error, Result};
use crate::types::Method;
use std::fmt;
use std::str::FromStr;

/// A route identifier: HTTP method plus URL template
///
/// Written as `"<METHOD> <url-template>"`, e.g. `"GET /orgs/{org}/repos"`.
/// A bare path or URL means `GET`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Route {
    /// HTTP method
    pub method: Method,
    /// URL template, relative to the base URL or absolute
    pub url: String,
}

impl Route {
    /// Create a route from its parts
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
        }
    }

    /// Parse a route identifier
    pub fn parse(route: &str) -> Result<Self> {
        let trimmed = route.trim();
        if trimmed.is_empty() {
            return Err(Error::route(route, "route is empty"));
        }

        if let Some((method, url)) = trimmed.split_once(char::is_whitespace) {
            let url = url.trim();
            if url.is_empty() {
                return Err(Error::route(route, "missing URL after method"));
            }
            return Ok(Self::new(method.parse()?, url));
        }

        if trimmed.starts_with('/')
            || trimmed.starts_with("http://")
            || trimmed.starts_with("https://")
        {
            return Ok(Self::new(Method::GET, trimmed));
        }

        Err(Error::route(route, "expected '<METHOD> <url>' or a path"))
    }
}

impl FromStr for Route {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.url)
    }
}

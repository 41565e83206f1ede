//! Next-page discovery
//!
//! The `link` header (RFC 8288) is the primary source:
//! `<https://api.github.com/user/repos?page=2>; rel="next", <...>; rel="last"`.
//! Commit comparisons send no `link` header, so their next page is derived
//! from `total_commits` and the `page`/`per_page` query of the current URL.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Page size the API uses for commit comparisons when `per_page` is absent
pub const DEFAULT_COMMITS_PER_PAGE: u64 = 250;

/// Matches one `<url>; rel="name"` entry
static LINK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<([^<>]+)>;\s*rel="([^"]*)""#).unwrap());

/// Extract the URL for `target_rel` from a `link` header
///
/// A malformed header or a missing relation yields `None`.
pub fn parse_link_header(header: &str, target_rel: &str) -> Option<String> {
    LINK_REGEX
        .captures_iter(header)
        .find(|cap| &cap[2] == target_rel)
        .map(|cap| cap[1].to_string())
}

/// URL of the next comparison page, or `None` when `url` already covers
/// the last of `total_commits`
///
/// An empty `page` or `per_page` counts as absent. Only `page` is changed;
/// every other query parameter is kept.
pub fn next_commits_page(url: &str, total_commits: u64) -> Option<String> {
    let mut parsed = Url::parse(url).ok()?;

    let mut page = 1u64;
    let mut per_page = DEFAULT_COMMITS_PER_PAGE;
    for (key, value) in parsed.query_pairs() {
        if value.is_empty() {
            continue;
        }
        match key.as_ref() {
            "page" => page = value.parse().ok()?,
            "per_page" => per_page = value.parse().ok()?,
            _ => {}
        }
    }

    if per_page == 0 || page.saturating_mul(per_page) >= total_commits {
        return None;
    }

    let next = (page + 1).to_string();
    let mut replaced = false;
    let pairs: Vec<(String, String)> = parsed
        .query_pairs()
        .map(|(key, value)| {
            if key == "page" {
                replaced = true;
                (key.into_owned(), next.clone())
            } else {
                (key.into_owned(), value.into_owned())
            }
        })
        .collect();

    {
        let mut query = parsed.query_pairs_mut();
        query.clear().extend_pairs(&pairs);
        if !replaced {
            query.append_pair("page", &next);
        }
    }

    Some(parsed.to_string())
}

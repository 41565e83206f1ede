//! Page iterator
//!
//! A forward-only, non-restartable sequence of normalized pages. Each call
//! to [`PageIterator::next_page`] performs at most one HTTP request.

use super::link::{next_commits_page, parse_link_header};
use super::normalize::normalize;
use super::types::NormalizedResponse;
use crate::error::Result;
use crate::http::{RequestDescriptor, Transport};
use futures::Stream;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Where a session stands
#[derive(Debug, Clone, PartialEq, Eq)]
enum SessionState {
    /// Another page lives at this URL
    Pending { url: String },
    /// No more pages
    Exhausted,
}

/// Lazily fetches the pages of one list request
pub struct PageIterator {
    transport: Arc<dyn Transport>,
    request: RequestDescriptor,
    state: SessionState,
    pages_fetched: usize,
}

impl PageIterator {
    /// Start a session for an already-resolved request
    pub fn new(transport: Arc<dyn Transport>, request: RequestDescriptor) -> Self {
        let state = if request.url.is_empty() {
            SessionState::Exhausted
        } else {
            SessionState::Pending {
                url: request.url.clone(),
            }
        };

        Self {
            transport,
            request,
            state,
            pages_fetched: 0,
        }
    }

    /// Fetch the next page
    ///
    /// Returns `None` once the last page has been produced. A `409 Conflict`
    /// (listing commits of an empty repository) ends the session with an
    /// empty page instead of an error. Any other error is returned once and
    /// the iterator yields `None` from then on.
    ///
    /// The URL is consumed before the request is sent, so dropping this
    /// future mid-flight also ends the session.
    pub async fn next_page(&mut self) -> Option<Result<NormalizedResponse>> {
        let url = match std::mem::replace(&mut self.state, SessionState::Exhausted) {
            SessionState::Pending { url } => url,
            SessionState::Exhausted => return None,
        };

        let request = self.request.with_url(url.as_str());
        match self.transport.send(&request).await {
            Ok(response) => {
                self.pages_fetched += 1;
                let page = normalize(response);
                debug!(
                    "Page {}: {} items from {}",
                    self.pages_fetched,
                    page.item_count(),
                    page.url
                );

                if let Some(next) = next_url(&page) {
                    debug!("Next page: {next}");
                    self.state = SessionState::Pending { url: next };
                }
                Some(Ok(page))
            }
            Err(e) if e.is_conflict() => {
                warn!("{} {} returned 409, treating as an empty list", request.method, url);
                Some(Ok(NormalizedResponse::empty(url)))
            }
            Err(e) => Some(Err(e)),
        }
    }

    /// Whether the session has no pages left
    pub fn is_exhausted(&self) -> bool {
        self.state == SessionState::Exhausted
    }

    /// Number of pages successfully fetched so far
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// The request this session started from
    pub fn request(&self) -> &RequestDescriptor {
        &self.request
    }

    /// Turn the iterator into a stream of pages
    pub fn into_stream(self) -> impl Stream<Item = Result<NormalizedResponse>> + Send {
        futures::stream::unfold(self, |mut pages| async move {
            let page = pages.next_page().await?;
            Some((page, pages))
        })
    }
}

impl fmt::Debug for PageIterator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageIterator")
            .field("request", &self.request)
            .field("state", &self.state)
            .field("pages_fetched", &self.pages_fetched)
            .finish_non_exhaustive()
    }
}

/// URL of the page after `page`, if there is one
fn next_url(page: &NormalizedResponse) -> Option<String> {
    if let Some(next) = page.link().and_then(|link| parse_link_header(link, "next")) {
        return Some(next);
    }

    let total_commits = page.total_commits()?;
    next_commits_page(&page.url, total_commits)
}

//! Paginate and gather
//!
//! [`Paginator`] resolves a [`Target`] into a session and drains it. The
//! mapping form lets callers transform each page and stop early through
//! [`EarlyExit`].

use super::iterator::PageIterator;
use super::types::{EarlyExit, NormalizedResponse, Target};
use crate::config::ClientConfig;
use crate::endpoint::{resolve, EndpointOptions, Parameters, Route};
use crate::error::Result;
use crate::http::{HttpTransport, RequestDescriptor, Transport};
use crate::types::JsonValue;
use futures::Stream;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Entry point for paginated list requests
///
/// Cheap to clone; clones share the transport. Each call starts an
/// independent session.
#[derive(Clone)]
pub struct Paginator {
    transport: Arc<dyn Transport>,
    config: ClientConfig,
}

impl Paginator {
    /// Create a paginator over an injected transport
    pub fn new(transport: Arc<dyn Transport>, config: ClientConfig) -> Self {
        Self { transport, config }
    }

    /// Create a paginator backed by [`HttpTransport`]
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::with_config(config.clone())?;
        Ok(Self::new(Arc::new(transport), config))
    }

    /// Get the configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Start a lazy page-by-page session
    pub fn iterator(
        &self,
        target: impl Into<Target>,
        parameters: Option<Parameters>,
    ) -> Result<PageIterator> {
        let (transport, request) = self.session(target.into(), parameters)?;
        debug!("Starting pagination: {} {}", request.method, request.url);
        Ok(PageIterator::new(transport, request))
    }

    /// Start a session as a stream of pages
    pub fn stream(
        &self,
        target: impl Into<Target>,
        parameters: Option<Parameters>,
    ) -> Result<impl Stream<Item = Result<NormalizedResponse>> + Send> {
        Ok(self.iterator(target, parameters)?.into_stream())
    }

    /// Fetch every page and concatenate the items
    pub async fn paginate(
        &self,
        target: impl Into<Target>,
        parameters: Option<Parameters>,
    ) -> Result<Vec<JsonValue>> {
        let pages = self.iterator(target, parameters)?;
        gather(pages, |page, _| page.into_items()).await
    }

    /// Fetch pages, map each one, and concatenate the mapped items
    ///
    /// `map_fn` may call [`EarlyExit::done`] to stop after the current page.
    pub async fn paginate_map<R, I, F>(
        &self,
        target: impl Into<Target>,
        parameters: Option<Parameters>,
        map_fn: F,
    ) -> Result<Vec<R>>
    where
        F: FnMut(NormalizedResponse, &mut EarlyExit) -> I,
        I: IntoIterator<Item = R>,
    {
        let pages = self.iterator(target, parameters)?;
        gather(pages, map_fn).await
    }

    /// Resolve a target into the transport and first request of a session
    fn session(
        &self,
        target: Target,
        parameters: Option<Parameters>,
    ) -> Result<(Arc<dyn Transport>, RequestDescriptor)> {
        match target {
            Target::Options(options) => {
                let options = options.with_parameters(parameters);
                Ok((self.transport.clone(), resolve(&options, &self.config)?))
            }
            Target::Route(route) => {
                let options =
                    EndpointOptions::from(Route::parse(&route)?).with_parameters(parameters);
                Ok((self.transport.clone(), resolve(&options, &self.config)?))
            }
            Target::Method(method) => {
                let options = method.endpoint(parameters);
                Ok((method.transport.clone(), resolve(&options, &self.config)?))
            }
        }
    }
}

impl fmt::Debug for Paginator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Paginator")
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}

/// Drain a session, mapping and concatenating every page
///
/// Stops when the iterator is exhausted or `map_fn` raised [`EarlyExit`].
/// The first error aborts the drain and discards collected items.
pub async fn gather<R, I, F>(mut pages: PageIterator, mut map_fn: F) -> Result<Vec<R>>
where
    F: FnMut(NormalizedResponse, &mut EarlyExit) -> I,
    I: IntoIterator<Item = R>,
{
    let mut results = Vec::new();

    while let Some(page) = pages.next_page().await {
        let page = page?;
        let mut exit = EarlyExit::new();
        results.extend(map_fn(page, &mut exit));

        if exit.is_requested() {
            debug!("Early exit after {} pages", pages.pages_fetched());
            break;
        }
    }

    info!(
        "Pagination complete: {} items in {} pages",
        results.len(),
        pages.pages_fetched()
    );
    Ok(results)
}

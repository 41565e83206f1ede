//! Tests for pagination module

use super::*;
use crate::config::ClientConfig;
use crate::endpoint::{EndpointOptions, Parameters, RequestMethod, Route};
use crate::error::{Error, Result};
use crate::http::{PageResponse, RequestDescriptor, Transport};
use crate::types::Method;
use async_trait::async_trait;
use futures::StreamExt;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

// ============================================================================
// Scripted transport
// ============================================================================

enum Step {
    Page(PageResponse),
    Fail(u16),
}

/// Replays canned responses and records every request it receives
#[derive(Default)]
struct ScriptedTransport {
    steps: Mutex<VecDeque<Step>>,
    requests: Mutex<Vec<RequestDescriptor>>,
}

impl ScriptedTransport {
    fn new() -> Self {
        Self::default()
    }

    fn page(self, url: &str, data: Value, next: Option<&str>) -> Self {
        let mut response = PageResponse::ok(url, data);
        if let Some(next) = next {
            response = response.header("link", format!("<{next}>; rel=\"next\""));
        }
        self.steps.lock().unwrap().push_back(Step::Page(response));
        self
    }

    fn fail(self, status: u16) -> Self {
        self.steps.lock().unwrap().push_back(Step::Fail(status));
        self
    }

    fn urls(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.url.clone())
            .collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: &RequestDescriptor) -> Result<PageResponse> {
        self.requests.lock().unwrap().push(request.clone());
        match self.steps.lock().unwrap().pop_front() {
            Some(Step::Page(mut response)) => {
                if response.url.is_empty() {
                    response.url = request.url.clone();
                }
                Ok(response)
            }
            Some(Step::Fail(status)) => Err(Error::http_status(status, "scripted failure")),
            None => Err(Error::Other(format!("unexpected request to {}", request.url))),
        }
    }
}

fn config() -> ClientConfig {
    ClientConfig::builder()
        .base_url("https://api.github.com")
        .build()
}

fn paginator(transport: &Arc<ScriptedTransport>) -> Paginator {
    Paginator::new(transport.clone(), config())
}

fn params(value: Value) -> Option<Parameters> {
    match value {
        Value::Object(map) => Some(map),
        _ => panic!("expected object"),
    }
}

const ORGS_PAGE_1: &str = "https://api.github.com/organizations?per_page=1";
const ORGS_PAGE_2: &str = "https://pagination-test.com/organizations?page=2&per_page=1";

fn two_org_pages() -> Arc<ScriptedTransport> {
    Arc::new(
        ScriptedTransport::new()
            .page(ORGS_PAGE_1, json!([{"id": 1}]), Some(ORGS_PAGE_2))
            .page(ORGS_PAGE_2, json!([{"id": 2}]), None),
    )
}

// ============================================================================
// Normalization Tests
// ============================================================================

#[test]
fn test_normalize_namespaced_response() {
    let (data, metadata) = normalize_data(json!({
        "total_count": 2,
        "repository_selection": "all",
        "widgets": [{"id": "a"}, {"id": "b"}]
    }));

    assert_eq!(data, json!([{"id": "a"}, {"id": "b"}]));
    assert_eq!(metadata.get("total_count"), Some(&json!(2)));
    assert_eq!(metadata.get("repository_selection"), Some(&json!("all")));
    assert_eq!(metadata.len(), 2);
}

#[test]
fn test_normalize_search_response() {
    let page = normalize(PageResponse::ok(
        "https://api.github.com/search/issues?q=x",
        json!({"total_count": 2, "incomplete_results": false, "items": [{"id": "123"}]}),
    ));

    assert_eq!(page.data, json!([{"id": "123"}]));
    assert_eq!(page.total_count(), Some(2));
    assert_eq!(page.incomplete_results(), Some(false));
    assert_eq!(page.repository_selection(), None);
}

#[test]
fn test_normalize_flat_array_is_noop() {
    let body = json!([{"id": 1}, {"id": 2}]);
    let (data, metadata) = normalize_data(body.clone());
    assert_eq!(data, body);
    assert!(metadata.is_empty());

    let (again, metadata) = normalize_data(data);
    assert_eq!(again, body);
    assert!(metadata.is_empty());
}

#[test]
fn test_normalize_combined_status_passes_through() {
    let body = json!({
        "state": "success",
        "total_count": 2,
        "statuses": [{"id": 1}, {"id": 2}]
    });
    let (data, metadata) = normalize_data(body.clone());
    assert_eq!(data, body);
    assert!(metadata.is_empty());
}

#[test]
fn test_normalize_single_resource_passes_through() {
    let body = json!({"id": 1, "login": "octokit"});
    let (data, _) = normalize_data(body.clone());
    assert_eq!(data, body);
}

#[test]
fn test_normalize_metadata_without_list_passes_through() {
    let body = json!({"total_count": 0, "message": "nothing"});
    let (data, metadata) = normalize_data(body.clone());
    assert_eq!(data, body);
    assert!(metadata.is_empty());
}

#[test]
fn test_normalize_null_body_is_empty_list() {
    let (data, metadata) = normalize_data(Value::Null);
    assert_eq!(data, json!([]));
    assert!(metadata.is_empty());
}

#[test]
fn test_normalize_keeps_total_commits() {
    let page = normalize(PageResponse::ok(
        "https://api.github.com/repos/o/r/compare/a...b",
        json!({"total_commits": 3, "commits": [{"sha": "c1"}]}),
    ));
    assert_eq!(page.data, json!([{"sha": "c1"}]));
    assert_eq!(page.total_commits(), Some(3));
}

// ============================================================================
// NormalizedResponse Tests
// ============================================================================

#[test]
fn test_items_of_list_and_single_value() {
    let page = normalize(PageResponse::ok("u", json!([1, 2, 3])));
    assert_eq!(page.item_count(), 3);
    assert_eq!(page.items(), vec![json!(1), json!(2), json!(3)]);

    let page = normalize(PageResponse::ok("u", json!({"id": 1})));
    assert_eq!(page.item_count(), 1);
    assert_eq!(page.into_items(), vec![json!({"id": 1})]);
}

#[test]
fn test_metadata_falls_back_to_body() {
    let page = normalize(PageResponse::ok(
        "u",
        json!({"status": "ahead", "total_commits": 5, "commits": [], "files": []}),
    ));
    assert!(page.metadata.is_empty());
    assert_eq!(page.total_commits(), Some(5));
}

#[test]
fn test_empty_page() {
    let page = NormalizedResponse::empty("https://x.test");
    assert_eq!(page.status, 200);
    assert!(page.headers.is_empty());
    assert_eq!(page.data, json!([]));
    assert!(page.into_items().is_empty());
}

#[test]
fn test_early_exit_flag() {
    let mut exit = EarlyExit::new();
    assert!(!exit.is_requested());
    exit.done();
    assert!(exit.is_requested());
}

// ============================================================================
// Target Tests
// ============================================================================

#[test]
fn test_target_conversions() {
    assert!(matches!(Target::from("GET /orgs"), Target::Route(ref r) if r == "GET /orgs"));
    assert!(matches!(
        Target::from(Route::new(Method::GET, "/orgs")),
        Target::Options(_)
    ));
    assert!(matches!(
        Target::from(EndpointOptions::new(Method::GET, "/orgs")),
        Target::Options(_)
    ));
}

// ============================================================================
// Iterator Tests
// ============================================================================

#[tokio::test]
async fn test_iterator_walks_link_headers() {
    let transport = two_org_pages();
    let mut pages = paginator(&transport)
        .iterator("GET /organizations", params(json!({"per_page": 1})))
        .unwrap();

    assert!(!pages.is_exhausted());

    let first = pages.next_page().await.unwrap().unwrap();
    assert_eq!(first.data, json!([{"id": 1}]));
    assert!(!pages.is_exhausted());

    let second = pages.next_page().await.unwrap().unwrap();
    assert_eq!(second.data, json!([{"id": 2}]));
    assert!(pages.is_exhausted());

    assert!(pages.next_page().await.is_none());
    assert_eq!(pages.pages_fetched(), 2);
    assert_eq!(transport.urls(), vec![ORGS_PAGE_1, ORGS_PAGE_2]);
}

#[tokio::test]
async fn test_iterator_keeps_method_and_headers() {
    let transport = two_org_pages();
    let options = EndpointOptions::new(Method::GET, "/organizations")
        .param("per_page", 1)
        .header("X-Trace", "abc");
    let mut pages = paginator(&transport).iterator(options, None).unwrap();

    while let Some(page) = pages.next_page().await {
        page.unwrap();
    }

    let requests = transport.requests.lock().unwrap();
    assert_eq!(requests.len(), 2);
    for request in requests.iter() {
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.headers.get("x-trace").unwrap(), "abc");
    }
}

#[tokio::test]
async fn test_iterator_non_paginating_endpoint() {
    let transport = Arc::new(ScriptedTransport::new().page(
        "https://api.github.com/orgs/myorg",
        json!({"id": 1}),
        None,
    ));
    let mut pages = paginator(&transport)
        .iterator("GET /orgs/{org}", params(json!({"org": "myorg"})))
        .unwrap();

    let page = pages.next_page().await.unwrap().unwrap();
    assert_eq!(page.items(), vec![json!({"id": 1})]);
    assert!(pages.next_page().await.is_none());
    assert_eq!(transport.urls(), vec!["https://api.github.com/orgs/myorg"]);
}

#[tokio::test]
async fn test_iterator_conflict_yields_empty_page() {
    let transport = Arc::new(ScriptedTransport::new().fail(409));
    let mut pages = paginator(&transport)
        .iterator(
            "GET /repos/{owner}/{repo}/commits",
            params(json!({"owner": "o", "repo": "empty"})),
        )
        .unwrap();

    let page = pages.next_page().await.unwrap().unwrap();
    assert_eq!(page.status, 200);
    assert!(page.headers.is_empty());
    assert_eq!(page.data, json!([]));

    assert!(pages.next_page().await.is_none());
    assert_eq!(transport.urls().len(), 1);
}

#[tokio::test]
async fn test_iterator_error_is_terminal() {
    let transport = Arc::new(
        ScriptedTransport::new()
            .fail(500)
            .page("https://api.github.com/organizations", json!([{"id": 1}]), None),
    );
    let mut pages = paginator(&transport)
        .iterator("GET /organizations", None)
        .unwrap();

    let err = pages.next_page().await.unwrap().unwrap_err();
    assert_eq!(err.status(), Some(500));

    assert!(pages.next_page().await.is_none());
    assert!(pages.is_exhausted());
    assert_eq!(transport.urls().len(), 1);
}

#[tokio::test]
async fn test_iterator_total_commits_pages() {
    let base = "https://api.github.com/repos/o/r/compare/a...b";
    let transport = Arc::new(
        ScriptedTransport::new()
            .page(
                &format!("{base}?per_page=1"),
                json!({"total_commits": 3, "commits": [{"sha": "c1"}]}),
                None,
            )
            .page(
                &format!("{base}?per_page=1&page=2"),
                json!({"total_commits": 3, "commits": [{"sha": "c2"}]}),
                None,
            )
            .page(
                &format!("{base}?per_page=1&page=3"),
                json!({"total_commits": 3, "commits": [{"sha": "c3"}]}),
                None,
            ),
    );

    let commits = paginator(&transport)
        .paginate(
            "GET /repos/{owner}/{repo}/compare/{basehead}",
            params(json!({"owner": "o", "repo": "r", "basehead": "a...b", "per_page": 1})),
        )
        .await
        .unwrap();

    assert_eq!(
        commits,
        vec![json!({"sha": "c1"}), json!({"sha": "c2"}), json!({"sha": "c3"})]
    );
    assert_eq!(
        transport.urls(),
        vec![
            format!("{base}?per_page=1"),
            format!("{base}?per_page=1&page=2"),
            format!("{base}?per_page=1&page=3"),
        ]
    );
}

#[tokio::test]
async fn test_total_commits_with_empty_page_size() {
    let base = "https://api.github.com/repos/o/r/compare/a...b";
    let transport = Arc::new(
        ScriptedTransport::new()
            .page("", json!({"total_commits": 300, "commits": [{"sha": "c1"}]}), None)
            .page("", json!({"total_commits": 300, "commits": [{"sha": "c2"}]}), None),
    );

    let shas = paginator(&transport)
        .paginate(
            "GET /repos/{owner}/{repo}/compare/{basehead}",
            params(json!({"owner": "o", "repo": "r", "basehead": "a...b", "per_page": ""})),
        )
        .await
        .unwrap();

    assert_eq!(shas, vec![json!({"sha": "c1"}), json!({"sha": "c2"})]);
    assert_eq!(
        transport.urls(),
        vec![format!("{base}?per_page="), format!("{base}?per_page=&page=2")]
    );
}

#[tokio::test]
async fn test_link_header_wins_over_total_commits() {
    let transport = Arc::new(
        ScriptedTransport::new()
            .page(
                "https://api.github.com/compare",
                json!({"total_commits": 100, "commits": [1]}),
                Some("https://elsewhere.test/compare?cursor=x"),
            )
            .page(
                "https://elsewhere.test/compare?cursor=x",
                json!({"total_commits": 100, "commits": [2]}),
                None,
            )
            .page(
                "https://elsewhere.test/compare?cursor=x&page=2",
                json!({"total_commits": 2, "commits": []}),
                None,
            ),
    );

    let mut pages = paginator(&transport).iterator("GET /compare", None).unwrap();
    pages.next_page().await.unwrap().unwrap();
    pages.next_page().await.unwrap().unwrap();

    assert_eq!(
        transport.urls(),
        vec![
            "https://api.github.com/compare",
            "https://elsewhere.test/compare?cursor=x"
        ]
    );
}

#[tokio::test]
async fn test_iterator_stream() {
    let transport = two_org_pages();
    let stream = paginator(&transport)
        .stream("GET /organizations", params(json!({"per_page": 1})))
        .unwrap();

    let pages: Vec<_> = stream.collect().await;
    assert_eq!(pages.len(), 2);
    let ids: Vec<Value> = pages
        .into_iter()
        .flat_map(|p| p.unwrap().into_items())
        .map(|org| org["id"].clone())
        .collect();
    assert_eq!(ids, vec![json!(1), json!(2)]);
}

#[test]
fn test_iterator_invalid_route() {
    let transport = Arc::new(ScriptedTransport::new());
    let result = paginator(&transport).iterator("organizations", None);
    assert!(matches!(result, Err(Error::Route { .. })));
}

#[test]
fn test_iterator_missing_url_parameter() {
    let transport = Arc::new(ScriptedTransport::new());
    let result = paginator(&transport).iterator("GET /orgs/{org}/repos", None);
    assert!(matches!(result, Err(Error::MissingParameter { .. })));
    assert!(transport.urls().is_empty());
}

// ============================================================================
// Gather Tests
// ============================================================================

#[tokio::test]
async fn test_paginate_concatenates_pages() {
    let transport = two_org_pages();
    let orgs = paginator(&transport)
        .paginate("GET /organizations", params(json!({"per_page": 1})))
        .await
        .unwrap();

    assert_eq!(orgs, vec![json!({"id": 1}), json!({"id": 2})]);
}

#[tokio::test]
async fn test_paginate_map() {
    let transport = two_org_pages();
    let ids = paginator(&transport)
        .paginate_map(
            "GET /organizations",
            params(json!({"per_page": 1})),
            |page, _| {
                page.into_items()
                    .into_iter()
                    .filter_map(|org| org["id"].as_u64())
                    .collect::<Vec<_>>()
            },
        )
        .await
        .unwrap();

    assert_eq!(ids, vec![1, 2]);
}

#[tokio::test]
async fn test_paginate_map_without_parameters() {
    let transport = Arc::new(ScriptedTransport::new().page(
        "https://api.github.com/organizations",
        json!([{"id": 7}]),
        None,
    ));
    let counts = paginator(&transport)
        .paginate_map("GET /organizations", None, |page, _| Some(page.item_count()))
        .await
        .unwrap();

    assert_eq!(counts, vec![1]);
    assert_eq!(transport.urls(), vec!["https://api.github.com/organizations"]);
}

#[tokio::test]
async fn test_paginate_early_exit() {
    let transport = two_org_pages();
    let ids = paginator(&transport)
        .paginate_map(
            "GET /organizations",
            params(json!({"per_page": 1})),
            |page, exit| {
                exit.done();
                page.into_items()
                    .into_iter()
                    .map(|org| org["id"].clone())
                    .collect::<Vec<_>>()
            },
        )
        .await
        .unwrap();

    assert_eq!(ids, vec![json!(1)]);
    assert_eq!(transport.urls(), vec![ORGS_PAGE_1]);
}

#[tokio::test]
async fn test_paginate_map_returning_placeholders() {
    let transport = two_org_pages();
    let results = paginator(&transport)
        .paginate_map(
            "GET /organizations",
            params(json!({"per_page": 1})),
            |_, _| vec![Value::Null],
        )
        .await
        .unwrap();

    assert_eq!(results, vec![Value::Null, Value::Null]);
}

#[tokio::test]
async fn test_paginate_conflict_returns_empty() {
    let transport = Arc::new(ScriptedTransport::new().fail(409));
    let commits = paginator(&transport)
        .paginate(
            "GET /repos/{owner}/{repo}/commits",
            params(json!({"owner": "o", "repo": "r"})),
        )
        .await
        .unwrap();

    assert!(commits.is_empty());
}

#[tokio::test]
async fn test_paginate_error_discards_partial_results() {
    let transport = Arc::new(
        ScriptedTransport::new()
            .page(ORGS_PAGE_1, json!([{"id": 1}]), Some(ORGS_PAGE_2))
            .fail(404),
    );
    let err = paginator(&transport)
        .paginate("GET /organizations", params(json!({"per_page": 1})))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert_eq!(transport.urls().len(), 2);
}

#[tokio::test]
async fn test_paginate_namespaced_pages() {
    let page_1 = "https://api.github.com/installation/repositories?per_page=1";
    let page_2 = "https://api.github.com/installation/repositories?per_page=1&page=2";
    let transport = Arc::new(
        ScriptedTransport::new()
            .page(
                page_1,
                json!({"total_count": 2, "repositories": [{"id": "123"}]}),
                Some(page_2),
            )
            .page(
                page_2,
                json!({
                    "total_count": 2,
                    "repository_selection": "all",
                    "repositories": [{"id": "456"}]
                }),
                None,
            ),
    );

    let repos = paginator(&transport)
        .paginate(
            EndpointOptions::new(Method::GET, "/installation/repositories").param("per_page", 1),
            None,
        )
        .await
        .unwrap();

    assert_eq!(repos, vec![json!({"id": "123"}), json!({"id": "456"})]);
}

#[tokio::test]
async fn test_paginate_many_pages() {
    let mut script = ScriptedTransport::new();
    for page in 1..=200 {
        let url = format!("https://api.github.com/items?page={page}");
        let next = (page < 200).then(|| format!("https://api.github.com/items?page={}", page + 1));
        script = script.page(&url, json!([page]), next.as_deref());
    }
    let transport = Arc::new(script);

    let items = paginator(&transport)
        .paginate("GET /items", params(json!({"page": 1})))
        .await
        .unwrap();

    assert_eq!(items.len(), 200);
    assert_eq!(items.first(), Some(&json!(1)));
    assert_eq!(items.last(), Some(&json!(200)));
}

#[tokio::test]
async fn test_paginate_request_method_uses_bound_transport() {
    let shared = Arc::new(ScriptedTransport::new());
    let bound = Arc::new(ScriptedTransport::new().page(
        "https://api.github.com/projects/columns/123/cards",
        json!([{"id": 123}]),
        None,
    ));

    let method = RequestMethod::new(
        Route::parse("GET /projects/columns/{column_id}/cards").unwrap(),
        bound.clone(),
    );
    let cards = paginator(&shared)
        .paginate(method, params(json!({"column_id": 123})))
        .await
        .unwrap();

    assert_eq!(cards, vec![json!({"id": 123})]);
    assert!(shared.urls().is_empty());
    assert_eq!(bound.urls().len(), 1);
}

#[tokio::test]
async fn test_concurrent_sessions_are_independent() {
    let transport = Arc::new(
        ScriptedTransport::new()
            .page("https://api.github.com/a", json!([1]), None)
            .page("https://api.github.com/b", json!([2]), None),
    );
    let paginator = paginator(&transport);

    let mut first = paginator.iterator("GET /a", None).unwrap();
    let mut second = paginator.iterator("GET /b", None).unwrap();

    first.next_page().await.unwrap().unwrap();
    second.next_page().await.unwrap().unwrap();

    assert!(first.is_exhausted());
    assert!(second.is_exhausted());
    assert_eq!(
        transport.urls(),
        vec!["https://api.github.com/a", "https://api.github.com/b"]
    );
}

#[test]
fn test_gather_blocking() {
    let transport = two_org_pages();
    let pages = paginator(&transport)
        .iterator("GET /organizations", params(json!({"per_page": 1})))
        .unwrap();

    let counts = tokio_test::block_on(gather(pages, |page, _| vec![page.item_count()])).unwrap();
    assert_eq!(counts, vec![1, 1]);
}

use futures::stream::{self, StreamExt};
use reqwest::header::CONTENT_TYPE;
use url::Url;

use super::http::{is_usable_status, may_fetch};
use super::map::FeedsMap;
use super::recovered::{Recovered, Stage};

/// Conventional feed locations, tried against the page URL when it
/// advertises no feed. Root-absolute entries first, then page-relative ones.
pub const POSSIBLE_FEED_PATHS: [&str; 22] = [
    "/atom",
    "/atom.xml",
    "/feed",
    "/feed/",
    "/feed.rss",
    "/feed.xml",
    "/index.rss",
    "/index.xml",
    "/rss",
    "/rss/",
    "/rss.xml",
    "atom",
    "atom.xml",
    "feed",
    "feed/",
    "feed.rss",
    "feed.xml",
    "index.rss",
    "index.xml",
    "rss",
    "rss/",
    "rss.xml",
];

/// Summary of one probing pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProbeOutcome {
    pub found_any: bool,
    /// Requests actually sent; only reported, never used for decisions.
    pub request_count: usize,
}

/// Probes every conventional feed path under `base` at once and adds the
/// ones that answer with a feed-like content type.
///
/// Candidates that resolve to the same URL are requested once, and URLs
/// already in `feeds` are skipped. Accepted feeds are keyed by the final URL
/// after redirects, in completion order. A failed probe is just a miss.
pub async fn check_common_feed_paths(
    client: &reqwest::Client,
    base: &Url,
    feeds: &mut FeedsMap,
    allow_private_hosts: bool,
) -> ProbeOutcome {
    let mut candidates: Vec<Url> = Vec::with_capacity(POSSIBLE_FEED_PATHS.len());
    for path in POSSIBLE_FEED_PATHS {
        let Ok(candidate) = base.join(path) else {
            continue;
        };
        if feeds.contains(candidate.as_str()) || candidates.contains(&candidate) {
            continue;
        }
        if may_fetch(allow_private_hosts, &candidate) {
            candidates.push(candidate);
        }
    }

    let request_count = candidates.len();
    if request_count == 0 {
        return ProbeOutcome::default();
    }

    let hits: Vec<Url> = stream::iter(candidates)
        .map(|candidate| async move {
            match probe_one(client, candidate).await {
                Ok(hit) => hit,
                Err(recovered) => {
                    recovered.log();
                    None
                }
            }
        })
        .buffer_unordered(request_count)
        .filter_map(|hit| async move { hit })
        .collect()
        .await;

    let mut found_any = false;
    for hit in hits {
        found_any = true;
        feeds.insert_discovered(hit.to_string());
    }

    tracing::debug!(base = %base, requests = request_count, found_any, "Probed common feed paths");
    ProbeOutcome { found_any, request_count }
}

/// `Ok(Some(final_url))` when the candidate looks like a feed.
async fn probe_one(client: &reqwest::Client, candidate: Url) -> Result<Option<Url>, Recovered> {
    let subject = candidate.to_string();
    let response = client
        .get(candidate)
        .send()
        .await
        .map_err(|e| Recovered::new(Stage::Probe, subject.as_str(), e))?;

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_ascii_lowercase();

    let feedish = ["xml", "rss", "atom"].iter().any(|kind| content_type.contains(kind));
    if is_usable_status(response.status()) && feedish {
        Ok(Some(response.url().clone()))
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn probe(server: &MockServer, page: &str) -> (ProbeOutcome, Vec<String>) {
        let base = Url::parse(&format!("{}{page}", server.uri())).unwrap();
        let mut feeds = FeedsMap::new();
        let outcome = check_common_feed_paths(&reqwest::Client::new(), &base, &mut feeds, true).await;
        let urls = feeds.into_entries().into_iter().map(|e| e.url).collect();
        (outcome, urls)
    }

    #[tokio::test]
    async fn test_accepts_xml_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rss.xml"))
            .respond_with(ResponseTemplate::new(200).insert_header("Content-Type", "text/xml; charset=utf-8"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let (outcome, urls) = probe(&server, "/").await;

        assert!(outcome.found_any);
        assert_eq!(urls, vec![format!("{}/rss.xml", server.uri())]);
    }

    #[tokio::test]
    async fn test_html_response_rejected_even_when_ok() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).insert_header("Content-Type", "text/html"))
            .mount(&server)
            .await;

        let (outcome, urls) = probe(&server, "/").await;

        assert!(!outcome.found_any);
        assert!(urls.is_empty());
    }

    #[tokio::test]
    async fn test_not_modified_with_atom_type_accepted() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/atom"))
            .respond_with(
                ResponseTemplate::new(304).insert_header("Content-Type", "application/atom+xml"),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).insert_header("Content-Type", "application/xml"))
            .mount(&server)
            .await;

        let (outcome, urls) = probe(&server, "/").await;

        assert!(outcome.found_any);
        assert_eq!(urls, vec![format!("{}/atom", server.uri())]);
    }

    #[tokio::test]
    async fn test_root_page_dedupes_relative_candidates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .expect(11)
            .mount(&server)
            .await;

        // At the root, "feed" and "/feed" are the same URL
        let (outcome, _) = probe(&server, "/").await;
        assert_eq!(outcome.request_count, 11);
    }

    #[tokio::test]
    async fn test_nested_page_probes_both_sets() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/blog/feed/"))
            .respond_with(ResponseTemplate::new(200).insert_header("Content-Type", "application/rss+xml"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let (outcome, urls) = probe(&server, "/blog/").await;

        assert_eq!(outcome.request_count, 22);
        assert_eq!(urls, vec![format!("{}/blog/feed/", server.uri())]);
    }

    #[tokio::test]
    async fn test_redirected_probe_keyed_by_final_url() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/feed"))
            .respond_with(
                ResponseTemplate::new(301).insert_header("Location", "/feeds/main.xml"),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/feeds/main.xml"))
            .respond_with(ResponseTemplate::new(200).insert_header("Content-Type", "application/rss+xml"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let (_, urls) = probe(&server, "/").await;

        assert_eq!(urls, vec![format!("{}/feeds/main.xml", server.uri())]);
    }

    #[tokio::test]
    async fn test_network_failures_swallowed() {
        let client = reqwest::Client::builder()
            .proxy(reqwest::Proxy::all("http://127.0.0.1:1").unwrap())
            .build()
            .unwrap();
        let base = Url::parse("http://example.com/").unwrap();
        let mut feeds = FeedsMap::new();

        let outcome = check_common_feed_paths(&client, &base, &mut feeds, false).await;

        assert!(!outcome.found_any);
        assert_eq!(outcome.request_count, 11);
        assert!(feeds.is_empty());
    }
}

use futures::future::join_all;
use thiserror::Error;
use url::Url;

use super::html::parse_html_for_feeds;
use super::http::{build_client, is_usable_status, read_limited_bytes, FetchError};
use super::map::{FeedEntry, FeedsMap};
use super::probe::check_common_feed_paths;
use super::recovered::{Recovered, Stage};
use super::rules::RuleRegistry;
use super::title::fetch_feed_title;
use crate::config::Config;

/// Errors that end a discovery run without a result.
///
/// The `Display` text is shown to the caller as-is.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The target page could not be fetched and no rule matched.
    #[error("Error fetching URL: {0}")]
    Fetch(#[from] FetchError),
    /// The target page answered with an unusable status and no rule matched.
    #[error("Unable to access URL: Status {0}")]
    Status(u16),
    /// Nothing turned up from rules, link tags, or probing.
    #[error("No feeds found on this site.")]
    NoFeeds,
}

impl DiscoveryError {
    /// Short tag recorded in analytics events.
    pub fn kind(&self) -> String {
        match self {
            DiscoveryError::Fetch(_) => "fetch_error".to_owned(),
            DiscoveryError::Status(code) => format!("http_{code}"),
            DiscoveryError::NoFeeds => "no_feeds".to_owned(),
        }
    }
}

/// Which source first produced feeds during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    Rule,
    Scrape,
    Guess,
    #[default]
    None,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Rule => "rule",
            Method::Scrape => "scrape",
            Method::Guess => "guess",
            Method::None => "none",
        }
    }
}

/// Outcome of [`Discovery::discover`] plus the counters analytics wants.
#[derive(Debug)]
pub struct DiscoveryRun {
    pub result: Result<Vec<FeedEntry>, DiscoveryError>,
    pub method: Method,
    /// Outbound requests made: target page, probes and title fetches.
    pub external_requests: usize,
    /// Status of the target page response, if one arrived.
    pub upstream_status: Option<u16>,
}

/// The feed discovery engine.
///
/// Runs rules, then fetches the page and scans its link tags, then probes
/// conventional paths if nothing was found, then resolves missing titles.
/// Holds no per-lookup state, so one instance serves concurrent lookups.
#[derive(Debug, Clone)]
pub struct Discovery {
    client: reqwest::Client,
    rules: RuleRegistry,
    max_body_bytes: usize,
    allow_private_hosts: bool,
}

impl Discovery {
    pub fn new(client: reqwest::Client, rules: RuleRegistry, config: &Config) -> Self {
        Self {
            client,
            rules,
            max_body_bytes: config.max_body_bytes,
            allow_private_hosts: config.allow_private_hosts,
        }
    }

    /// Engine with the built-in rules and a client built from `config`.
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_client(config)?, RuleRegistry::builtin(), config))
    }

    pub fn rules(&self) -> &RuleRegistry {
        &self.rules
    }

    /// Discovers the feeds for `url`. `raw_url` is the string the caller
    /// submitted; rules see it unmodified.
    pub async fn discover(&self, raw_url: &str, url: &Url) -> DiscoveryRun {
        let mut stats = RunStats::default();
        let result = self.run(raw_url, url, &mut stats).await;

        tracing::info!(
            url = %url,
            method = stats.method.as_str(),
            feeds = result.as_ref().map(Vec::len).unwrap_or(0),
            requests = stats.external_requests,
            "Discovery finished"
        );

        DiscoveryRun {
            result,
            method: stats.method,
            external_requests: stats.external_requests,
            upstream_status: stats.upstream_status,
        }
    }

    async fn run(
        &self,
        raw_url: &str,
        url: &Url,
        stats: &mut RunStats,
    ) -> Result<Vec<FeedEntry>, DiscoveryError> {
        let mut feeds = FeedsMap::new();

        // Rules first, so their feeds survive an unreachable target
        let hostname = url.host_str().unwrap_or_default();
        if self.rules.apply(raw_url, hostname, &mut feeds) > 0 {
            stats.method = Method::Rule;
        }

        stats.external_requests += 1;
        let page = match self.fetch_page(url, stats).await {
            Ok(page) => Some(page),
            Err(e) if feeds.is_empty() => return Err(e),
            Err(e) => {
                Recovered::new(Stage::TargetFetch, url.as_str(), &e).log();
                None
            }
        };

        if let Some(page) = &page {
            let before = feeds.len();
            if let Err(recovered) = parse_html_for_feeds(&page.body, &page.final_url, &mut feeds) {
                recovered.log();
            }
            if feeds.len() > before && stats.method == Method::None {
                stats.method = Method::Scrape;
            }
        }

        // Probing needs the final URL of a fetched page
        if let (true, Some(page)) = (feeds.is_empty(), &page) {
            let outcome = check_common_feed_paths(
                &self.client,
                &page.final_url,
                &mut feeds,
                self.allow_private_hosts,
            )
            .await;
            stats.external_requests += outcome.request_count;
            if outcome.found_any {
                stats.method = Method::Guess;
            }
        }

        // Rules again, so derivations can build on feeds the page advertised
        if self.rules.apply(raw_url, hostname, &mut feeds) > 0 && stats.method == Method::None {
            stats.method = Method::Rule;
        }

        if feeds.is_empty() {
            return Err(DiscoveryError::NoFeeds);
        }

        let mut entries = feeds.into_entries();
        stats.external_requests += entries.iter().filter(|e| e.title.is_none()).count();

        // join_all yields results in input order, whatever order the fetches finish in
        let titles = join_all(entries.iter().map(|entry| async move {
            match &entry.title {
                Some(title) => Some(title.clone()),
                None => {
                    fetch_feed_title(
                        &self.client,
                        &entry.url,
                        self.max_body_bytes,
                        self.allow_private_hosts,
                    )
                    .await
                }
            }
        }))
        .await;

        for (entry, title) in entries.iter_mut().zip(titles) {
            entry.title = title;
        }
        Ok(entries)
    }

    async fn fetch_page(&self, url: &Url, stats: &mut RunStats) -> Result<Page, DiscoveryError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(FetchError::from)?;

        let status = response.status();
        stats.upstream_status = Some(status.as_u16());
        if !is_usable_status(status) {
            return Err(DiscoveryError::Status(status.as_u16()));
        }

        let final_url = response.url().clone();
        let body = read_limited_bytes(response, self.max_body_bytes).await?;
        Ok(Page { final_url, body })
    }
}

#[derive(Default)]
struct RunStats {
    method: Method,
    external_requests: usize,
    upstream_status: Option<u16>,
}

/// The fetched target page. `final_url` is after redirects.
struct Page {
    final_url: Url,
    body: Vec<u8>,
}

//! The lookup orchestrator: request gates, then feed discovery.
//!
//! Gates run in a fixed order and each one short-circuits:
//!
//! 1. CAPTCHA token present (400)
//! 2. Turnstile secret configured (500)
//! 3. Token verifies (403)
//! 4. URL present (400), parses (400), allowed by the URL policy (400)
//! 5. IP rate limit, then domain rate limit (429)
//!
//! Nothing touches the network before step 3, and the target is never
//! fetched before step 5 passes.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::time::Instant;
use url::Url;

use crate::abuse::{RateLimitRejection, RateLimiter, TurnstileVerifier};
use crate::analytics::{AnalyticsEvent, EventName, EventSink, EventStatus, TracingSink};
use crate::config::Config;
use crate::feed::{build_client, Discovery, DiscoveryError, FeedEntry, Method, RuleRegistry};
use crate::util::{check_url_policy, UrlValidationError};

/// Body of a lookup request.
///
/// Fields of the wrong type make the whole body unreadable; callers treat
/// that as an empty request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LookupRequest {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, alias = "cloudflareToken", alias = "cf-turnstile-response")]
    pub token: Option<String>,
}

/// One discovered feed as returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedResult {
    pub url: String,
    pub title: Option<String>,
    pub is_from_rule: bool,
}

impl From<FeedEntry> for FeedResult {
    fn from(entry: FeedEntry) -> Self {
        Self {
            url: entry.url,
            title: entry.title,
            is_from_rule: entry.from_rule,
        }
    }
}

/// Lookup outcome. `status` doubles as the HTTP status code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupResponse {
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Vec<FeedResult>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl LookupResponse {
    fn success(feeds: Vec<FeedEntry>) -> Self {
        Self {
            status: 200,
            result: Some(feeds.into_iter().map(FeedResult::from).collect()),
            message: None,
        }
    }
}

impl From<&LookupError> for LookupResponse {
    fn from(err: &LookupError) -> Self {
        Self {
            status: err.status(),
            result: None,
            message: Some(err.to_string()),
        }
    }
}

/// Every way a lookup can end without feeds. `Display` is the caller-facing
/// message.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Cloudflare Turnstile token missing.")]
    TokenMissing,
    #[error("Cloudflare Turnstile is not configured on this server.")]
    CaptchaUnconfigured,
    #[error("Cloudflare Turnstile verification failed.")]
    CaptchaFailed,
    #[error("Missing 'url' field.")]
    MissingUrl,
    #[error("Invalid URL format provided.")]
    InvalidUrl,
    #[error("URL not allowed: {0}")]
    DisallowedUrl(UrlValidationError),
    #[error(transparent)]
    RateLimited(#[from] RateLimitRejection),
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
}

impl LookupError {
    pub fn status(&self) -> u16 {
        match self {
            LookupError::TokenMissing
            | LookupError::MissingUrl
            | LookupError::InvalidUrl
            | LookupError::DisallowedUrl(_) => 400,
            LookupError::CaptchaFailed => 403,
            LookupError::CaptchaUnconfigured => 500,
            LookupError::RateLimited(_) => 429,
            LookupError::Discovery(DiscoveryError::NoFeeds) => 404,
            LookupError::Discovery(DiscoveryError::Fetch(_) | DiscoveryError::Status(_)) => 502,
        }
    }

    /// Short tag recorded in analytics events.
    pub fn kind(&self) -> String {
        match self {
            LookupError::TokenMissing => "token_missing".to_owned(),
            LookupError::CaptchaUnconfigured => "captcha_unconfigured".to_owned(),
            LookupError::CaptchaFailed => "captcha_failed".to_owned(),
            LookupError::MissingUrl => "missing_url".to_owned(),
            LookupError::InvalidUrl => "invalid_url".to_owned(),
            LookupError::DisallowedUrl(_) => "disallowed_url".to_owned(),
            LookupError::RateLimited(rejection) => rejection.scope.as_str().to_owned(),
            LookupError::Discovery(e) => e.kind(),
        }
    }

    fn event_status(&self) -> EventStatus {
        match self {
            LookupError::RateLimited(_) => EventStatus::Blocked,
            LookupError::Discovery(DiscoveryError::NoFeeds) => EventStatus::NoFeeds,
            _ => EventStatus::Error,
        }
    }
}

/// Per-lookup bookkeeping for the analytics event.
#[derive(Default)]
struct Outcome {
    method: Method,
    external_requests: usize,
    upstream_status: Option<u16>,
}

/// Runs lookups end to end. One instance is shared by every request.
#[derive(Clone)]
pub struct LookupService {
    verifier: TurnstileVerifier,
    limiter: RateLimiter,
    discovery: Discovery,
    sink: Arc<dyn EventSink>,
    allow_private_hosts: bool,
}

impl LookupService {
    pub fn new(verifier: TurnstileVerifier, limiter: RateLimiter, discovery: Discovery) -> Self {
        Self {
            verifier,
            limiter,
            discovery,
            sink: Arc::new(TracingSink),
            allow_private_hosts: false,
        }
    }

    /// Service wired from configuration with one shared HTTP client.
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let client = build_client(config)?;
        let discovery = Discovery::new(client.clone(), RuleRegistry::builtin(), config);
        let verifier = TurnstileVerifier::from_config(config, client.clone());
        let limiter = RateLimiter::from_config(&config.rate_limit, client);
        Ok(Self::new(verifier, limiter, discovery).allow_private_hosts(config.allow_private_hosts))
    }

    pub fn with_event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn with_rate_limiter(mut self, limiter: RateLimiter) -> Self {
        self.limiter = limiter;
        self
    }

    pub fn with_discovery(mut self, discovery: Discovery) -> Self {
        self.discovery = discovery;
        self
    }

    pub fn with_verifier(mut self, verifier: TurnstileVerifier) -> Self {
        self.verifier = verifier;
        self
    }

    /// Whether localhost and private-network targets pass the URL policy.
    pub fn allow_private_hosts(mut self, allow: bool) -> Self {
        self.allow_private_hosts = allow;
        self
    }

    /// Runs one lookup. `source` tags the analytics event (`api`, `cli`, ...).
    pub async fn lookup(
        &self,
        request: LookupRequest,
        client_ip: Option<&str>,
        source: &str,
    ) -> LookupResponse {
        let started = Instant::now();
        let mut outcome = Outcome::default();
        let result = self.run(&request, client_ip, source, &mut outcome).await;

        let (status, feed_count, error_type) = match &result {
            Ok(feeds) => (EventStatus::Success, feeds.len(), None),
            Err(e) => (e.event_status(), 0, Some(e.kind())),
        };
        self.sink.record(&AnalyticsEvent {
            name: EventName::Lookup,
            status,
            method: outcome.method,
            error_type,
            source: source.to_owned(),
            feed_count,
            duration: started.elapsed(),
            upstream_status: outcome.upstream_status,
            external_requests: outcome.external_requests,
        });

        match result {
            Ok(feeds) => LookupResponse::success(feeds),
            Err(e) => {
                tracing::debug!(status = e.status(), kind = %e.kind(), "Lookup refused");
                LookupResponse::from(&e)
            }
        }
    }

    async fn run(
        &self,
        request: &LookupRequest,
        client_ip: Option<&str>,
        source: &str,
        outcome: &mut Outcome,
    ) -> Result<Vec<FeedEntry>, LookupError> {
        let token = request
            .token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(LookupError::TokenMissing)?;

        if !self.verifier.is_configured() {
            tracing::error!("Lookup refused: Turnstile secret is not configured");
            return Err(LookupError::CaptchaUnconfigured);
        }
        if !self.verifier.verify(token, client_ip).await {
            return Err(LookupError::CaptchaFailed);
        }

        let raw_url = request
            .url
            .as_deref()
            .filter(|u| !u.is_empty())
            .ok_or(LookupError::MissingUrl)?;
        let url = Url::parse(raw_url).map_err(|_| LookupError::InvalidUrl)?;
        self.check_target(&url)?;

        let hostname = url.host_str().unwrap_or_default();
        if let Err(rejection) = self.limiter.check(client_ip, hostname).await {
            self.record_rate_limit(&rejection, source);
            return Err(rejection.into());
        }

        let run = self.discovery.discover(raw_url, &url).await;
        outcome.method = run.method;
        outcome.external_requests = run.external_requests;
        outcome.upstream_status = run.upstream_status;
        Ok(run.result?)
    }

    fn check_target(&self, url: &Url) -> Result<(), LookupError> {
        match check_url_policy(url) {
            Ok(()) => Ok(()),
            Err(e @ UrlValidationError::UnsupportedScheme(_)) => Err(LookupError::DisallowedUrl(e)),
            Err(_) if self.allow_private_hosts => Ok(()),
            Err(e) => Err(LookupError::DisallowedUrl(e)),
        }
    }

    fn record_rate_limit(&self, rejection: &RateLimitRejection, source: &str) {
        let mut event = AnalyticsEvent::new(EventName::RateLimit, EventStatus::Blocked, source);
        event.error_type = Some(format!("{}_limit_exceeded", rejection.scope.as_str()));
        event.upstream_status = Some(429);
        self.sink.record(&event);
    }
}

impl std::fmt::Debug for LookupService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LookupService")
            .field("verifier", &self.verifier)
            .field("limiter", &self.limiter)
            .field("discovery", &self.discovery)
            .field("allow_private_hosts", &self.allow_private_hosts)
            .finish()
    }
}

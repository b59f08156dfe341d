use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

use super::store::{LimitStore, MemoryStore, SlidingWindow, UpstashStore};
use crate::config::{RateLimitBackend, RateLimitConfig};

/// Hosts that legitimately see heavy lookup traffic and get a larger domain
/// quota. Matched against the exact host and its registrable domain.
pub const HIGH_TRAFFIC_DOMAINS: &[&str] = &[
    "youtube.com",
    "www.youtube.com",
    "youtu.be",
    "vimeo.com",
    "www.vimeo.com",
    "twitch.tv",
    "www.twitch.tv",
    "reddit.com",
    "www.reddit.com",
    "old.reddit.com",
    "twitter.com",
    "www.twitter.com",
    "x.com",
    "www.x.com",
    "github.com",
    "www.github.com",
    "gitlab.com",
    "www.gitlab.com",
    "news.ycombinator.com",
    "stackoverflow.com",
    "www.stackoverflow.com",
    "stackexchange.com",
    "www.stackexchange.com",
    "podcasts.apple.com",
    "open.spotify.com",
];

const IP_PREFIX: &str = "ratelimit:ip";
const DOMAIN_PREFIX: &str = "ratelimit:domain";
const DOMAIN_HIGH_TRAFFIC_PREFIX: &str = "ratelimit:domain-ht";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitScope {
    Ip,
    Domain,
}

impl LimitScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            LimitScope::Ip => "ip",
            LimitScope::Domain => "domain",
        }
    }
}

/// A request refused by one of the limiters. The message is shown to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RateLimitRejection {
    pub scope: LimitScope,
    pub message: String,
}

impl RateLimitRejection {
    fn ip() -> Self {
        Self {
            scope: LimitScope::Ip,
            message: "You've hit the rate limit. Please try again later.".to_string(),
        }
    }

    fn domain(hostname: &str) -> Self {
        Self {
            scope: LimitScope::Domain,
            message: format!(
                "The domain {hostname} has been queried too many times recently. \
                 Rate limiting helps prevent abuse and keeps the service free for everyone. \
                 Please wait an hour and try again, or if you believe this is an error, \
                 open an issue at https://github.com/mratmeyer/rsslookup/issues with the domain name."
            ),
        }
    }
}

/// Per-IP and per-domain sliding-window limits.
///
/// Without a store every check passes. A store that errors also lets the
/// request through, with a warning.
#[derive(Clone)]
pub struct RateLimiter {
    store: Option<Arc<dyn LimitStore>>,
    ip: SlidingWindow,
    domain: SlidingWindow,
    domain_high_traffic: SlidingWindow,
}

impl RateLimiter {
    pub fn new(store: Option<Arc<dyn LimitStore>>, config: &RateLimitConfig) -> Self {
        let domain_window = Duration::from_secs(config.domain_window_secs);
        Self {
            store,
            ip: SlidingWindow::new(
                IP_PREFIX,
                config.ip_requests,
                Duration::from_secs(config.ip_window_secs),
            ),
            domain: SlidingWindow::new(DOMAIN_PREFIX, config.domain_requests, domain_window),
            domain_high_traffic: SlidingWindow::new(
                DOMAIN_HIGH_TRAFFIC_PREFIX,
                config
                    .domain_requests
                    .saturating_mul(config.high_traffic_multiplier),
                domain_window,
            ),
        }
    }

    /// Limiter that never rejects.
    pub fn disabled() -> Self {
        Self::new(None, &RateLimitConfig::default())
    }

    /// Picks the store named by `config.backend`. `client` is only used to
    /// reach Upstash.
    pub fn from_config(config: &RateLimitConfig, client: reqwest::Client) -> Self {
        let upstash = || match (&config.upstash_url, &config.upstash_token) {
            (Some(url), Some(token)) => Some(Arc::new(UpstashStore::new(
                client.clone(),
                url.clone(),
                SecretString::from(token.clone()),
            )) as Arc<dyn LimitStore>),
            _ => None,
        };

        let store: Option<Arc<dyn LimitStore>> = match config.backend {
            RateLimitBackend::Memory => Some(Arc::new(MemoryStore::new())),
            RateLimitBackend::Upstash | RateLimitBackend::Auto => upstash(),
            RateLimitBackend::Disabled => None,
        };

        match (&store, config.backend) {
            (Some(_), backend) => {
                tracing::info!(backend = ?backend, "Rate limiting enabled");
            }
            (None, RateLimitBackend::Disabled) => {
                tracing::info!("Rate limiting disabled by configuration");
            }
            (None, _) => {
                tracing::warn!("Upstash Redis not configured, rate limiting is off");
            }
        }

        Self::new(store, config)
    }

    pub fn is_enabled(&self) -> bool {
        self.store.is_some()
    }

    /// Checks the IP limit, then the domain limit for `hostname`.
    ///
    /// The domain is not counted when the IP limit already rejected the
    /// request. A missing IP skips the IP check; an empty hostname skips the
    /// domain check.
    pub async fn check(&self, ip: Option<&str>, hostname: &str) -> Result<(), RateLimitRejection> {
        let Some(store) = &self.store else {
            return Ok(());
        };

        if let Some(ip) = ip.filter(|ip| !ip.is_empty()) {
            if !self.allowed(store.as_ref(), &self.ip, ip).await {
                tracing::info!(ip = %ip, "IP rate limit exceeded");
                return Err(RateLimitRejection::ip());
            }
        }

        if !hostname.is_empty() {
            let domain = registrable_domain(hostname);
            let window = if is_high_traffic_domain(hostname, &domain) {
                &self.domain_high_traffic
            } else {
                &self.domain
            };
            if !self.allowed(store.as_ref(), window, &domain).await {
                tracing::info!(domain = %domain, "Domain rate limit exceeded");
                return Err(RateLimitRejection::domain(hostname));
            }
        }

        Ok(())
    }

    async fn allowed(&self, store: &dyn LimitStore, window: &SlidingWindow, id: &str) -> bool {
        match store.limit(window, id).await {
            Ok(allowed) => allowed,
            Err(e) => {
                tracing::warn!(error = %e, limiter = window.prefix, "Rate-limit store failed, allowing request");
                true
            }
        }
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("enabled", &self.store.is_some())
            .field("ip", &self.ip)
            .field("domain", &self.domain)
            .field("domain_high_traffic", &self.domain_high_traffic)
            .finish()
    }
}

/// The public-suffix-aware registrable domain of `hostname`
/// (`news.bbc.co.uk` → `bbc.co.uk`).
///
/// IP literals, single-label hosts, and bare public suffixes come back
/// lower-cased and otherwise unchanged.
pub fn registrable_domain(hostname: &str) -> String {
    let host = hostname.trim_end_matches('.').to_ascii_lowercase();
    let bare = host.trim_start_matches('[').trim_end_matches(']');
    if bare.parse::<IpAddr>().is_ok() {
        return host;
    }
    psl::domain_str(&host)
        .map(str::to_owned)
        .unwrap_or(host)
}

/// Whether `hostname` or its registrable `domain` is on the high-traffic list.
pub fn is_high_traffic_domain(hostname: &str, domain: &str) -> bool {
    let host = hostname.to_ascii_lowercase();
    HIGH_TRAFFIC_DOMAINS.contains(&host.as_str()) || HIGH_TRAFFIC_DOMAINS.contains(&domain)
}

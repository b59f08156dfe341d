//! Configuration file parser for the lookup service.
//!
//! The config file is optional: a missing file yields `Config::default()`.
//! Secrets may also come from the environment, which wins over the file.
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config file exceeds maximum allowed size.
    #[error("Config file too large: {0}")]
    TooLarge(String),
}

// ============================================================================
// Configuration Structs
// ============================================================================

pub const DEFAULT_TURNSTILE_VERIFY_URL: &str =
    "https://challenges.cloudflare.com/turnstile/v0/siteverify";

/// Top-level service configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
/// Built once at startup and passed by reference; nothing reads the
/// environment after [`Config::apply_env_overrides`].
///
/// Custom Debug impl masks the Turnstile secret and Upstash token.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address the HTTP server listens on.
    pub bind: String,

    /// User agent sent on every outbound request.
    pub user_agent: String,

    /// Per-request timeout for outbound fetches, in seconds.
    pub request_timeout_secs: u64,

    /// Largest response body read from the target page or a feed.
    pub max_body_bytes: usize,

    /// Permit lookups of localhost and private-network addresses.
    pub allow_private_hosts: bool,

    /// Turnstile shared secret (`CLOUDFLARE_TURNSTILE_SECRET` wins).
    pub turnstile_secret: Option<String>,

    /// Turnstile verification endpoint.
    pub turnstile_verify_url: String,

    pub rate_limit: RateLimitConfig,
}

/// Which store backs the rate limiters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateLimitBackend {
    /// Upstash when both URL and token are set, otherwise disabled.
    Auto,
    Memory,
    Upstash,
    Disabled,
}

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    pub backend: RateLimitBackend,

    /// Upstash Redis REST URL (`UPSTASH_REDIS_REST_URL` wins).
    pub upstash_url: Option<String>,

    /// Upstash Redis REST token (`UPSTASH_REDIS_REST_TOKEN` wins).
    pub upstash_token: Option<String>,

    pub ip_requests: u32,
    pub ip_window_secs: u64,
    pub domain_requests: u32,
    pub domain_window_secs: u64,

    /// Quota multiplier for domains on the high-traffic list.
    pub high_traffic_multiplier: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
            user_agent: format!(
                "rsslookup/{} (+https://github.com/mratmeyer/rsslookup)",
                env!("CARGO_PKG_VERSION")
            ),
            request_timeout_secs: 10,
            max_body_bytes: 5 * 1024 * 1024,
            allow_private_hosts: false,
            turnstile_secret: None,
            turnstile_verify_url: DEFAULT_TURNSTILE_VERIFY_URL.to_string(),
            rate_limit: RateLimitConfig::default(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            backend: RateLimitBackend::Auto,
            upstash_url: None,
            upstash_token: None,
            ip_requests: 10,
            ip_window_secs: 5 * 60,
            domain_requests: 50,
            domain_window_secs: 60 * 60,
            high_traffic_multiplier: 5,
        }
    }
}

/// Mask secrets in Debug output to prevent leakage into logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("bind", &self.bind)
            .field("user_agent", &self.user_agent)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_body_bytes", &self.max_body_bytes)
            .field("allow_private_hosts", &self.allow_private_hosts)
            .field(
                "turnstile_secret",
                &self.turnstile_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .field("turnstile_verify_url", &self.turnstile_verify_url)
            .field("rate_limit", &self.rate_limit)
            .finish()
    }
}

impl std::fmt::Debug for RateLimitConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimitConfig")
            .field("backend", &self.backend)
            .field("upstash_url", &self.upstash_url)
            .field(
                "upstash_token",
                &self.upstash_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("ip_requests", &self.ip_requests)
            .field("ip_window_secs", &self.ip_window_secs)
            .field("domain_requests", &self.domain_requests)
            .field("domain_window_secs", &self.domain_window_secs)
            .field("high_traffic_multiplier", &self.high_traffic_multiplier)
            .finish()
    }
}

const KNOWN_KEYS: &[&str] = &[
    "bind",
    "user_agent",
    "request_timeout_secs",
    "max_body_bytes",
    "allow_private_hosts",
    "turnstile_secret",
    "turnstile_verify_url",
    "rate_limit",
];

const KNOWN_RATE_LIMIT_KEYS: &[&str] = &[
    "backend",
    "upstash_url",
    "upstash_token",
    "ip_requests",
    "ip_window_secs",
    "domain_requests",
    "domain_window_secs",
    "high_traffic_multiplier",
];

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Unknown keys → accepted, logged as warning
    ///
    /// Environment overrides are not applied here; see [`Config::apply_env_overrides`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            warn_unknown_keys(&raw, KNOWN_KEYS, "");
            if let Some(toml::Value::Table(section)) = raw.get("rate_limit") {
                warn_unknown_keys(section, KNOWN_RATE_LIMIT_KEYS, "rate_limit.");
            }
        }

        let config: Config = toml::from_str(&content)?;
        tracing::info!(
            path = %path.display(),
            bind = %config.bind,
            backend = ?config.rate_limit.backend,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Lets `CLOUDFLARE_TURNSTILE_SECRET`, `UPSTASH_REDIS_REST_URL` and
    /// `UPSTASH_REDIS_REST_TOKEN` override the file. Empty values are ignored.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(secret) = var("CLOUDFLARE_TURNSTILE_SECRET") {
            self.turnstile_secret = Some(secret);
        }
        if let Some(url) = var("UPSTASH_REDIS_REST_URL") {
            self.rate_limit.upstash_url = Some(url);
        }
        if let Some(token) = var("UPSTASH_REDIS_REST_TOKEN") {
            self.rate_limit.upstash_token = Some(token);
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn warn_unknown_keys(table: &toml::Table, known: &[&str], prefix: &str) {
    for key in table.keys() {
        if !known.contains(&key.as_str()) {
            tracing::warn!(key = %format!("{prefix}{key}"), "Unknown key in config file, ignoring");
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

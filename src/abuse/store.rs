//! Backing stores for the sliding-window rate limiters.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use futures::future::BoxFuture;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;
use tokio::time::Instant;

/// One named limiter: at most `tokens` hits per `window`, per identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlidingWindow {
    /// Key prefix, e.g. `ratelimit:ip`.
    pub prefix: &'static str,
    pub tokens: u32,
    pub window: Duration,
}

impl SlidingWindow {
    pub fn new(prefix: &'static str, tokens: u32, window: Duration) -> Self {
        Self { prefix, tokens, window }
    }

    fn key(&self, id: &str) -> String {
        format!("{}:{}", self.prefix, id)
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("rate-limit store unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("rate-limit store answered with status {0}")]
    Status(u16),
    #[error("rate-limit store reply unreadable: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("rate-limit store error: {0}")]
    Remote(String),
}

/// Increment-and-check against a shared counter.
///
/// `limit` records one hit for `id` and answers whether it is within quota.
/// Implementations must make the increment and the check a single atomic step.
pub trait LimitStore: Send + Sync {
    fn limit<'a>(
        &'a self,
        window: &'a SlidingWindow,
        id: &'a str,
    ) -> BoxFuture<'a, Result<bool, StoreError>>;
}

// ============================================================================
// In-process store
// ============================================================================

/// Idle keys are swept from a [`MemoryStore`] at most this often.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Sliding log kept in process memory.
///
/// Counts are exact but not shared between processes, so this suits a single
/// instance or local development. Rejected hits are not recorded.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    logs: HashMap<String, HitLog>,
    last_sweep: Option<Instant>,
}

#[derive(Debug)]
struct HitLog {
    window: Duration,
    hits: VecDeque<Instant>,
}

impl HitLog {
    fn expire(&mut self, now: Instant) {
        while self
            .hits
            .front()
            .is_some_and(|first| now.duration_since(*first) >= self.window)
        {
            self.hits.pop_front();
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn hit(&self, window: &SlidingWindow, id: &str) -> bool {
        let now = Instant::now();
        // A poisoned lock only means another hit panicked mid-update; the
        // timestamps are still usable
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());

        // Idle keys are dropped so the map stays bounded by recent traffic
        let sweep_due = state
            .last_sweep
            .map_or(true, |at| now.duration_since(at) >= SWEEP_INTERVAL);
        if sweep_due {
            state.logs.retain(|_, log| {
                log.expire(now);
                !log.hits.is_empty()
            });
            state.last_sweep = Some(now);
        }

        let log = state.logs.entry(window.key(id)).or_insert_with(|| HitLog {
            window: window.window,
            hits: VecDeque::new(),
        });
        log.expire(now);

        if log.hits.len() >= window.tokens as usize {
            return false;
        }
        log.hits.push_back(now);
        true
    }

    #[cfg(test)]
    fn tracked_keys(&self) -> usize {
        self.state.lock().unwrap().logs.len()
    }
}

impl LimitStore for MemoryStore {
    fn limit<'a>(
        &'a self,
        window: &'a SlidingWindow,
        id: &'a str,
    ) -> BoxFuture<'a, Result<bool, StoreError>> {
        Box::pin(async move { Ok(self.hit(window, id)) })
    }
}

// ============================================================================
// Upstash Redis REST store
// ============================================================================

/// Weighted two-bucket sliding window, run atomically inside Redis.
///
/// The previous bucket counts in proportion to how much of it still overlaps
/// the trailing window. Returns the remaining quota, or -1 when exhausted.
const SLIDING_WINDOW_SCRIPT: &str = r#"
local currentKey  = KEYS[1]
local previousKey = KEYS[2]
local tokens      = tonumber(ARGV[1])
local now         = tonumber(ARGV[2])
local window      = tonumber(ARGV[3])
local incrementBy = tonumber(ARGV[4])

local requestsInCurrentWindow = redis.call("GET", currentKey)
if requestsInCurrentWindow == false then
  requestsInCurrentWindow = 0
end

local requestsInPreviousWindow = redis.call("GET", previousKey)
if requestsInPreviousWindow == false then
  requestsInPreviousWindow = 0
end
local percentageInCurrent = ( now % window ) / window
requestsInPreviousWindow = math.floor(( 1 - percentageInCurrent ) * requestsInPreviousWindow)
if requestsInPreviousWindow + requestsInCurrentWindow >= tokens then
  return -1
end

local newValue = redis.call("INCRBY", currentKey, incrementBy)
if newValue == incrementBy then
  redis.call("PEXPIRE", currentKey, window * 2 + 1000)
end
return tokens - ( newValue + requestsInPreviousWindow )
"#;

#[derive(Deserialize)]
struct UpstashReply {
    result: Option<i64>,
    error: Option<String>,
}

/// Shared counters in Upstash Redis, reached over its REST API.
pub struct UpstashStore {
    client: reqwest::Client,
    url: String,
    token: SecretString,
}

impl UpstashStore {
    pub fn new(client: reqwest::Client, url: impl Into<String>, token: SecretString) -> Self {
        Self {
            client,
            url: url.into(),
            token,
        }
    }

    async fn eval(&self, window: &SlidingWindow, id: &str) -> Result<bool, StoreError> {
        let now_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let window_ms = window.window.as_millis().max(1);
        let bucket = now_ms / window_ms;

        let key = window.key(id);
        let command = [
            "EVAL".to_string(),
            SLIDING_WINDOW_SCRIPT.to_string(),
            "2".to_string(),
            format!("{key}:{bucket}"),
            format!("{key}:{}", bucket.saturating_sub(1)),
            window.tokens.to_string(),
            now_ms.to_string(),
            window_ms.to_string(),
            "1".to_string(),
        ];

        let response = self
            .client
            .post(&self.url)
            .header(AUTHORIZATION, format!("Bearer {}", self.token.expose_secret()))
            .header(CONTENT_TYPE, "application/json")
            .body(serde_json::to_vec(&command)?)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        let reply: Result<UpstashReply, _> = serde_json::from_slice(&body);

        match reply {
            Ok(UpstashReply { error: Some(e), .. }) => Err(StoreError::Remote(e)),
            Ok(UpstashReply { result: Some(remaining), .. }) if status.is_success() => {
                Ok(remaining >= 0)
            }
            _ if !status.is_success() => Err(StoreError::Status(status.as_u16())),
            Ok(_) => Err(StoreError::Remote("reply carried no result".to_string())),
            Err(e) => Err(StoreError::Decode(e)),
        }
    }
}

impl std::fmt::Debug for UpstashStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstashStore")
            .field("url", &self.url)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl LimitStore for UpstashStore {
    fn limit<'a>(
        &'a self,
        window: &'a SlidingWindow,
        id: &'a str,
    ) -> BoxFuture<'a, Result<bool, StoreError>> {
        Box::pin(self.eval(window, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn window(tokens: u32, secs: u64) -> SlidingWindow {
        SlidingWindow::new("ratelimit:ip", tokens, Duration::from_secs(secs))
    }

    #[tokio::test(start_paused = true)]
    async fn test_memory_store_enforces_quota() {
        let store = MemoryStore::new();
        let w = window(3, 60);

        for _ in 0..3 {
            assert!(store.limit(&w, "1.2.3.4").await.unwrap());
        }
        assert!(!store.limit(&w, "1.2.3.4").await.unwrap());
        // Other identifiers have their own budget
        assert!(store.limit(&w, "5.6.7.8").await.unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_memory_store_window_slides() {
        let store = MemoryStore::new();
        let w = window(2, 60);

        assert!(store.limit(&w, "a").await.unwrap());
        tokio::time::advance(Duration::from_secs(30)).await;
        assert!(store.limit(&w, "a").await.unwrap());
        assert!(!store.limit(&w, "a").await.unwrap());

        // The first hit ages out; the second is still inside the window
        tokio::time::advance(Duration::from_secs(31)).await;
        assert!(store.limit(&w, "a").await.unwrap());
        assert!(!store.limit(&w, "a").await.unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_memory_store_prefixes_are_separate() {
        let store = MemoryStore::new();
        let ip = window(1, 60);
        let domain = SlidingWindow::new("ratelimit:domain", 1, Duration::from_secs(60));

        assert!(store.limit(&ip, "x").await.unwrap());
        assert!(store.limit(&domain, "x").await.unwrap());
        assert!(!store.limit(&ip, "x").await.unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_memory_store_sweeps_idle_keys_on_interval() {
        let store = MemoryStore::new();
        let w = window(1, 10);

        for id in ["a", "b", "c", "d", "e"] {
            assert!(store.limit(&w, id).await.unwrap());
        }
        assert_eq!(store.tracked_keys(), 5);

        // Between sweeps only the touched key is expired
        tokio::time::advance(Duration::from_secs(30)).await;
        assert!(store.limit(&w, "a").await.unwrap());
        assert!(!store.limit(&w, "a").await.unwrap());
        assert_eq!(store.tracked_keys(), 5);

        tokio::time::advance(Duration::from_secs(31)).await;
        assert!(store.limit(&w, "a").await.unwrap());
        assert_eq!(store.tracked_keys(), 1);
        assert!(!store.limit(&w, "a").await.unwrap());
    }

    fn upstash(server: &MockServer) -> UpstashStore {
        UpstashStore::new(
            reqwest::Client::new(),
            server.uri(),
            SecretString::from("test-token".to_string()),
        )
    }

    #[tokio::test]
    async fn test_upstash_allows_with_remaining_quota() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("authorization", "Bearer test-token"))
            .and(body_string_contains("ratelimit:domain:example.com:"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"result":4}"#))
            .expect(1)
            .mount(&server)
            .await;

        let w = SlidingWindow::new("ratelimit:domain", 5, Duration::from_secs(3600));
        assert!(upstash(&server).limit(&w, "example.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_upstash_rejects_when_exhausted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"result":-1}"#))
            .mount(&server)
            .await;

        assert!(!upstash(&server).limit(&window(10, 300), "1.2.3.4").await.unwrap());
    }

    #[tokio::test]
    async fn test_upstash_remote_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(400).set_body_string(r#"{"error":"ERR wrong number of arguments"}"#),
            )
            .mount(&server)
            .await;

        let err = upstash(&server).limit(&window(10, 300), "x").await.unwrap_err();
        assert!(matches!(err, StoreError::Remote(_)));
    }

    #[tokio::test]
    async fn test_upstash_bad_status_without_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = upstash(&server).limit(&window(10, 300), "x").await.unwrap_err();
        assert!(matches!(err, StoreError::Status(503)));
    }

    #[test]
    fn test_upstash_debug_masks_token() {
        let store = UpstashStore::new(
            reqwest::Client::new(),
            "https://example.upstash.io",
            SecretString::from("very-secret".to_string()),
        );
        let debug = format!("{store:?}");
        assert!(!debug.contains("very-secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}

use futures::StreamExt;
use reqwest::redirect::Policy;
use thiserror::Error;
use url::Url;

use crate::config::Config;
use crate::util::check_url_policy;

/// Maximum redirect hops followed for any outbound request.
const MAX_REDIRECTS: usize = 10;

/// Why an outbound fetch failed.
///
/// The `Display` text ends up in user-facing 502 messages, so it names the
/// kind of failure and never includes the underlying library error.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,
    #[error("could not connect")]
    Connect,
    #[error("too many or disallowed redirects")]
    Redirect,
    #[error("request failed")]
    Network,
    #[error("response too large")]
    TooLarge,
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        tracing::debug!(error = %e, "Outbound request failed");
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_redirect() {
            FetchError::Redirect
        } else if e.is_connect() {
            FetchError::Connect
        } else {
            FetchError::Network
        }
    }
}

/// Client builder with the service's user agent, timeout and redirect policy.
///
/// Exposed so callers (and tests) can add settings such as a proxy before
/// building.
pub fn client_builder(config: &Config) -> reqwest::ClientBuilder {
    reqwest::Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(config.request_timeout())
        .redirect(redirect_policy(config.allow_private_hosts))
        .pool_idle_timeout(std::time::Duration::from_secs(30))
}

/// Shared HTTP client for target pages, probes and feed titles.
pub fn build_client(config: &Config) -> Result<reqwest::Client, reqwest::Error> {
    client_builder(config).build()
}

fn redirect_policy(allow_private_hosts: bool) -> Policy {
    Policy::custom(move |attempt| {
        if attempt.previous().len() >= MAX_REDIRECTS {
            return attempt.error("too many redirects");
        }

        // A public page must not bounce the fetch onto an internal host
        if !allow_private_hosts && check_url_policy(attempt.url()).is_err() {
            return attempt.error("redirect to disallowed host");
        }

        tracing::debug!(
            from = %attempt.previous().last().map(|u| u.as_str()).unwrap_or("initial"),
            to = %attempt.url(),
            hop = attempt.previous().len() + 1,
            "Following redirect"
        );

        attempt.follow()
    })
}

/// Whether a URL found during discovery may be fetched.
pub(crate) fn may_fetch(allow_private_hosts: bool, url: &Url) -> bool {
    allow_private_hosts || check_url_policy(url).is_ok()
}

/// Reads a response body, failing once it exceeds `max_bytes`.
pub async fn read_limited_bytes(
    response: reqwest::Response,
    max_bytes: usize,
) -> Result<Vec<u8>, FetchError> {
    // Fast path: trust an honest Content-Length
    if let Some(len) = response.content_length() {
        if len > max_bytes as u64 {
            return Err(FetchError::TooLarge);
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        if bytes.len().saturating_add(chunk.len()) > max_bytes {
            return Err(FetchError::TooLarge);
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}

/// Status counts as a usable response: any 2xx, or 304 Not Modified.
pub(crate) fn is_usable_status(status: reqwest::StatusCode) -> bool {
    status.is_success() || status == reqwest::StatusCode::NOT_MODIFIED
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn local_config() -> Config {
        Config {
            allow_private_hosts: true,
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn test_client_sends_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .and(wiremock::matchers::header("user-agent", local_config().user_agent.as_str()))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = build_client(&local_config()).unwrap();
        let resp = client.get(server.uri()).send().await.unwrap();
        assert_eq!(resp.status(), 200);
    }

    #[tokio::test]
    async fn test_read_limited_bytes_under_limit() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("hello"))
            .mount(&server)
            .await;

        let client = build_client(&local_config()).unwrap();
        let resp = client.get(server.uri()).send().await.unwrap();
        assert_eq!(read_limited_bytes(resp, 16).await.unwrap(), b"hello");
    }

    #[tokio::test]
    async fn test_read_limited_bytes_rejects_oversized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("x".repeat(64)))
            .mount(&server)
            .await;

        let client = build_client(&local_config()).unwrap();
        let resp = client.get(server.uri()).send().await.unwrap();
        assert!(matches!(read_limited_bytes(resp, 16).await, Err(FetchError::TooLarge)));
    }

    #[tokio::test]
    async fn test_redirect_to_private_host_refused() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/hop"))
            .respond_with(
                ResponseTemplate::new(302).insert_header("Location", "http://10.1.2.3/admin"),
            )
            .mount(&server)
            .await;

        // The first hop is not policed by the client; only redirects are
        let client = build_client(&Config::default()).unwrap();
        let err = client
            .get(format!("{}/hop", server.uri()))
            .send()
            .await
            .unwrap_err();
        assert!(matches!(FetchError::from(err), FetchError::Redirect));
    }

    #[tokio::test]
    async fn test_connection_refused_is_sanitised() {
        let client = client_builder(&local_config())
            .proxy(reqwest::Proxy::all("http://127.0.0.1:1").unwrap())
            .build()
            .unwrap();
        let err = client.get("http://example.com/").send().await.unwrap_err();
        let fetch_err = FetchError::from(err);
        assert!(!fetch_err.to_string().contains("127.0.0.1"));
    }

    #[test]
    fn test_may_fetch() {
        let internal = Url::parse("http://192.168.0.10/feed").unwrap();
        let public = Url::parse("https://example.com/feed").unwrap();
        assert!(!may_fetch(false, &internal));
        assert!(may_fetch(true, &internal));
        assert!(may_fetch(false, &public));
    }

    #[test]
    fn test_usable_status() {
        assert!(is_usable_status(reqwest::StatusCode::OK));
        assert!(is_usable_status(reqwest::StatusCode::NOT_MODIFIED));
        assert!(!is_usable_status(reqwest::StatusCode::NOT_FOUND));
        assert!(!is_usable_status(reqwest::StatusCode::MOVED_PERMANENTLY));
    }
}

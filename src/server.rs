//! HTTP surface: `POST /api/lookup`.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use tokio::net::TcpListener;

use crate::lookup::{LookupRequest, LookupResponse, LookupService};

pub fn router(service: Arc<LookupService>) -> Router {
    Router::new()
        .route("/api/lookup", post(lookup))
        .with_state(service)
}

/// Serves until Ctrl-C.
pub async fn serve(listener: TcpListener, service: Arc<LookupService>) -> Result<()> {
    let addr = listener.local_addr().context("Listener has no local address")?;
    tracing::info!(%addr, "Listening for lookups");

    axum::serve(listener, router(service))
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!(error = %e, "Could not listen for Ctrl-C");
                std::future::pending::<()>().await;
            }
            tracing::info!("Shutting down");
        })
        .await
        .context("HTTP server error")
}

async fn lookup(
    State(service): State<Arc<LookupService>>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<LookupResponse>) {
    // An unreadable body is an empty request, which fails the token gate
    let request: LookupRequest = serde_json::from_slice(&body).unwrap_or_default();
    let ip = client_ip(&headers);

    let response = service.lookup(request, ip.as_deref(), "api").await;
    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(response))
}

/// `cf-connecting-ip`, else the first `x-forwarded-for` hop.
pub fn client_ip(headers: &HeaderMap) -> Option<String> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    header("cf-connecting-ip")
        .or_else(|| {
            header("x-forwarded-for")
                .and_then(|v| v.split(',').next())
                .map(str::trim)
                .filter(|v| !v.is_empty())
        })
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn test_client_ip_prefers_cloudflare_header() {
        let h = headers(&[
            ("cf-connecting-ip", "203.0.113.1"),
            ("x-forwarded-for", "198.51.100.2, 10.0.0.1"),
        ]);
        assert_eq!(client_ip(&h).as_deref(), Some("203.0.113.1"));
    }

    #[test]
    fn test_client_ip_first_forwarded_hop() {
        let h = headers(&[("x-forwarded-for", "198.51.100.2, 10.0.0.1")]);
        assert_eq!(client_ip(&h).as_deref(), Some("198.51.100.2"));
    }

    #[test]
    fn test_client_ip_absent() {
        assert_eq!(client_ip(&HeaderMap::new()), None);
        assert_eq!(client_ip(&headers(&[("x-forwarded-for", " ")])), None);
    }
}

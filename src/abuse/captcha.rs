use reqwest::header::CONTENT_TYPE;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::config::Config;
use crate::feed::http::read_limited_bytes;

/// Siteverify replies are tiny; anything larger is not a real answer.
const MAX_REPLY_BYTES: usize = 64 * 1024;

#[derive(Deserialize)]
struct SiteverifyReply {
    #[serde(default)]
    success: serde_json::Value,
    #[serde(default, rename = "error-codes")]
    error_codes: Vec<String>,
}

/// Cloudflare Turnstile token verification.
///
/// Fails closed: without a secret, on transport errors, on unreadable
/// replies, and on anything but a literal `"success": true`, the token is
/// rejected.
#[derive(Clone)]
pub struct TurnstileVerifier {
    client: reqwest::Client,
    endpoint: String,
    secret: Option<SecretString>,
}

impl TurnstileVerifier {
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>, secret: Option<SecretString>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            secret,
        }
    }

    pub fn from_config(config: &Config, client: reqwest::Client) -> Self {
        let secret = config
            .turnstile_secret
            .clone()
            .filter(|s| !s.is_empty())
            .map(SecretString::from);
        if secret.is_none() {
            tracing::warn!("Turnstile secret not configured, every lookup will be refused");
        }
        Self::new(client, config.turnstile_verify_url.clone(), secret)
    }

    pub fn is_configured(&self) -> bool {
        self.secret.is_some()
    }

    pub async fn verify(&self, token: &str, remote_ip: Option<&str>) -> bool {
        let Some(secret) = &self.secret else {
            return false;
        };

        // The serializer is not Send, so it must be gone before the await
        let body = {
            let mut form = url::form_urlencoded::Serializer::new(String::new());
            form.append_pair("secret", secret.expose_secret());
            form.append_pair("response", token);
            if let Some(ip) = remote_ip.filter(|ip| !ip.is_empty()) {
                form.append_pair("remoteip", ip);
            }
            form.finish()
        };

        let response = match self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "Turnstile verification request failed");
                return false;
            }
        };

        let body = match read_limited_bytes(response, MAX_REPLY_BYTES).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(error = %e, "Turnstile reply could not be read");
                return false;
            }
        };

        match serde_json::from_slice::<SiteverifyReply>(&body) {
            Ok(reply) if reply.success == serde_json::Value::Bool(true) => true,
            Ok(reply) => {
                tracing::debug!(errors = ?reply.error_codes, "Turnstile token rejected");
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "Turnstile reply is not valid JSON");
                false
            }
        }
    }
}

impl std::fmt::Debug for TurnstileVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TurnstileVerifier")
            .field("endpoint", &self.endpoint)
            .field("secret", &self.secret.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

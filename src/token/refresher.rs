use std::sync::Arc;
use std::time::Duration;

use jiff::SignedDuration;
use reqwest::Client;
use serde_json::Value;
use tracing::{error, info};

use crate::clock::Clock;
use crate::errors::{AuthError, ErrorBody};

use super::{AccessGuardResult, Credential, RefreshPolicy};

/// Longest lifetime honoured from `expires_in`; larger values are clamped.
const MAX_DECLARED_LIFETIME_SECS: i64 = 24 * 60 * 60;

/// Performs the OAuth2 client-credentials exchange against the token endpoint.
#[derive(Clone)]
pub struct TokenRefresher {
    http_client: Client,
    auth_url: String,
    client_id: String,
    client_secret: String,
    default_lifetime: SignedDuration,
    exchange_timeout: Duration,
    clock: Arc<dyn Clock>,
}

impl TokenRefresher {
    pub fn new(
        http_client: Client,
        auth_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        policy: &RefreshPolicy,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            http_client,
            auth_url: auth_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            default_lifetime: policy.default_lifetime,
            exchange_timeout: policy.exchange_timeout,
            clock,
        }
    }

    pub fn auth_url(&self) -> &str {
        &self.auth_url
    }

    pub async fn refresh(&self) -> AccessGuardResult<Credential> {
        let url = self.auth_url.as_str();
        let resp = self
            .http_client
            .post(url)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(self.form_body())
            .timeout(self.exchange_timeout)
            .send()
            .await
            .map_err(|source| {
                error!(
                    url,
                    timed_out = source.is_timeout(),
                    error = %source,
                    "token exchange transport failure"
                );
                AuthError::Transport {
                    url: url.to_string(),
                    source,
                }
            })?;

        let status = resp.status();
        let body = resp.bytes().await.map_err(|source| AuthError::Transport {
            url: url.to_string(),
            source,
        })?;
        if !status.is_success() {
            let body = ErrorBody::from_bytes(&body);
            error!(url, %status, body = %body, "token exchange rejected");
            return Err(AuthError::Rejected { status, body });
        }

        let token_info: Value = serde_json::from_slice(&body).map_err(|e| {
            AuthError::MalformedResponse(format!("token response is not JSON: {e}"))
        })?;
        let access_token = token_info
            .get("access_token")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                AuthError::MalformedResponse(
                    "authentication response did not contain an access_token".into(),
                )
            })?;
        let lifetime = token_info
            .get("expires_in")
            .and_then(declared_lifetime)
            .unwrap_or(self.default_lifetime);

        let credential = Credential::issue(access_token, self.clock.now(), lifetime)?;
        info!(
            expires_in_secs = lifetime.as_secs(),
            len = access_token.len(),
            "access token acquired"
        );
        Ok(credential)
    }

    fn form_body(&self) -> String {
        format!(
            "grant_type=client_credentials&client_id={}&client_secret={}",
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.client_secret),
        )
    }
}

impl std::fmt::Debug for TokenRefresher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenRefresher")
            .field("auth_url", &self.auth_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// `expires_in` only counts when it is a positive number; anything else
/// falls back to the default. Values past one day are clamped.
fn declared_lifetime(value: &Value) -> Option<SignedDuration> {
    let secs = match value.as_i64() {
        Some(secs) => secs,
        None => {
            let secs = value.as_f64().filter(|f| f.is_finite())?;
            if secs >= MAX_DECLARED_LIFETIME_SECS as f64 {
                MAX_DECLARED_LIFETIME_SECS
            } else {
                secs as i64
            }
        }
    };
    if secs <= 0 {
        return None;
    }
    Some(SignedDuration::from_secs(secs.min(MAX_DECLARED_LIFETIME_SECS)))
}

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method};
use tracing::{debug, error, warn};

use crate::errors::{Error, ErrorBody, RequestError};
use crate::request::RequestOptions;
use crate::response::Payload;
use crate::telemetry::refresh::RefreshTelemetry;
use crate::token::{AccessGuard, Credential, TokenRefresher};
use crate::url::prepare_path;

/// Header carrying the application key on every request.
pub const APP_KEY_HEADER: &str = "ST-App-Key";

/// Attaches credentials to outbound requests and classifies what comes back.
#[derive(Clone, Debug)]
pub struct RequestDispatcher {
    http_client: Client,
    base_url: String,
    tenant: Option<String>,
    app_key: String,
    guard: Arc<AccessGuard>,
    refresher: TokenRefresher,
}

impl RequestDispatcher {
    pub fn new(
        http_client: Client,
        base_url: impl Into<String>,
        tenant: Option<String>,
        app_key: impl Into<String>,
        guard: Arc<AccessGuard>,
        refresher: TokenRefresher,
    ) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
            tenant,
            app_key: app_key.into(),
            guard,
            refresher,
        }
    }

    pub fn http_client(&self) -> &Client {
        &self.http_client
    }

    pub fn guard(&self) -> Arc<AccessGuard> {
        Arc::clone(&self.guard)
    }

    pub fn resolve_url(&self, path: &str) -> String {
        prepare_path(&self.base_url, self.tenant.as_deref(), path)
    }

    /// Token usable for at least the safety margin, refreshing if needed.
    pub async fn access_token(&self) -> Result<String, Error> {
        let telemetry = RefreshTelemetry::new("access_guard");
        let refresher = &self.refresher;
        Ok(self
            .guard
            .ensure_fresh(false, || refresher.refresh(), &telemetry)
            .await?)
    }

    pub async fn force_refresh(&self) -> Result<Credential, Error> {
        let telemetry = RefreshTelemetry::new("force_refresh");
        let refresher = &self.refresher;
        Ok(self
            .guard
            .force_refresh(|| refresher.refresh(), &telemetry)
            .await?)
    }

    pub async fn dispatch(
        &self,
        method: Method,
        path: &str,
        options: &RequestOptions,
    ) -> Result<Payload, Error> {
        let url = self.resolve_url(path);
        let token = self.access_token().await?;
        let headers = self.build_headers(&token, options)?;

        let mut req = self
            .http_client
            .request(method.clone(), &url)
            .headers(headers);
        if !options.query.is_empty() {
            req = req.query(&options.query);
        }
        if let Some(body) = options.body.as_ref() {
            req = req.json(body);
        }
        if let Some(timeout) = options.timeout {
            req = req.timeout(timeout);
        }

        debug!(%method, url = %url, "request.send");
        let resp = req.send().await.map_err(|source| {
            error!(%method, url = %url, error = %source, "request transport failure");
            RequestError::Transport {
                url: url.clone(),
                source,
            }
        })?;

        let status = resp.status();
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let body = resp.bytes().await.map_err(|source| RequestError::Transport {
            url: url.clone(),
            source,
        })?;

        if status.as_u16() >= 400 {
            let body = ErrorBody::from_bytes(&body);
            warn!(%method, url = %url, %status, body = %body, "request failed");
            return Err(RequestError::Status { status, url, body }.into());
        }

        debug!(
            %method,
            url = %url,
            %status,
            content_type = %content_type,
            bytes = body.len(),
            "request.ok"
        );
        Ok(Payload::classify(&content_type, &body))
    }

    /// Caller headers first, then credentials on top. Any caller header with
    /// a credential header's name is dropped.
    fn build_headers(&self, token: &str, options: &RequestOptions) -> Result<HeaderMap, Error> {
        let app_key_name = HeaderName::from_static("st-app-key");
        let mut headers = HeaderMap::new();
        for (name, value) in &options.headers {
            let invalid = || RequestError::InvalidHeader { name: name.clone() };
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
            if header_name == AUTHORIZATION || header_name == app_key_name {
                debug!(header = %header_name, "ignoring caller-supplied credential header");
                continue;
            }
            let header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;
            headers.append(header_name, header_value);
        }

        let bearer = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
            RequestError::InvalidHeader {
                name: AUTHORIZATION.to_string(),
            }
        })?;
        let app_key = HeaderValue::from_str(&self.app_key).map_err(|_| {
            RequestError::InvalidHeader {
                name: APP_KEY_HEADER.to_string(),
            }
        })?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(app_key_name, app_key);
        Ok(headers)
    }
}

use reqwest::Method;

use crate::{
    ServiceTitanClient,
    client::ClientBuilder,
    config::{Config, Settings},
    errors::Error,
    request::RequestOptions,
    response::Payload,
    time::ZoneConverter,
    token::Credential,
    url::{PathParts, build_url},
};

impl ServiceTitanClient {
    /// Create a new ServiceTitanClient
    /// # Arguments
    /// * `config` - Explicit configuration (`Config`), typically built with `Config::new`
    ///   or loaded via `Config::from_file` / `Config::from_env`.
    ///
    /// Fails with `Error::Config` before any network access when credentials
    /// are empty or the environment is not `integration`/`production`.
    /// The first token is fetched lazily by the first request.
    pub fn new(config: Config) -> Result<Self, Error> {
        ClientBuilder::new(config).build()
    }

    pub fn builder(config: Config) -> ClientBuilder {
        ClientBuilder::new(config)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Date helpers bound to the configured local zone.
    pub fn zone(&self) -> &ZoneConverter {
        &self.zone
    }

    pub fn prepare_url(&self, path: &str) -> String {
        self.dispatcher.resolve_url(path)
    }

    pub fn build_url(&self, parts: &PathParts) -> Result<String, Error> {
        build_url(&self.settings.base_url, self.settings.tenant.as_deref(), parts)
    }

    pub async fn access_token(&self) -> Result<String, Error> {
        self.dispatcher.access_token().await
    }

    /// Exchanges credentials now, regardless of the cached token's expiry.
    pub async fn force_refresh(&self) -> Result<Credential, Error> {
        self.dispatcher.force_refresh().await
    }

    pub async fn credential(&self) -> Option<Credential> {
        self.dispatcher.guard().snapshot().await
    }

    pub async fn dispatch(
        &self,
        method: Method,
        path: &str,
        options: &RequestOptions,
    ) -> Result<Payload, Error> {
        self.dispatcher.dispatch(method, path, options).await
    }

    pub async fn get(&self, path: &str, options: &RequestOptions) -> Result<Payload, Error> {
        self.dispatch(Method::GET, path, options).await
    }

    pub async fn post(&self, path: &str, options: &RequestOptions) -> Result<Payload, Error> {
        self.dispatch(Method::POST, path, options).await
    }

    pub async fn put(&self, path: &str, options: &RequestOptions) -> Result<Payload, Error> {
        self.dispatch(Method::PUT, path, options).await
    }

    pub async fn patch(&self, path: &str, options: &RequestOptions) -> Result<Payload, Error> {
        self.dispatch(Method::PATCH, path, options).await
    }

    pub async fn delete(&self, path: &str, options: &RequestOptions) -> Result<Payload, Error> {
        self.dispatch(Method::DELETE, path, options).await
    }
}

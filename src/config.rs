//! Client configuration: raw inputs and their validated, resolved form.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::errors::Error;
use crate::time::DEFAULT_TIMEZONE;

/// Which pair of ServiceTitan hosts to talk to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Integration,
    Production,
}

impl Environment {
    pub fn default_auth_url(self) -> &'static str {
        match self {
            Environment::Integration => "https://auth-integration.servicetitan.io/connect/token",
            Environment::Production => "https://auth.servicetitan.io/connect/token",
        }
    }

    pub fn default_base_url(self) -> &'static str {
        match self {
            Environment::Integration => "https://api-integration.servicetitan.io",
            Environment::Production => "https://api.servicetitan.io",
        }
    }
}

impl FromStr for Environment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "integration" => Ok(Environment::Integration),
            "production" => Ok(Environment::Production),
            other => Err(Error::Config(format!(
                "environment must be either 'integration' or 'production', got '{other}'"
            ))),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Integration => write!(f, "integration"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// What `get_all` does when a page request fails part way through.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageFailurePolicy {
    /// Stop and return the rows collected so far.
    #[default]
    Truncate,
    /// Return `Error::Pagination` carrying the rows collected so far.
    Propagate,
}

/// Raw client inputs. Validated by [`Config::resolve`] when a client is built.
#[derive(Clone, Deserialize)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub app_key: String,
    #[serde(default)]
    pub tenant: Option<String>,
    #[serde(default = "default_environment")]
    pub environment: String,
    #[serde(default)]
    pub auth_url: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub local_timezone: Option<String>,
    #[serde(default)]
    pub page_failure: PageFailurePolicy,
}

fn default_environment() -> String {
    Environment::Integration.to_string()
}

impl Config {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        app_key: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            app_key: app_key.into(),
            tenant: None,
            environment: default_environment(),
            auth_url: None,
            base_url: None,
            local_timezone: None,
            page_failure: PageFailurePolicy::default(),
        }
    }

    pub fn with_tenant(mut self, tenant: impl Into<String>) -> Self {
        self.tenant = Some(tenant.into());
        self
    }

    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    pub fn with_auth_url(mut self, url: impl Into<String>) -> Self {
        self.auth_url = Some(url.into());
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn with_local_timezone(mut self, zone: impl Into<String>) -> Self {
        self.local_timezone = Some(zone.into());
        self
    }

    pub fn with_page_failure(mut self, policy: PageFailurePolicy) -> Self {
        self.page_failure = policy;
        self
    }

    /// Reads a JSON config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Reads configuration from the environment.
    /// # ENV Vars
    /// * `SERVICETITAN_CLIENT_ID`, `SERVICETITAN_CLIENT_SECRET`, `SERVICETITAN_APP_KEY` - required
    /// * `SERVICETITAN_TENANT` - default tenant for `tenant/` paths
    /// * `SERVICETITAN_ENVIRONMENT` - `integration` (default) or `production`
    /// * `SERVICETITAN_AUTH_URL`, `SERVICETITAN_BASE_URL` - endpoint overrides
    /// * `SERVICETITAN_TIMEZONE` - IANA zone for date helpers
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key).ok_or_else(|| Error::Config(format!("Missing {key} env var")))
        };
        let mut config = Config::new(
            required("SERVICETITAN_CLIENT_ID")?,
            required("SERVICETITAN_CLIENT_SECRET")?,
            required("SERVICETITAN_APP_KEY")?,
        );
        config.tenant = lookup("SERVICETITAN_TENANT");
        if let Some(environment) = lookup("SERVICETITAN_ENVIRONMENT") {
            config.environment = environment;
        }
        config.auth_url = lookup("SERVICETITAN_AUTH_URL");
        config.base_url = lookup("SERVICETITAN_BASE_URL");
        config.local_timezone = lookup("SERVICETITAN_TIMEZONE");
        Ok(config)
    }

    /// Checks required credentials and the environment name, then fills in
    /// endpoint defaults. Never touches the network.
    pub fn resolve(&self) -> Result<Settings, Error> {
        if self.client_id.is_empty() {
            return Err(Error::Config("client_id must be provided".into()));
        }
        if self.client_secret.is_empty() {
            return Err(Error::Config("client_secret must be provided".into()));
        }
        if self.app_key.is_empty() {
            return Err(Error::Config("app_key must be provided".into()));
        }
        let environment: Environment = self.environment.parse()?;

        let auth_url = validated_url(
            "auth_url",
            self.auth_url
                .as_deref()
                .filter(|u| !u.is_empty())
                .unwrap_or(environment.default_auth_url()),
        )?;
        let base_url = validated_url(
            "base_url",
            self.base_url
                .as_deref()
                .filter(|u| !u.is_empty())
                .unwrap_or(environment.default_base_url()),
        )?;

        Ok(Settings {
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            app_key: self.app_key.clone(),
            tenant: self.tenant.clone().filter(|t| !t.is_empty()),
            environment,
            auth_url,
            base_url,
            local_timezone: self
                .local_timezone
                .clone()
                .unwrap_or_else(|| DEFAULT_TIMEZONE.to_string()),
            page_failure: self.page_failure,
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("app_key", &"<redacted>")
            .field("tenant", &self.tenant)
            .field("environment", &self.environment)
            .field("auth_url", &self.auth_url)
            .field("base_url", &self.base_url)
            .field("local_timezone", &self.local_timezone)
            .field("page_failure", &self.page_failure)
            .finish()
    }
}

fn validated_url(field: &str, url: &str) -> Result<String, Error> {
    reqwest::Url::parse(url)
        .map_err(|e| Error::Config(format!("Invalid {field} '{url}': {e}")))?;
    Ok(url.to_string())
}

/// Validated configuration; immutable for the life of a client.
#[derive(Clone)]
pub struct Settings {
    pub(crate) client_id: String,
    pub(crate) client_secret: String,
    pub(crate) app_key: String,
    pub(crate) tenant: Option<String>,
    pub(crate) environment: Environment,
    pub(crate) auth_url: String,
    pub(crate) base_url: String,
    pub(crate) local_timezone: String,
    pub(crate) page_failure: PageFailurePolicy,
}

impl Settings {
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn tenant(&self) -> Option<&str> {
        self.tenant.as_deref()
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn auth_url(&self) -> &str {
        &self.auth_url
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn local_timezone(&self) -> &str {
        &self.local_timezone
    }

    pub fn page_failure(&self) -> PageFailurePolicy {
        self.page_failure
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("client_id", &self.client_id)
            .field("tenant", &self.tenant)
            .field("environment", &self.environment)
            .field("auth_url", &self.auth_url)
            .field("base_url", &self.base_url)
            .field("local_timezone", &self.local_timezone)
            .field("page_failure", &self.page_failure)
            .finish_non_exhaustive()
    }
}

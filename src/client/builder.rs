use std::sync::Arc;

use reqwest::Client;
use tracing::info;

use crate::ServiceTitanClient;
use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::dispatch::RequestDispatcher;
use crate::errors::Error;
use crate::time::ZoneConverter;
use crate::token::{AccessGuard, RefreshPolicy, TokenRefresher};

const USER_AGENT: &str = concat!("servicetitan-client-rust/", env!("CARGO_PKG_VERSION"));

/// Assembles a client from configuration plus optional collaborators.
pub struct ClientBuilder {
    config: Config,
    http_client: Option<Client>,
    clock: Arc<dyn Clock>,
    policy: RefreshPolicy,
}

impl ClientBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            http_client: None,
            clock: Arc::new(SystemClock),
            policy: RefreshPolicy::default(),
        }
    }

    /// Transport to use for both token and resource requests.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn refresh_policy(mut self, policy: RefreshPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Validates configuration and wires components. No network access.
    pub fn build(self) -> Result<ServiceTitanClient, Error> {
        let settings = self.config.resolve()?;
        let zone = ZoneConverter::new(&settings.local_timezone)?;
        let http_client = match self.http_client {
            Some(client) => client,
            None => Client::builder()
                .user_agent(USER_AGENT)
                .build()
                .map_err(|e| Error::Config(format!("Failed to build HTTP client: {e}")))?,
        };

        let refresher = TokenRefresher::new(
            http_client.clone(),
            settings.auth_url.clone(),
            settings.client_id.clone(),
            settings.client_secret.clone(),
            &self.policy,
            Arc::clone(&self.clock),
        );
        let guard = Arc::new(AccessGuard::new(self.policy, self.clock));
        let dispatcher = RequestDispatcher::new(
            http_client,
            settings.base_url.clone(),
            settings.tenant.clone(),
            settings.app_key.clone(),
            guard,
            refresher,
        );

        info!(
            environment = %settings.environment,
            base_url = %settings.base_url,
            tenant = settings.tenant.as_deref().unwrap_or("-"),
            "servicetitan client configured"
        );
        Ok(ServiceTitanClient {
            settings,
            dispatcher,
            zone,
        })
    }
}

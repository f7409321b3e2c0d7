use std::time::Duration;

use jiff::SignedDuration;

use crate::errors::Error;

/// Rules governing when a stored token is considered spent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RefreshPolicy {
    /// Refresh once the token has less than this long to live.
    pub safety_margin: SignedDuration,
    /// Lifetime assumed when the authority omits `expires_in`.
    pub default_lifetime: SignedDuration,
    /// Upper bound on one token exchange. Callers sharing the client wait
    /// behind the exchange, so it must not be able to hang.
    pub exchange_timeout: Duration,
}

impl RefreshPolicy {
    pub const DEFAULT_SAFETY_MARGIN_SECS: i64 = 60;
    pub const DEFAULT_LIFETIME_SECS: i64 = 900;
    pub const DEFAULT_EXCHANGE_TIMEOUT_SECS: u64 = 30;

    pub fn new(
        safety_margin: SignedDuration,
        default_lifetime: SignedDuration,
    ) -> Result<Self, Error> {
        if !safety_margin.is_positive() {
            return Err(Error::Config("Refresh safety margin must be > 0".into()));
        }
        if !default_lifetime.is_positive() {
            return Err(Error::Config("Default token lifetime must be > 0".into()));
        }
        Ok(Self {
            safety_margin,
            default_lifetime,
            exchange_timeout: Duration::from_secs(Self::DEFAULT_EXCHANGE_TIMEOUT_SECS),
        })
    }

    pub fn with_exchange_timeout(mut self, timeout: Duration) -> Result<Self, Error> {
        if timeout.is_zero() {
            return Err(Error::Config("Token exchange timeout must be > 0".into()));
        }
        self.exchange_timeout = timeout;
        Ok(self)
    }
}

impl Default for RefreshPolicy {
    fn default() -> Self {
        Self {
            safety_margin: SignedDuration::from_secs(Self::DEFAULT_SAFETY_MARGIN_SECS),
            default_lifetime: SignedDuration::from_secs(Self::DEFAULT_LIFETIME_SECS),
            exchange_timeout: Duration::from_secs(Self::DEFAULT_EXCHANGE_TIMEOUT_SECS),
        }
    }
}

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use crate::clock::Clock;
use crate::errors::AuthError;
use crate::telemetry::refresh::RefreshTelemetry;

use super::{Credential, RefreshPolicy};

/// Convenience result alias for guard operations.
pub type AccessGuardResult<T> = Result<T, AuthError>;

/// Owns the process-local credential and decides when it must be replaced.
///
/// The lock is held across check, exchange and store, so concurrent callers
/// sharing one guard wait on a single exchange instead of racing it.
#[derive(Debug)]
pub struct AccessGuard {
    credential: Mutex<Option<Credential>>,
    policy: RefreshPolicy,
    clock: Arc<dyn Clock>,
}

impl AccessGuard {
    pub fn new(policy: RefreshPolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            credential: Mutex::new(None),
            policy,
            clock,
        }
    }

    pub fn policy(&self) -> &RefreshPolicy {
        &self.policy
    }

    /// Copy of the stored credential, if any exchange has succeeded yet.
    pub async fn snapshot(&self) -> Option<Credential> {
        self.credential.lock().await.clone()
    }

    /// Returns a token usable for at least the safety margin, running
    /// `refresh_cb` first when the stored one is absent or about to lapse.
    /// A failed refresh leaves the stored credential as it was.
    pub async fn ensure_fresh<F, Fut>(
        &self,
        force_refresh: bool,
        refresh_cb: F,
        telemetry: &RefreshTelemetry,
    ) -> AccessGuardResult<String>
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = AccessGuardResult<Credential>> + Send,
    {
        let credential = self.acquire(force_refresh, refresh_cb, telemetry).await?;
        Ok(credential.token().to_owned())
    }

    /// Exchanges unconditionally and returns the credential it stored.
    pub async fn force_refresh<F, Fut>(
        &self,
        refresh_cb: F,
        telemetry: &RefreshTelemetry,
    ) -> AccessGuardResult<Credential>
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = AccessGuardResult<Credential>> + Send,
    {
        self.acquire(true, refresh_cb, telemetry).await
    }

    async fn acquire<F, Fut>(
        &self,
        force_refresh: bool,
        refresh_cb: F,
        telemetry: &RefreshTelemetry,
    ) -> AccessGuardResult<Credential>
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = AccessGuardResult<Credential>> + Send,
    {
        let mut stored = self.credential.lock().await;
        let now = self.clock.now();
        if !force_refresh {
            match stored.as_ref() {
                Some(cred) if !cred.needs_refresh(now, self.policy.safety_margin) => {
                    return Ok(cred.clone());
                }
                Some(cred) => debug!(
                    expires_at = %cred.expires_at(),
                    "token inside safety margin; refreshing"
                ),
                None => debug!("no token cached; refreshing"),
            }
        }

        telemetry.emit_start(now);
        match refresh_cb().await {
            Ok(fresh) => {
                telemetry.emit_success(fresh.expires_at(), self.clock.now());
                *stored = Some(fresh.clone());
                Ok(fresh)
            }
            Err(err) => {
                telemetry.emit_failure(&err, self.clock.now());
                Err(err)
            }
        }
    }
}

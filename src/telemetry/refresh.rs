use jiff::Timestamp;
use tracing::{Level, event};
use uuid::Uuid;

use crate::errors::AuthError;

/// Structured events for one token exchange, correlated by `attempt_id`.
///
/// `context` names what triggered the exchange (`access_guard` for lazy
/// refreshes, `force_refresh` for explicit ones).
#[derive(Clone, Debug)]
pub struct RefreshTelemetry {
    attempt_id: Uuid,
    context: String,
}

impl RefreshTelemetry {
    pub fn new(context: impl Into<String>) -> Self {
        Self {
            attempt_id: Uuid::new_v4(),
            context: context.into(),
        }
    }

    pub fn attempt_id(&self) -> Uuid {
        self.attempt_id
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn emit_start(&self, at: Timestamp) {
        event!(
            Level::INFO,
            attempt_id = %self.attempt_id,
            context = %self.context,
            timestamp = %at,
            "refresh.start"
        );
    }

    pub fn emit_success(&self, expires_at: Timestamp, at: Timestamp) {
        let lifetime_secs = at.duration_until(expires_at).as_secs();
        event!(
            Level::INFO,
            attempt_id = %self.attempt_id,
            context = %self.context,
            timestamp = %at,
            %expires_at,
            lifetime_secs,
            "refresh.success"
        );
    }

    pub fn emit_failure(&self, error: &AuthError, at: Timestamp) {
        let (kind, status) = match error {
            AuthError::Transport { .. } => ("transport", None),
            AuthError::Rejected { status, .. } => ("rejected", Some(status.as_u16())),
            AuthError::MalformedResponse(_) => ("malformed", None),
        };
        event!(
            Level::ERROR,
            attempt_id = %self.attempt_id,
            context = %self.context,
            timestamp = %at,
            kind,
            status,
            error = %error,
            "refresh.failure"
        );
    }
}

use jiff::{SignedDuration, Timestamp};

use crate::errors::AuthError;

/// A bearer token plus the instants that bound its use.
///
/// Only built from an issuing instant and a declared lifetime, so
/// `expires_at` always matches what the authority told us.
#[derive(Clone)]
pub struct Credential {
    token: String,
    issued_at: Timestamp,
    expires_at: Timestamp,
}

impl Credential {
    pub fn issue(
        token: impl Into<String>,
        issued_at: Timestamp,
        lifetime: SignedDuration,
    ) -> Result<Self, AuthError> {
        let expires_at = issued_at.checked_add(lifetime).map_err(|e| {
            AuthError::MalformedResponse(format!("token lifetime {lifetime} out of range: {e}"))
        })?;
        Ok(Self {
            token: token.into(),
            issued_at,
            expires_at,
        })
    }

    /// Returns the raw token value suitable for Authorization headers.
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn issued_at(&self) -> Timestamp {
        self.issued_at
    }

    pub fn expires_at(&self) -> Timestamp {
        self.expires_at
    }

    /// Time left before hard expiry; negative once expired.
    pub fn remaining(&self, now: Timestamp) -> SignedDuration {
        now.duration_until(self.expires_at)
    }

    /// True once `now >= expires_at - margin`.
    pub fn needs_refresh(&self, now: Timestamp, margin: SignedDuration) -> bool {
        self.remaining(now) <= margin
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"<redacted>")
            .field("issued_at", &self.issued_at)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

//! Session domain model.
//!
//! The session is the authenticated state of the client. Credentials exist
//! exactly when the session is authenticated: the whole authenticated state
//! is an `Option`, so there is no representable half-authenticated state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who the session belongs to, as accepted by the portal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub username: String,
    pub account_id: String,
    pub region: String,
}

/// The opaque session token returned by the portal login step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedToken {
    /// Opaque token string. No cryptographic property is assumed.
    pub token: String,
    /// Expiry instant, always strictly in the future at issuance.
    pub expires_at: DateTime<Utc>,
}

/// Short-lived access credentials provisioned against a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessCredentials {
    pub key_id: String,
    pub secret: String,
    pub session_token: String,
    pub region: String,
}

/// Everything a fully authenticated session holds.
///
/// Populated atomically by a successful authenticate-then-provision
/// sequence and only ever replaced or dropped wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedState {
    pub identity: Identity,
    pub issued_token: IssuedToken,
    pub credentials: AccessCredentials,
}

/// The client session.
///
/// Starts out empty, becomes authenticated via [`Session::establish`] and is
/// wiped via [`Session::clear`]. The generation counter increments on every
/// establish/clear so in-flight work can detect that the session it started
/// under no longer exists.
#[derive(Debug, Clone, Default)]
pub struct Session {
    auth: Option<AuthenticatedState>,
    generation: u64,
}

impl Session {
    /// Creates a new, unauthenticated session.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the full authenticate-then-provision sequence has completed.
    pub fn is_authenticated(&self) -> bool {
        self.auth.is_some()
    }

    /// Returns the authenticated state, if any.
    pub fn auth(&self) -> Option<&AuthenticatedState> {
        self.auth.as_ref()
    }

    /// Returns the provisioned credentials, if authenticated.
    pub fn credentials(&self) -> Option<&AccessCredentials> {
        self.auth.as_ref().map(|a| &a.credentials)
    }

    /// The current generation. Bumped on every establish/clear.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Populates the session in one step.
    pub fn establish(&mut self, state: AuthenticatedState) {
        self.generation += 1;
        self.auth = Some(state);
    }

    /// Wipes the session entirely. Idempotent; always bumps the generation.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.auth = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_state() -> AuthenticatedState {
        AuthenticatedState {
            identity: Identity {
                username: "alice".to_string(),
                account_id: "123456789012".to_string(),
                region: "us-east-1".to_string(),
            },
            issued_token: IssuedToken {
                token: "jwt-abc".to_string(),
                expires_at: Utc::now() + chrono::Duration::hours(8),
            },
            credentials: AccessCredentials {
                key_id: "AKIAEXAMPLE".to_string(),
                secret: "s3cr3t".to_string(),
                session_token: "tok".to_string(),
                region: "us-east-1".to_string(),
            },
        }
    }

    #[test]
    fn test_new_session_is_unauthenticated() {
        let session = Session::new();
        assert!(!session.is_authenticated());
        assert!(session.credentials().is_none());
        assert_eq!(session.generation(), 0);
    }

    #[test]
    fn test_establish_then_clear() {
        let mut session = Session::new();
        session.establish(sample_state());
        assert!(session.is_authenticated());
        assert!(session.credentials().is_some());
        assert_eq!(session.generation(), 1);

        session.clear();
        assert!(!session.is_authenticated());
        assert!(session.credentials().is_none());
        assert_eq!(session.generation(), 2);
    }

    #[test]
    fn test_clear_bumps_generation_even_when_empty() {
        let mut session = Session::new();
        session.clear();
        assert_eq!(session.generation(), 1);
    }
}

//! Portal auth client.
//!
//! The portal exchanges login material for a session token, then exchanges
//! that token for short-lived access credentials scoped to an account and
//! region. The simulated implementation models the backend round-trips with
//! injected latency; a real HTTP client can replace it behind the same trait.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;

use portico_core::clock::{Clock, SystemClock};
use portico_core::error::Result;
use portico_core::session::{AccessCredentials, IssuedToken};
use portico_core::validator::validate_login;
use portico_core::PorticoError;

use crate::latency::LatencyProfile;
use crate::token_source::{RandomTokenSource, TokenSource};

/// Session tokens are valid for exactly eight hours from issuance.
const TOKEN_TTL_HOURS: i64 = 8;

/// Two-step credential exchange against the portal.
///
/// Both operations are retry-safe: no internal state is mutated across
/// calls, so overlapping attempts cannot corrupt anything. The orchestrator
/// serializes them per session regardless.
#[async_trait]
pub trait PortalClient: Send + Sync {
    /// Exchanges login material for an opaque session token.
    ///
    /// Validation failures propagate with their specific kind; the token
    /// expiry is always strictly in the future at issuance.
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
        account_id: &str,
        region: &str,
    ) -> Result<IssuedToken>;

    /// Exchanges a session token for short-lived access credentials.
    ///
    /// # Errors
    ///
    /// `NotAuthenticated` when the token is empty or already expired.
    async fn provision_credentials(
        &self,
        token: &IssuedToken,
        account_id: &str,
        region: &str,
    ) -> Result<AccessCredentials>;
}

/// Simulated portal: validates locally, then fabricates opaque tokens and
/// credential strings of the shapes the real portal returns.
pub struct SimulatedPortalClient {
    clock: Arc<dyn Clock>,
    tokens: Arc<dyn TokenSource>,
    auth_latency: LatencyProfile,
    provision_latency: LatencyProfile,
}

impl Default for SimulatedPortalClient {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedPortalClient {
    /// Creates a client with realistic round-trip delays.
    pub fn new() -> Self {
        Self {
            clock: Arc::new(SystemClock),
            tokens: Arc::new(RandomTokenSource::new()),
            auth_latency: LatencyProfile::Fixed(std::time::Duration::from_secs(2)),
            provision_latency: LatencyProfile::Fixed(std::time::Duration::from_secs(1)),
        }
    }

    /// Overrides the time source.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Overrides the token source.
    pub fn with_token_source(mut self, tokens: Arc<dyn TokenSource>) -> Self {
        self.tokens = tokens;
        self
    }

    /// Disables all simulated delays.
    pub fn without_latency(mut self) -> Self {
        self.auth_latency = LatencyProfile::Off;
        self.provision_latency = LatencyProfile::Off;
        self
    }
}

#[async_trait]
impl PortalClient for SimulatedPortalClient {
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
        account_id: &str,
        region: &str,
    ) -> Result<IssuedToken> {
        validate_login(username, password, account_id, region)?;

        self.auth_latency.wait().await;

        let token = format!("jwt-{}", self.tokens.opaque(32));
        let expires_at = self.clock.now() + Duration::hours(TOKEN_TTL_HOURS);
        tracing::debug!(%username, %account_id, %region, "portal issued session token");

        Ok(IssuedToken { token, expires_at })
    }

    async fn provision_credentials(
        &self,
        token: &IssuedToken,
        account_id: &str,
        region: &str,
    ) -> Result<AccessCredentials> {
        if token.token.is_empty() || token.expires_at <= self.clock.now() {
            return Err(PorticoError::NotAuthenticated);
        }

        self.provision_latency.wait().await;

        tracing::debug!(%account_id, %region, "portal provisioned access credentials");
        Ok(AccessCredentials {
            key_id: format!("AKIA{}", self.tokens.opaque(16).to_uppercase()),
            secret: self.tokens.opaque(40),
            session_token: self.tokens.opaque(200),
            region: region.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use portico_core::ValidationError;
    use std::sync::Mutex;

    struct ManualClock {
        now: Mutex<DateTime<Utc>>,
    }

    impl ManualClock {
        fn starting_at(now: DateTime<Utc>) -> Self {
            Self {
                now: Mutex::new(now),
            }
        }

        fn advance(&self, delta: Duration) {
            let mut now = self.now.lock().unwrap();
            *now += delta;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.now.lock().unwrap()
        }
    }

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()
    }

    fn client_at(clock: Arc<ManualClock>) -> SimulatedPortalClient {
        SimulatedPortalClient::new()
            .with_clock(clock)
            .without_latency()
    }

    #[tokio::test]
    async fn test_authenticate_rejects_invalid_input_with_kind() {
        let client = SimulatedPortalClient::new().without_latency();
        let err = client
            .authenticate("ab", "secret1", "123456789012", "us-east-1")
            .await
            .unwrap_err();
        assert_eq!(err.validation_kind(), Some(ValidationError::InvalidUsername));
    }

    #[tokio::test]
    async fn test_token_expires_eight_hours_from_issuance() {
        let clock = Arc::new(ManualClock::starting_at(start()));
        let client = client_at(clock.clone());
        let token = client
            .authenticate("alice", "secret1", "123456789012", "us-east-1")
            .await
            .unwrap();
        assert_eq!(token.expires_at, start() + Duration::hours(8));
        assert!(token.expires_at > clock.now());
    }

    #[tokio::test]
    async fn test_provisioned_credentials_have_portal_shapes() {
        let clock = Arc::new(ManualClock::starting_at(start()));
        let client = client_at(clock);
        let token = client
            .authenticate("alice", "secret1", "123456789012", "us-east-1")
            .await
            .unwrap();
        let creds = client
            .provision_credentials(&token, "123456789012", "eu-west-2")
            .await
            .unwrap();
        assert!(creds.key_id.starts_with("AKIA"));
        assert_eq!(creds.key_id.len(), 20);
        assert_eq!(creds.secret.len(), 40);
        assert_eq!(creds.session_token.len(), 200);
        assert_eq!(creds.region, "eu-west-2");
    }

    #[tokio::test]
    async fn test_provisioning_twice_never_repeats_a_secret() {
        let clock = Arc::new(ManualClock::starting_at(start()));
        let client = client_at(clock);
        let token = client
            .authenticate("alice", "secret1", "123456789012", "us-east-1")
            .await
            .unwrap();
        let first = client
            .provision_credentials(&token, "123456789012", "us-east-1")
            .await
            .unwrap();
        let second = client
            .provision_credentials(&token, "123456789012", "us-east-1")
            .await
            .unwrap();
        assert_ne!(first.secret, second.secret);
        assert_ne!(first.key_id, second.key_id);
    }

    #[tokio::test]
    async fn test_expired_token_cannot_provision() {
        let clock = Arc::new(ManualClock::starting_at(start()));
        let client = client_at(clock.clone());
        let token = client
            .authenticate("alice", "secret1", "123456789012", "us-east-1")
            .await
            .unwrap();

        clock.advance(Duration::hours(9));
        let err = client
            .provision_credentials(&token, "123456789012", "us-east-1")
            .await
            .unwrap_err();
        assert!(err.is_not_authenticated());
    }
}

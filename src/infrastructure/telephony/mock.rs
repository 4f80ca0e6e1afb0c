//! Mock telephony client
//!
//! Deterministic stand-in for the live provider, used in tests and dev
//! environments. Sessions are created locally and never leave the process.

use super::{build_session, SessionRegistry};
use crate::domain::shared::clock::{Clock, SystemClock};
use crate::domain::shared::result::Result;
use crate::domain::telephony::{CallSession, SessionStatus, TelephonyService};
use crate::DomainError;
use std::sync::Arc;
use tracing::info;

pub struct MockClient {
    registry: SessionRegistry,
    clock: Arc<dyn Clock>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        let registry = SessionRegistry::with_options(
            super::registry::DEFAULT_SWEEP_INTERVAL,
            clock.clone(),
        );
        info!("mock telephony client initialized");
        Self { registry, clock }
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    pub fn close(&self) {
        self.registry.close();
    }
}

impl Default for MockClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl TelephonyService for MockClient {
    async fn initiate_call(&self, phone_number: &str) -> Result<CallSession> {
        if phone_number.is_empty() {
            return Err(DomainError::InvalidPhoneNumber);
        }

        let session = build_session(phone_number, None, self.clock.now());
        self.registry.add(session.clone()).await;

        info!(
            session_id = %session.session_id,
            phone = %phone_number,
            "mock call initiated"
        );

        Ok(session)
    }

    async fn terminate_call(&self, session_id: &str) -> Result<()> {
        let Some(mut session) = self.registry.remove(session_id).await else {
            return Err(DomainError::SessionNotFound);
        };
        session.status = SessionStatus::Completed;

        info!(session_id = %session_id, "mock call terminated");
        Ok(())
    }

    async fn session_status(&self, session_id: &str) -> Result<SessionStatus> {
        match self.registry.get(session_id).await {
            Some(session) => Ok(session.status),
            None => Err(DomainError::SessionNotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn test_initiate_registers_session() {
        let client = MockClient::new();

        let session = client.initiate_call("+491512345678").await.unwrap();

        assert!(session.session_id.starts_with("sess_"));
        assert_eq!(session.status, SessionStatus::Initialized);
        assert!(!session.sdp_offer.is_empty());
        assert_eq!(session.expires_at - session.created_at, Duration::minutes(5));
        assert_eq!(client.registry().len().await, 1);

        client.close();
    }

    #[tokio::test]
    async fn test_initiate_rejects_empty_number() {
        let client = MockClient::new();

        let err = client.initiate_call("").await.unwrap_err();
        assert_eq!(err, DomainError::InvalidPhoneNumber);
        assert!(client.registry().is_empty().await);

        client.close();
    }

    #[tokio::test]
    async fn test_terminate_removes_session() {
        let client = MockClient::new();
        let session = client.initiate_call("+491512345678").await.unwrap();

        client.terminate_call(&session.session_id).await.unwrap();
        assert!(client.registry().is_empty().await);

        // A second teardown finds nothing
        let err = client.terminate_call(&session.session_id).await.unwrap_err();
        assert_eq!(err, DomainError::SessionNotFound);

        client.close();
    }

    #[tokio::test]
    async fn test_session_status() {
        let client = MockClient::new();
        let session = client.initiate_call("+491512345678").await.unwrap();

        let status = client.session_status(&session.session_id).await.unwrap();
        assert_eq!(status, SessionStatus::Initialized);

        client.terminate_call(&session.session_id).await.unwrap();
        let err = client.session_status(&session.session_id).await.unwrap_err();
        assert_eq!(err, DomainError::SessionNotFound);

        client.close();
    }
}

//! Telephony gateway
//!
//! Bridges the platform to the external provider that actually places
//! calls. One client variant talks to a Twilio-compatible REST API, the
//! other is a deterministic mock for test and dev environments; both own
//! a session registry and behave identically from the coordinator's
//! point of view.

pub mod mock;
pub mod registry;
pub mod token;
pub mod twilio;

pub use mock::MockClient;
pub use registry::SessionRegistry;
pub use token::{VoiceTokenConfig, VoiceTokenIssuer};
pub use twilio::TwilioClient;

use crate::domain::shared::result::Result;
use crate::domain::telephony::{CallSession, SessionStatus, TelephonyService};
use crate::DomainError;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

/// Provider sessions live this long before the registry sweep reclaims them
pub const SESSION_TTL_SECS: i64 = 300;

/// Telephony gateway configuration
#[derive(Debug, Clone, Default)]
pub struct TelephonyConfig {
    /// `twilio` or `mock`
    pub provider: String,
    pub account_sid: String,
    pub auth_token: String,
    pub from_number: String,
    /// Instruction document fetched by the provider when the callee answers
    pub answer_url: String,
}

/// Telephony client, selected once at construction
pub enum TelephonyClient {
    Twilio(TwilioClient),
    Mock(MockClient),
}

impl TelephonyClient {
    pub fn new(config: &TelephonyConfig) -> Result<Self> {
        match config.provider.as_str() {
            "twilio" => Ok(TelephonyClient::Twilio(TwilioClient::new(config)?)),
            "mock" => Ok(TelephonyClient::Mock(MockClient::new())),
            other => Err(DomainError::Internal(format!(
                "unsupported telephony provider: {}",
                other
            ))),
        }
    }

    /// Number of live provider sessions
    pub async fn session_count(&self) -> usize {
        match self {
            TelephonyClient::Twilio(client) => client.registry().len().await,
            TelephonyClient::Mock(client) => client.registry().len().await,
        }
    }

    /// Stop the owned registry's sweep; call exactly once at shutdown
    pub fn close(&self) {
        match self {
            TelephonyClient::Twilio(client) => client.close(),
            TelephonyClient::Mock(client) => client.close(),
        }
    }
}

#[async_trait::async_trait]
impl TelephonyService for TelephonyClient {
    async fn initiate_call(&self, phone_number: &str) -> Result<CallSession> {
        match self {
            TelephonyClient::Twilio(client) => client.initiate_call(phone_number).await,
            TelephonyClient::Mock(client) => client.initiate_call(phone_number).await,
        }
    }

    async fn terminate_call(&self, session_id: &str) -> Result<()> {
        match self {
            TelephonyClient::Twilio(client) => client.terminate_call(session_id).await,
            TelephonyClient::Mock(client) => client.terminate_call(session_id).await,
        }
    }

    async fn session_status(&self, session_id: &str) -> Result<SessionStatus> {
        match self {
            TelephonyClient::Twilio(client) => client.session_status(session_id).await,
            TelephonyClient::Mock(client) => client.session_status(session_id).await,
        }
    }
}

pub(crate) fn new_session_id() -> String {
    format!("sess_{}", Uuid::new_v4().simple())
}

/// Placeholder audio-only SDP offer. Real negotiation happens at the
/// transport edge between the browser and the provider.
pub(crate) fn placeholder_sdp_offer() -> String {
    "v=0\r\n\
     o=- 0 0 IN IP4 127.0.0.1\r\n\
     s=callbridge\r\n\
     t=0 0\r\n\
     m=audio 9 UDP/TLS/RTP/SAVPF 0 8 101\r\n\
     c=IN IP4 0.0.0.0\r\n\
     a=rtcp:9 IN IP4 0.0.0.0\r\n\
     a=sendrecv\r\n"
        .to_string()
}

pub(crate) fn build_session(
    phone_number: &str,
    provider_call_id: Option<String>,
    now: DateTime<Utc>,
) -> CallSession {
    CallSession {
        session_id: new_session_id(),
        phone_number: phone_number.to_string(),
        sdp_offer: placeholder_sdp_offer(),
        status: SessionStatus::Initialized,
        provider_call_id,
        created_at: now,
        expires_at: now + Duration::seconds(SESSION_TTL_SECS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_ids_are_unique() {
        let a = new_session_id();
        let b = new_session_id();
        assert!(a.starts_with("sess_"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_build_session_ttl() {
        let now = Utc::now();
        let session = build_session("+491512345678", None, now);
        assert_eq!(session.expires_at - session.created_at, Duration::seconds(300));
        assert_eq!(session.status, SessionStatus::Initialized);
        assert!(session.sdp_offer.contains("m=audio"));
    }

    #[test]
    fn test_unsupported_provider_rejected() {
        let config = TelephonyConfig {
            provider: "carrier-pigeon".to_string(),
            ..Default::default()
        };
        assert!(TelephonyClient::new(&config).is_err());
    }

    #[tokio::test]
    async fn test_mock_selected_by_config() {
        let config = TelephonyConfig {
            provider: "mock".to_string(),
            ..Default::default()
        };
        let client = TelephonyClient::new(&config).unwrap();
        assert_eq!(client.session_count().await, 0);
        client.close();
    }
}

//! Telephony service port and session model
//!
//! The provider is the system of record for in-flight call state. A
//! `CallSession` exists only while the provider considers the call live;
//! a session that is no longer reachable through the registry is treated
//! as nonexistent even if a durable `Call` still references its id.

use crate::domain::shared::result::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Provider session status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Initialized,
    Connecting,
    Active,
    Completed,
    Failed,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Initialized => "initialized",
            SessionStatus::Connecting => "connecting",
            SessionStatus::Active => "active",
            SessionStatus::Completed => "completed",
            SessionStatus::Failed => "failed",
        }
    }
}

/// Ephemeral provider-side call session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallSession {
    /// Unique, generated at creation
    pub session_id: String,

    pub phone_number: String,
    pub sdp_offer: String,
    pub status: SessionStatus,

    /// Provider's own call resource id, when the live backend dialed
    pub provider_call_id: Option<String>,

    pub created_at: DateTime<Utc>,

    /// Fixed TTL from creation; the registry sweep reclaims expired sessions
    pub expires_at: DateTime<Utc>,
}

impl CallSession {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// Telephony gateway capability set
///
/// Two implementations exist: a live provider-backed client and a
/// deterministic mock, selected by configuration at construction.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait TelephonyService: Send + Sync {
    /// Dial out and open a provider session for the destination number
    async fn initiate_call(&self, phone_number: &str) -> Result<CallSession>;

    /// Tear down a session; registry cleanup proceeds even if the
    /// provider-side hangup fails
    async fn terminate_call(&self, session_id: &str) -> Result<()>;

    /// Current status of a live session
    async fn session_status(&self, session_id: &str) -> Result<SessionStatus>;
}

//! Call entity
//!
//! A `Call` is the durable, user-owned record of one dialing attempt. The
//! provider-side session it may reference is ephemeral and lives in the
//! session registry; the record here is the source of truth for history
//! and billing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Call status
///
/// `Completed`, `Failed` and `Canceled` are terminal: once a call reaches
/// one of them no further transition is permitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallStatus {
    /// Record created, no provider session yet
    Initiated,
    /// Provider session opened, media not yet confirmed
    Connecting,
    /// Call in progress
    Active,
    /// Call completed normally
    Completed,
    /// Call failed (provider or connection trouble)
    Failed,
    /// Call was canceled before connecting
    Canceled,
}

impl CallStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CallStatus::Initiated => "initiated",
            CallStatus::Connecting => "connecting",
            CallStatus::Active => "active",
            CallStatus::Completed => "completed",
            CallStatus::Failed => "failed",
            CallStatus::Canceled => "canceled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "initiated" => Some(CallStatus::Initiated),
            "connecting" => Some(CallStatus::Connecting),
            "active" => Some(CallStatus::Active),
            "completed" => Some(CallStatus::Completed),
            "failed" => Some(CallStatus::Failed),
            "canceled" => Some(CallStatus::Canceled),
            _ => None,
        }
    }

    /// Terminal statuses are absorbing
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            CallStatus::Completed | CallStatus::Failed | CallStatus::Canceled
        )
    }
}

/// Durable call record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Call {
    /// Identifier assigned by the store on creation
    pub id: String,

    /// Owning user; immutable after creation
    pub user_id: String,

    /// E.164-formatted destination
    pub phone_number: String,

    /// Time the call was initiated
    pub start_time: DateTime<Utc>,

    /// Seconds, 0 until terminated
    pub duration: i64,

    pub status: CallStatus,

    /// Link to the provider session; empty on the voice SDK path
    pub session_id: String,
    pub sdp_offer: String,
    pub sdp_answer: String,

    pub created_at: DateTime<Utc>,
}

impl Call {
    /// Create a new record for a dialing attempt; the store assigns `id`.
    pub fn new(
        user_id: String,
        phone_number: String,
        status: CallStatus,
        session_id: String,
        sdp_offer: String,
        start_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: String::new(),
            user_id,
            phone_number,
            start_time,
            duration: 0,
            status,
            session_id,
            sdp_offer,
            sdp_answer: String::new(),
            created_at: start_time,
        }
    }

    /// Stamp the terminal state after a successful teardown
    pub fn mark_completed(&mut self, duration: i64) {
        self.duration = duration;
        self.status = CallStatus::Completed;
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

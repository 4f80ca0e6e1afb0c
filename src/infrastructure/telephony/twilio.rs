//! Twilio-backed telephony client
//!
//! Places calls through the provider's REST API. The provider is the
//! system of record for in-flight call state; this client only mirrors
//! enough of it (the session) to coordinate with the durable call record.
//! Network I/O happens strictly outside the registry lock.

use super::{build_session, SessionRegistry, TelephonyConfig};
use crate::domain::shared::clock::{Clock, SystemClock};
use crate::domain::shared::result::Result;
use crate::domain::telephony::{CallSession, SessionStatus, TelephonyService};
use crate::DomainError;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info, warn};

const DEFAULT_BASE_URL: &str = "https://api.twilio.com";
const DEFAULT_ANSWER_URL: &str = "http://demo.twilio.com/docs/voice.xml";

#[derive(Debug, Deserialize)]
struct CreateCallResponse {
    sid: String,
}

pub struct TwilioClient {
    http: reqwest::Client,
    account_sid: String,
    auth_token: String,
    from_number: String,
    answer_url: String,
    base_url: String,
    registry: SessionRegistry,
    clock: Arc<dyn Clock>,
}

impl TwilioClient {
    pub fn new(config: &TelephonyConfig) -> Result<Self> {
        if config.account_sid.is_empty() || config.auth_token.is_empty() {
            return Err(DomainError::Internal(
                "twilio credentials are required".to_string(),
            ));
        }
        if config.from_number.is_empty() {
            return Err(DomainError::Internal(
                "from_number is required".to_string(),
            ));
        }

        let answer_url = if config.answer_url.is_empty() {
            DEFAULT_ANSWER_URL.to_string()
        } else {
            config.answer_url.clone()
        };

        Ok(Self {
            http: reqwest::Client::new(),
            account_sid: config.account_sid.clone(),
            auth_token: config.auth_token.clone(),
            from_number: config.from_number.clone(),
            answer_url,
            base_url: DEFAULT_BASE_URL.to_string(),
            registry: SessionRegistry::new(),
            clock: Arc::new(SystemClock),
        })
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    pub fn close(&self) {
        self.registry.close();
    }

    fn calls_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Calls.json",
            self.base_url, self.account_sid
        )
    }

    fn call_url(&self, call_sid: &str) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Calls/{}.json",
            self.base_url, self.account_sid, call_sid
        )
    }

    /// Ask the provider to place the call; returns the provider call sid
    async fn dial(&self, phone_number: &str) -> Result<String> {
        let response = self
            .http
            .post(self.calls_url())
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[
                ("To", phone_number),
                ("From", self.from_number.as_str()),
                ("Url", self.answer_url.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, phone = %phone_number, "failed to reach telephony provider");
                DomainError::ServiceUnavailable
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(%status, body = %body, phone = %phone_number, "provider rejected call");

            if is_invalid_number_error(&body) {
                return Err(DomainError::InvalidPhoneNumber);
            }
            return Err(DomainError::ServiceUnavailable);
        }

        let created: CreateCallResponse = response.json().await.map_err(|e| {
            error!(error = %e, "failed to decode provider response");
            DomainError::ServiceUnavailable
        })?;

        Ok(created.sid)
    }

    /// Best-effort provider-side hangup; failures are logged, never propagated
    async fn hangup(&self, call_sid: &str) {
        let result = self
            .http
            .post(self.call_url(call_sid))
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[("Status", "completed")])
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {}
            Ok(response) => {
                warn!(
                    call_sid = %call_sid,
                    status = %response.status(),
                    "provider hangup rejected"
                );
            }
            Err(e) => {
                warn!(call_sid = %call_sid, error = %e, "provider hangup failed");
            }
        }
    }
}

#[async_trait::async_trait]
impl TelephonyService for TwilioClient {
    async fn initiate_call(&self, phone_number: &str) -> Result<CallSession> {
        if phone_number.is_empty() {
            return Err(DomainError::InvalidPhoneNumber);
        }

        let call_sid = self.dial(phone_number).await?;

        let session = build_session(phone_number, Some(call_sid.clone()), self.clock.now());
        self.registry.add(session.clone()).await;

        info!(
            session_id = %session.session_id,
            provider_call_sid = %call_sid,
            phone = %phone_number,
            "call initiated"
        );

        Ok(session)
    }

    async fn terminate_call(&self, session_id: &str) -> Result<()> {
        // Registry cleanup first; the provider hangup must never block it
        let Some(mut session) = self.registry.remove(session_id).await else {
            return Err(DomainError::SessionNotFound);
        };
        session.status = SessionStatus::Completed;

        if let Some(call_sid) = &session.provider_call_id {
            self.hangup(call_sid).await;
        }

        info!(session_id = %session_id, "call terminated");
        Ok(())
    }

    async fn session_status(&self, session_id: &str) -> Result<SessionStatus> {
        match self.registry.get(session_id).await {
            Some(session) => Ok(session.status),
            None => Err(DomainError::SessionNotFound),
        }
    }
}

/// Provider error bodies for malformed destinations carry error codes
/// 21211 / 21614 or an "invalid ... number" message
fn is_invalid_number_error(body: &str) -> bool {
    let lower = body.to_lowercase();
    body.contains("21211")
        || body.contains("21614")
        || lower.contains("not a valid")
        || lower.contains("invalid phone")
}

//! Initiate-call use case
//!
//! Bridges the two calling paths: either the gateway opens a provider
//! session and the durable record references it, or (when a voice token
//! issuer is configured) the browser SDK drives the call and the record
//! carries the `voice_sdk` marker instead of a session.

use crate::domain::call::{Call, CallRepository, CallStatus};
use crate::domain::shared::clock::Clock;
use crate::domain::shared::result::Result;
use crate::domain::shared::validation::is_valid_e164;
use crate::domain::telephony::TelephonyService;
use crate::DomainError;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{error, info};

/// Session id marker for calls placed through the browser voice SDK
pub const VOICE_SDK_SESSION: &str = "voice_sdk";

const VOICE_TOKEN_TTL_SECS: i64 = 3600;

/// Credential source for the browser voice SDK path
#[cfg_attr(test, mockall::automock)]
pub trait VoiceTokenGenerator: Send + Sync {
    fn get_token(&self, identity: &str, ttl_secs: i64) -> Result<String>;
}

impl VoiceTokenGenerator for crate::infrastructure::telephony::VoiceTokenIssuer {
    fn get_token(&self, identity: &str, ttl_secs: i64) -> Result<String> {
        crate::infrastructure::telephony::VoiceTokenIssuer::get_token(self, identity, ttl_secs)
    }
}

#[derive(Debug, Clone)]
pub struct InitiateCallInput {
    pub user_id: String,
    pub phone_number: String,
}

#[derive(Debug, Clone)]
pub struct InitiateCallOutput {
    pub call_id: String,
    pub session_id: String,
    pub sdp_offer: String,
    pub status: String,
    pub start_time: DateTime<Utc>,
    pub voice_token: Option<String>,
}

pub struct InitiateCallUseCase {
    call_repo: Arc<dyn CallRepository>,
    telephony: Arc<dyn TelephonyService>,
    voice_tokens: Option<Arc<dyn VoiceTokenGenerator>>,
    clock: Arc<dyn Clock>,
}

impl InitiateCallUseCase {
    pub fn new(
        call_repo: Arc<dyn CallRepository>,
        telephony: Arc<dyn TelephonyService>,
        voice_tokens: Option<Arc<dyn VoiceTokenGenerator>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            call_repo,
            telephony,
            voice_tokens,
            clock,
        }
    }

    pub async fn execute(&self, input: InitiateCallInput) -> Result<InitiateCallOutput> {
        if input.user_id.is_empty() {
            return Err(DomainError::MissingField("user_id"));
        }
        if input.phone_number.is_empty() {
            return Err(DomainError::MissingField("phone_number"));
        }

        // Validated exactly once, before any external dial attempt
        if !is_valid_e164(&input.phone_number) {
            return Err(DomainError::InvalidPhoneNumber);
        }

        if let Some(issuer) = &self.voice_tokens {
            return self.execute_voice_sdk(&input, issuer.as_ref()).await;
        }

        let session = self
            .telephony
            .initiate_call(&input.phone_number)
            .await
            .map_err(|e| match e {
                DomainError::InvalidPhoneNumber => DomainError::InvalidPhoneNumber,
                other => {
                    error!(
                        error = %other,
                        user_id = %input.user_id,
                        phone = %input.phone_number,
                        "failed to initiate provider call"
                    );
                    DomainError::CallInitiationFailed
                }
            })?;

        let call = Call::new(
            input.user_id.clone(),
            input.phone_number.clone(),
            CallStatus::Connecting,
            session.session_id.clone(),
            session.sdp_offer.clone(),
            self.clock.now(),
        );

        let call = self.call_repo.create(call).await.map_err(|e| {
            // The provider session now exists with nothing durable
            // referencing it; the registry TTL sweep reclaims it.
            error!(
                error = %e,
                user_id = %input.user_id,
                session_id = %session.session_id,
                "failed to create call record"
            );
            DomainError::CallRecordPersistFailed
        })?;

        info!(
            call_id = %call.id,
            user_id = %input.user_id,
            session_id = %session.session_id,
            phone = %input.phone_number,
            "call initiated"
        );

        Ok(InitiateCallOutput {
            call_id: call.id,
            session_id: session.session_id,
            sdp_offer: session.sdp_offer,
            status: call.status.as_str().to_string(),
            start_time: call.start_time,
            voice_token: None,
        })
    }

    async fn execute_voice_sdk(
        &self,
        input: &InitiateCallInput,
        issuer: &dyn VoiceTokenGenerator,
    ) -> Result<InitiateCallOutput> {
        let call = Call::new(
            input.user_id.clone(),
            input.phone_number.clone(),
            CallStatus::Connecting,
            VOICE_SDK_SESSION.to_string(),
            String::new(),
            self.clock.now(),
        );

        let call = self.call_repo.create(call).await.map_err(|e| {
            error!(error = %e, user_id = %input.user_id, "failed to create call record");
            DomainError::CallRecordPersistFailed
        })?;

        // The record is already persisted; a token failure here leaves it
        // in place and surfaces the error.
        let token = issuer
            .get_token(&input.user_id, VOICE_TOKEN_TTL_SECS)
            .map_err(|e| {
                error!(error = %e, user_id = %input.user_id, "failed to generate voice token");
                DomainError::TokenGenerationFailed
            })?;

        info!(
            call_id = %call.id,
            user_id = %input.user_id,
            phone = %input.phone_number,
            "call initiated with voice sdk"
        );

        Ok(InitiateCallOutput {
            call_id: call.id,
            session_id: call.session_id,
            sdp_offer: String::new(),
            status: call.status.as_str().to_string(),
            start_time: call.start_time,
            voice_token: Some(token),
        })
    }
}

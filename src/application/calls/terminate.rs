//! Terminate-call use case
//!
//! The durable record is the source of truth for billing and history, so
//! its update is authoritative: provider-side teardown is attempted once
//! and its failure suppressed, while a record update failure is fatal.

use crate::domain::call::CallRepository;
use crate::domain::shared::clock::Clock;
use crate::domain::shared::result::Result;
use crate::domain::telephony::TelephonyService;
use crate::DomainError;
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Debug, Clone)]
pub struct TerminateCallInput {
    pub user_id: String,
    pub call_id: String,
}

#[derive(Debug, Clone)]
pub struct TerminateCallOutput {
    pub call_id: String,
    pub duration: i64,
    pub status: String,
}

pub struct TerminateCallUseCase {
    call_repo: Arc<dyn CallRepository>,
    telephony: Arc<dyn TelephonyService>,
    clock: Arc<dyn Clock>,
}

impl TerminateCallUseCase {
    pub fn new(
        call_repo: Arc<dyn CallRepository>,
        telephony: Arc<dyn TelephonyService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            call_repo,
            telephony,
            clock,
        }
    }

    pub async fn execute(&self, input: TerminateCallInput) -> Result<TerminateCallOutput> {
        if input.call_id.is_empty() {
            return Err(DomainError::MissingField("call_id"));
        }
        if input.user_id.is_empty() {
            return Err(DomainError::MissingField("user_id"));
        }

        let mut call = self
            .call_repo
            .get_by_id(&input.call_id)
            .await?
            .ok_or(DomainError::CallNotFound)?;

        // Ownership is checked before any state mutation
        if call.user_id != input.user_id {
            warn!(
                call_id = %input.call_id,
                user_id = %input.user_id,
                owner_id = %call.user_id,
                "unauthorized call termination attempt"
            );
            return Err(DomainError::Unauthorized);
        }

        // Terminal statuses are absorbing: duration and status are stamped
        // once and never reset by a repeated terminate
        if call.is_terminal() {
            return Err(DomainError::CallAlreadyEnded);
        }

        // Best effort, single attempt: the user-visible call ends even if
        // provider cleanup fails
        if !call.session_id.is_empty() {
            if let Err(e) = self.telephony.terminate_call(&call.session_id).await {
                warn!(
                    error = %e,
                    session_id = %call.session_id,
                    "failed to terminate provider session"
                );
            }
        }

        let duration = (self.clock.now() - call.start_time).num_seconds().max(0);
        call.mark_completed(duration);

        self.call_repo.update(&call).await.map_err(|e| {
            error!(error = %e, call_id = %call.id, "failed to update call record");
            DomainError::CallUpdateFailed
        })?;

        info!(
            call_id = %call.id,
            user_id = %input.user_id,
            session_id = %call.session_id,
            duration = duration,
            "call terminated"
        );

        Ok(TerminateCallOutput {
            call_id: call.id.clone(),
            duration,
            status: call.status.as_str().to_string(),
        })
    }
}

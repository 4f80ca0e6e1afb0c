//! Start-call use case (record-only path)
//!
//! Used when no telephony integration is configured: the browser handles
//! the call itself and the backend just keeps the history record.

use crate::domain::call::{Call, CallRepository, CallStatus};
use crate::domain::shared::clock::Clock;
use crate::domain::shared::result::Result;
use crate::DomainError;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Debug, Clone)]
pub struct StartCallInput {
    pub user_id: String,
    pub phone_number: String,
}

#[derive(Debug, Clone)]
pub struct StartCallOutput {
    pub call_id: String,
    pub start_time: DateTime<Utc>,
}

pub struct StartCallUseCase {
    call_repo: Arc<dyn CallRepository>,
    clock: Arc<dyn Clock>,
}

impl StartCallUseCase {
    pub fn new(call_repo: Arc<dyn CallRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { call_repo, clock }
    }

    pub async fn execute(&self, input: StartCallInput) -> Result<StartCallOutput> {
        if input.user_id.is_empty() {
            return Err(DomainError::MissingField("user_id"));
        }
        if input.phone_number.is_empty() {
            return Err(DomainError::MissingField("phone_number"));
        }

        let call = Call::new(
            input.user_id.clone(),
            input.phone_number.clone(),
            CallStatus::Initiated,
            String::new(),
            String::new(),
            self.clock.now(),
        );

        let call = self.call_repo.create(call).await.map_err(|e| {
            error!(error = %e, user_id = %input.user_id, "failed to create call record");
            DomainError::CallRecordPersistFailed
        })?;

        info!(
            call_id = %call.id,
            user_id = %input.user_id,
            phone = %input.phone_number,
            "call record created"
        );

        Ok(StartCallOutput {
            call_id: call.id,
            start_time: call.start_time,
        })
    }
}

//! End-call use case (record-only path)
//!
//! Counterpart to start: stamps duration and terminal status on an
//! already-created record, with the same ownership and monotonic-status
//! rules as terminate but no gateway interaction.

use crate::domain::call::CallRepository;
use crate::domain::shared::clock::Clock;
use crate::domain::shared::result::Result;
use crate::DomainError;
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Debug, Clone)]
pub struct EndCallInput {
    pub user_id: String,
    pub call_id: String,
}

#[derive(Debug, Clone)]
pub struct EndCallOutput {
    pub call_id: String,
    pub duration: i64,
    pub status: String,
}

pub struct EndCallUseCase {
    call_repo: Arc<dyn CallRepository>,
    clock: Arc<dyn Clock>,
}

impl EndCallUseCase {
    pub fn new(call_repo: Arc<dyn CallRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { call_repo, clock }
    }

    pub async fn execute(&self, input: EndCallInput) -> Result<EndCallOutput> {
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

        if call.user_id != input.user_id {
            warn!(
                call_id = %input.call_id,
                user_id = %input.user_id,
                "unauthorized call end attempt"
            );
            return Err(DomainError::Unauthorized);
        }

        if call.is_terminal() {
            return Err(DomainError::CallAlreadyEnded);
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
            duration = duration,
            "call ended"
        );

        Ok(EndCallOutput {
            call_id: call.id.clone(),
            duration,
            status: call.status.as_str().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::call::{Call, CallStatus, MockCallRepository};
    use crate::domain::shared::clock::test_support::ManualClock;
    use chrono::{Duration, Utc};

    fn stored_call(status: CallStatus) -> Call {
        let mut call = Call::new(
            "user-1".to_string(),
            "+491512345678".to_string(),
            status,
            String::new(),
            String::new(),
            Utc::now(),
        );
        call.id = "call-1".to_string();
        call
    }

    #[tokio::test]
    async fn test_end_stamps_duration_and_status() {
        let start = Utc::now();
        let clock = Arc::new(ManualClock::new(start));

        let mut call = stored_call(CallStatus::Initiated);
        call.start_time = start;

        let mut repo = MockCallRepository::new();
        let fetched = call.clone();
        repo.expect_get_by_id()
            .returning(move |_| Ok(Some(fetched.clone())));
        repo.expect_update()
            .withf(|call| call.status == CallStatus::Completed && call.duration == 45)
            .returning(|_| Ok(()));

        clock.advance(Duration::seconds(45));
        let output = EndCallUseCase::new(Arc::new(repo), clock)
            .execute(EndCallInput {
                user_id: "user-1".to_string(),
                call_id: "call-1".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(output.duration, 45);
        assert_eq!(output.status, "completed");
    }

    #[tokio::test]
    async fn test_end_enforces_ownership() {
        let mut repo = MockCallRepository::new();
        repo.expect_get_by_id()
            .returning(|_| Ok(Some(stored_call(CallStatus::Initiated))));

        let clock = Arc::new(ManualClock::new(Utc::now()));
        let err = EndCallUseCase::new(Arc::new(repo), clock)
            .execute(EndCallInput {
                user_id: "intruder".to_string(),
                call_id: "call-1".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err, DomainError::Unauthorized);
    }

    #[tokio::test]
    async fn test_end_rejects_already_ended_call() {
        let mut repo = MockCallRepository::new();
        repo.expect_get_by_id()
            .returning(|_| Ok(Some(stored_call(CallStatus::Completed))));

        let clock = Arc::new(ManualClock::new(Utc::now()));
        let err = EndCallUseCase::new(Arc::new(repo), clock)
            .execute(EndCallInput {
                user_id: "user-1".to_string(),
                call_id: "call-1".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err, DomainError::CallAlreadyEnded);
    }

    #[tokio::test]
    async fn test_end_missing_call() {
        let mut repo = MockCallRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));

        let clock = Arc::new(ManualClock::new(Utc::now()));
        let err = EndCallUseCase::new(Arc::new(repo), clock)
            .execute(EndCallInput {
                user_id: "user-1".to_string(),
                call_id: "missing".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err, DomainError::CallNotFound);
    }
}

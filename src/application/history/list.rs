//! Call history listing with date filtering and pagination

use crate::domain::call::CallRepository;
use crate::domain::shared::result::Result;
use crate::DomainError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

const DEFAULT_PAGE_LIMIT: usize = 20;

#[derive(Debug, Clone, Serialize)]
pub struct CallHistoryItem {
    pub call_id: String,
    pub phone_number: String,
    pub start_time: DateTime<Utc>,
    pub duration: i64,
    pub status: String,
}

#[derive(Debug, Clone, Default)]
pub struct ListHistoryInput {
    pub user_id: String,
    pub page: usize,
    pub limit: usize,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListHistoryOutput {
    pub calls: Vec<CallHistoryItem>,
    pub total: usize,
    pub page: usize,
    pub limit: usize,
}

pub struct ListHistoryUseCase {
    call_repo: Arc<dyn CallRepository>,
}

impl ListHistoryUseCase {
    pub fn new(call_repo: Arc<dyn CallRepository>) -> Self {
        Self { call_repo }
    }

    pub async fn execute(&self, input: ListHistoryInput) -> Result<ListHistoryOutput> {
        if input.user_id.is_empty() {
            return Err(DomainError::MissingField("user_id"));
        }

        let calls = self.call_repo.list_by_user_id(&input.user_id).await?;

        let filtered: Vec<_> = calls
            .into_iter()
            .filter(|call| {
                if let Some(from) = input.date_from {
                    if call.start_time < from {
                        return false;
                    }
                }
                if let Some(to) = input.date_to {
                    if call.start_time > to {
                        return false;
                    }
                }
                true
            })
            .collect();

        let total = filtered.len();
        let page = input.page.max(1);
        let limit = if input.limit < 1 {
            DEFAULT_PAGE_LIMIT
        } else {
            input.limit
        };

        let start = ((page - 1) * limit).min(total);
        let end = (start + limit).min(total);

        let items = filtered[start..end]
            .iter()
            .map(|call| CallHistoryItem {
                call_id: call.id.clone(),
                phone_number: call.phone_number.clone(),
                start_time: call.start_time,
                duration: call.duration,
                status: call.status.as_str().to_string(),
            })
            .collect();

        Ok(ListHistoryOutput {
            calls: items,
            total,
            page,
            limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::call::{Call, CallStatus, MockCallRepository};
    use chrono::Duration;

    fn stored_calls(count: usize, base: DateTime<Utc>) -> Vec<Call> {
        (0..count)
            .map(|i| {
                let mut call = Call::new(
                    "user-1".to_string(),
                    format!("+4915123456{:02}", i),
                    CallStatus::Completed,
                    String::new(),
                    String::new(),
                    base - Duration::minutes(i as i64),
                );
                call.id = format!("call-{}", i);
                call
            })
            .collect()
    }

    #[tokio::test]
    async fn test_list_paginates() {
        let base = Utc::now();
        let mut repo = MockCallRepository::new();
        repo.expect_list_by_user_id()
            .returning(move |_| Ok(stored_calls(45, base)));

        let uc = ListHistoryUseCase::new(Arc::new(repo));

        let first = uc
            .execute(ListHistoryInput {
                user_id: "user-1".to_string(),
                page: 1,
                limit: 20,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(first.total, 45);
        assert_eq!(first.calls.len(), 20);
        assert_eq!(first.calls[0].call_id, "call-0");

        let last = uc
            .execute(ListHistoryInput {
                user_id: "user-1".to_string(),
                page: 3,
                limit: 20,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(last.calls.len(), 5);

        let beyond = uc
            .execute(ListHistoryInput {
                user_id: "user-1".to_string(),
                page: 10,
                limit: 20,
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(beyond.calls.is_empty());
        assert_eq!(beyond.total, 45);
    }

    #[tokio::test]
    async fn test_list_defaults_page_and_limit() {
        let base = Utc::now();
        let mut repo = MockCallRepository::new();
        repo.expect_list_by_user_id()
            .returning(move |_| Ok(stored_calls(30, base)));

        let output = ListHistoryUseCase::new(Arc::new(repo))
            .execute(ListHistoryInput {
                user_id: "user-1".to_string(),
                page: 0,
                limit: 0,
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(output.page, 1);
        assert_eq!(output.limit, 20);
        assert_eq!(output.calls.len(), 20);
    }

    #[tokio::test]
    async fn test_list_filters_by_date_range() {
        let base = Utc::now();
        let mut repo = MockCallRepository::new();
        repo.expect_list_by_user_id()
            .returning(move |_| Ok(stored_calls(10, base)));

        // Calls are spaced one minute apart going back from `base`
        let output = ListHistoryUseCase::new(Arc::new(repo))
            .execute(ListHistoryInput {
                user_id: "user-1".to_string(),
                page: 1,
                limit: 20,
                date_from: Some(base - Duration::minutes(5)),
                date_to: Some(base - Duration::minutes(2)),
            })
            .await
            .unwrap();

        assert_eq!(output.total, 4);
        assert!(output
            .calls
            .iter()
            .all(|c| c.start_time >= base - Duration::minutes(5)
                && c.start_time <= base - Duration::minutes(2)));
    }

    #[tokio::test]
    async fn test_list_requires_user_id() {
        let uc = ListHistoryUseCase::new(Arc::new(MockCallRepository::new()));
        let err = uc.execute(ListHistoryInput::default()).await.unwrap_err();
        assert_eq!(err, DomainError::MissingField("user_id"));
    }
}

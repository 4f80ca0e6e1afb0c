//! PostgreSQL implementation of the call repository

use crate::domain::call::{Call, CallRepository, CallStatus};
use crate::domain::shared::result::Result;
use crate::DomainError;
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::{debug, error};
use uuid::Uuid;

#[derive(FromRow)]
struct CallRow {
    id: String,
    user_id: String,
    phone_number: String,
    start_time: chrono::DateTime<chrono::Utc>,
    duration: i64,
    status: String,
    session_id: String,
    sdp_offer: String,
    sdp_answer: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<CallRow> for Call {
    fn from(r: CallRow) -> Self {
        Call {
            id: r.id,
            user_id: r.user_id,
            phone_number: r.phone_number,
            start_time: r.start_time,
            duration: r.duration,
            status: CallStatus::from_str(&r.status).unwrap_or(CallStatus::Failed),
            session_id: r.session_id,
            sdp_offer: r.sdp_offer,
            sdp_answer: r.sdp_answer,
            created_at: r.created_at,
        }
    }
}

pub struct PgCallRepository {
    pool: PgPool,
}

impl PgCallRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CallRepository for PgCallRepository {
    async fn create(&self, mut call: Call) -> Result<Call> {
        let id = Uuid::new_v4().to_string();
        debug!(call_id = %id, user_id = %call.user_id, "creating call record");

        sqlx::query(
            r#"
            INSERT INTO calls (
                id, user_id, phone_number, start_time, duration,
                status, session_id, sdp_offer, sdp_answer, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(&id)
        .bind(&call.user_id)
        .bind(&call.phone_number)
        .bind(call.start_time)
        .bind(call.duration)
        .bind(call.status.as_str())
        .bind(&call.session_id)
        .bind(&call.sdp_offer)
        .bind(&call.sdp_answer)
        .bind(call.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "failed to create call record");
            DomainError::Storage(e.to_string())
        })?;

        call.id = id;
        Ok(call)
    }

    async fn update(&self, call: &Call) -> Result<()> {
        debug!(call_id = %call.id, "updating call record");

        let result = sqlx::query(
            r#"
            UPDATE calls
            SET duration = $2, status = $3, sdp_answer = $4
            WHERE id = $1
            "#,
        )
        .bind(&call.id)
        .bind(call.duration)
        .bind(call.status.as_str())
        .bind(&call.sdp_answer)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, call_id = %call.id, "failed to update call record");
            DomainError::Storage(e.to_string())
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::CallNotFound);
        }

        Ok(())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Call>> {
        let row = sqlx::query_as::<_, CallRow>(
            r#"
            SELECT id, user_id, phone_number, start_time, duration,
                   status, session_id, sdp_offer, sdp_answer, created_at
            FROM calls
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, call_id = %id, "failed to load call record");
            DomainError::Storage(e.to_string())
        })?;

        Ok(row.map(Call::from))
    }

    async fn list_by_user_id(&self, user_id: &str) -> Result<Vec<Call>> {
        let rows = sqlx::query_as::<_, CallRow>(
            r#"
            SELECT id, user_id, phone_number, start_time, duration,
                   status, session_id, sdp_offer, sdp_answer, created_at
            FROM calls
            WHERE user_id = $1
            ORDER BY start_time DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, user_id = %user_id, "failed to list call records");
            DomainError::Storage(e.to_string())
        })?;

        Ok(rows.into_iter().map(Call::from).collect())
    }
}

//! Call history API handler

use super::dto::{HistoryQuery, HistoryResponse};
use super::error::ApiError;
use super::extract::AuthUser;
use super::state::AppState;
use crate::application::history::ListHistoryInput;
use axum::extract::{Query, State};
use axum::Json;

pub async fn list_history(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let output = state
        .list_history
        .execute(ListHistoryInput {
            user_id,
            page: query.page,
            limit: query.limit,
            date_from: query.date_from,
            date_to: query.date_to,
        })
        .await?;

    Ok(Json(HistoryResponse {
        calls: output.calls,
        total: output.total,
        page: output.page,
        limit: output.limit,
    }))
}

//! Record-only call API handlers

use super::dto::{EndCallResponse, StartCallRequest, StartCallResponse};
use super::error::ApiError;
use super::extract::AuthUser;
use super::state::AppState;
use crate::application::calls::{EndCallInput, StartCallInput};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

pub async fn start_call(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(req): Json<StartCallRequest>,
) -> Result<(StatusCode, Json<StartCallResponse>), ApiError> {
    let output = state
        .start_call
        .execute(StartCallInput {
            user_id,
            phone_number: req.phone_number,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(StartCallResponse {
            call_id: output.call_id,
            start_time: output.start_time,
        }),
    ))
}

pub async fn end_call(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(call_id): Path<String>,
) -> Result<Json<EndCallResponse>, ApiError> {
    let output = state
        .end_call
        .execute(EndCallInput { user_id, call_id })
        .await?;

    Ok(Json(EndCallResponse {
        call_id: output.call_id,
        duration: output.duration,
        status: output.status,
    }))
}

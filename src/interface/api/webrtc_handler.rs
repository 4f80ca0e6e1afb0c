//! Provider-bridged call API handlers

use super::dto::{
    InitiateCallRequest, InitiateCallResponse, TerminateCallRequest, TerminateCallResponse,
    VoiceTokenResponse,
};
use super::error::ApiError;
use super::extract::AuthUser;
use super::metrics_handler::{record_call_completed, record_call_failed, record_call_initiated};
use super::state::AppState;
use crate::application::calls::{InitiateCallInput, TerminateCallInput};
use crate::DomainError;
use axum::extract::State;
use axum::Json;

pub async fn initiate_call(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(req): Json<InitiateCallRequest>,
) -> Result<Json<InitiateCallResponse>, ApiError> {
    let result = state
        .initiate_call
        .execute(InitiateCallInput {
            user_id,
            phone_number: req.phone_number,
        })
        .await;

    let output = result.map_err(|e| {
        record_call_failed(e_code(&e));
        ApiError(e)
    })?;
    record_call_initiated();

    Ok(Json(InitiateCallResponse {
        call_id: output.call_id,
        session_id: output.session_id,
        sdp_offer: output.sdp_offer,
        status: output.status,
        start_time: output.start_time,
        voice_token: output.voice_token,
    }))
}

pub async fn terminate_call(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(req): Json<TerminateCallRequest>,
) -> Result<Json<TerminateCallResponse>, ApiError> {
    let output = state
        .terminate_call
        .execute(TerminateCallInput {
            user_id,
            call_id: req.call_id,
        })
        .await?;
    record_call_completed();

    Ok(Json(TerminateCallResponse {
        call_id: output.call_id,
        duration: output.duration,
        status: output.status,
    }))
}

pub async fn voice_token(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<VoiceTokenResponse>, ApiError> {
    let issuer = state
        .voice_tokens
        .as_ref()
        .ok_or(DomainError::IncompleteTokenConfig)?;

    let token = issuer.get_token(&user_id, 0)?;

    Ok(Json(VoiceTokenResponse { token }))
}

fn e_code(error: &DomainError) -> &'static str {
    match error {
        DomainError::InvalidPhoneNumber => "invalid_number",
        DomainError::CallInitiationFailed => "provider",
        DomainError::CallRecordPersistFailed => "persistence",
        DomainError::TokenGenerationFailed => "token",
        _ => "validation",
    }
}

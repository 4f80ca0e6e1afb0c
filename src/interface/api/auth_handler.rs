//! Account API handlers

use super::dto::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use super::error::ApiError;
use super::extract::AuthUser;
use super::state::AppState;
use crate::application::auth::{LoginInput, RegisterInput};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;
use tracing::info;

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let output = state
        .register
        .execute(RegisterInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user_id: output.user_id,
            email: output.email,
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let output = state
        .login
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(LoginResponse {
        access_token: output.access_token,
        user_id: output.user_id,
        email: output.email,
    }))
}

/// Tokens are stateless; logout exists so clients have a definite point
/// to drop their credential
pub async fn logout(AuthUser(user_id): AuthUser) -> Json<serde_json::Value> {
    info!(user_id = %user_id, "user logged out");
    Json(json!({ "message": "logged out" }))
}

//! Request authentication extractor

use super::dto::ErrorResponse;
use super::state::AppState;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts, StatusCode};
use axum::Json;

/// Authenticated user id, extracted from the `Authorization: Bearer` header.
/// Handlers that take this extractor never see credentials, only the
/// verified user id.
pub struct AuthUser(pub String);

fn unauthorized(message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse {
            error: "unauthorized".to_string(),
            message: message.to_string(),
        }),
    )
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| unauthorized("missing authorization header"))?;

        let token = header_value
            .strip_prefix("Bearer ")
            .ok_or_else(|| unauthorized("invalid authorization format"))?;

        let user_id = state
            .jwt
            .extract_user_id(token)
            .map_err(|_| unauthorized("invalid token"))?;

        Ok(AuthUser(user_id))
    }
}

//! Domain error to HTTP response mapping
//!
//! Each error kind maps to one stable status signal, consistent across
//! every endpoint: bad input, bad credentials, not yours, doesn't exist,
//! already settled, try later, server fault.

use super::dto::ErrorResponse;
use crate::DomainError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        ApiError(e)
    }
}

fn status_code(error: &DomainError) -> StatusCode {
    match error {
        DomainError::MissingField(_)
        | DomainError::InvalidPhoneNumber
        | DomainError::InvalidEmail
        | DomainError::WeakPassword(_) => StatusCode::BAD_REQUEST,

        DomainError::InvalidCredentials => StatusCode::UNAUTHORIZED,

        DomainError::Unauthorized => StatusCode::FORBIDDEN,

        DomainError::CallNotFound | DomainError::SessionNotFound => StatusCode::NOT_FOUND,

        DomainError::EmailTaken | DomainError::CallAlreadyEnded => StatusCode::CONFLICT,

        DomainError::ServiceUnavailable
        | DomainError::CallInitiationFailed
        | DomainError::IncompleteTokenConfig => StatusCode::SERVICE_UNAVAILABLE,

        DomainError::CallRecordPersistFailed
        | DomainError::CallUpdateFailed
        | DomainError::TokenGenerationFailed
        | DomainError::Storage(_)
        | DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_code(error: &DomainError) -> &'static str {
    match error {
        DomainError::MissingField(_)
        | DomainError::InvalidPhoneNumber
        | DomainError::InvalidEmail
        | DomainError::WeakPassword(_) => "validation_error",
        DomainError::InvalidCredentials => "invalid_credentials",
        DomainError::Unauthorized => "unauthorized",
        DomainError::CallNotFound | DomainError::SessionNotFound => "not_found",
        DomainError::EmailTaken | DomainError::CallAlreadyEnded => "conflict",
        DomainError::ServiceUnavailable
        | DomainError::CallInitiationFailed
        | DomainError::IncompleteTokenConfig => "service_unavailable",
        _ => "internal_error",
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_code(&self.0);
        let body = ErrorResponse {
            error: error_code(&self.0).to_string(),
            message: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

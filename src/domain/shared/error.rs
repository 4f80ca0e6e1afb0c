//! Domain errors

use thiserror::Error;

/// Domain result type
pub type Result<T> = std::result::Result<T, DomainError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("invalid phone number")]
    InvalidPhoneNumber,

    #[error("unauthorized")]
    Unauthorized,

    #[error("call not found")]
    CallNotFound,

    #[error("call already ended")]
    CallAlreadyEnded,

    #[error("session not found")]
    SessionNotFound,

    #[error("telephony service unavailable")]
    ServiceUnavailable,

    #[error("failed to initiate call")]
    CallInitiationFailed,

    #[error("failed to create call record")]
    CallRecordPersistFailed,

    #[error("failed to update call record")]
    CallUpdateFailed,

    #[error("voice token config incomplete")]
    IncompleteTokenConfig,

    #[error("failed to generate voice token")]
    TokenGenerationFailed,

    #[error("invalid email format")]
    InvalidEmail,

    #[error("password must be at least {0} characters")]
    WeakPassword(usize),

    #[error("user with this email already exists")]
    EmailTaken,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("storage error: {0}")]
    Storage(String),

    #[error("internal error: {0}")]
    Internal(String),
}

//! API request/response types

use crate::application::history::CallHistoryItem;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user_id: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user_id: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct StartCallRequest {
    pub phone_number: String,
}

#[derive(Debug, Serialize)]
pub struct StartCallResponse {
    pub call_id: String,
    pub start_time: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct EndCallResponse {
    pub call_id: String,
    pub duration: i64,
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct InitiateCallRequest {
    pub phone_number: String,
}

#[derive(Debug, Serialize)]
pub struct InitiateCallResponse {
    pub call_id: String,
    pub session_id: String,
    pub sdp_offer: String,
    pub status: String,
    pub start_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TerminateCallRequest {
    pub call_id: String,
}

#[derive(Debug, Serialize)]
pub struct TerminateCallResponse {
    pub call_id: String,
    pub duration: i64,
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct VoiceTokenResponse {
    pub token: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    #[serde(default)]
    pub page: usize,
    #[serde(default)]
    pub limit: usize,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub calls: Vec<CallHistoryItem>,
    pub total: usize,
    pub page: usize,
    pub limit: usize,
}

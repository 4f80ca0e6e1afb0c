//! Application state shared across API handlers

use crate::application::auth::{LoginUseCase, RegisterUseCase};
use crate::application::calls::{
    EndCallUseCase, InitiateCallUseCase, StartCallUseCase, TerminateCallUseCase,
};
use crate::application::history::ListHistoryUseCase;
use crate::infrastructure::auth::JwtService;
use crate::infrastructure::telephony::VoiceTokenIssuer;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub register: Arc<RegisterUseCase>,
    pub login: Arc<LoginUseCase>,
    pub start_call: Arc<StartCallUseCase>,
    pub end_call: Arc<EndCallUseCase>,
    pub initiate_call: Arc<InitiateCallUseCase>,
    pub terminate_call: Arc<TerminateCallUseCase>,
    pub list_history: Arc<ListHistoryUseCase>,
    pub jwt: Arc<JwtService>,
    /// Present only when the voice SDK credential bundle is configured
    pub voice_tokens: Option<Arc<VoiceTokenIssuer>>,
}

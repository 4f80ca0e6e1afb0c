//! Call lifecycle use cases
//!
//! Two calling paths share these rules: provider-bridged calls
//! (initiate/terminate, coordinating the session registry with the durable
//! record) and record-only calls (start/end, no telephony interaction).

pub mod end;
pub mod initiate;
pub mod start;
pub mod terminate;

pub use end::{EndCallInput, EndCallOutput, EndCallUseCase};
pub use initiate::{
    InitiateCallInput, InitiateCallOutput, InitiateCallUseCase, VoiceTokenGenerator,
};
pub use start::{StartCallInput, StartCallOutput, StartCallUseCase};
pub use terminate::{TerminateCallInput, TerminateCallOutput, TerminateCallUseCase};

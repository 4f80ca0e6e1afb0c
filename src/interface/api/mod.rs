//! REST API

pub mod auth_handler;
pub mod calls_handler;
pub mod dto;
pub mod error;
pub mod extract;
pub mod history_handler;
pub mod metrics_handler;
pub mod router;
pub mod state;
pub mod webrtc_handler;

pub use error::ApiError;
pub use extract::AuthUser;
pub use metrics_handler::init_metrics;
pub use router::build_router;
pub use state::AppState;

//! Interface layer - External interfaces
//!
//! This layer handles:
//! - REST API endpoints
//! - Request/response formatting
//! - Bearer token authentication of requests

pub mod api;

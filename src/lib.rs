//! callbridge - a browser calling platform backend
//!
//! Users register, authenticate, and place voice calls from the browser.
//! Dialing is bridged to an external telephony provider; the durable call
//! history stays here.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interface;

// Re-export commonly used types
pub use domain::shared::error::DomainError;
pub use domain::shared::result::Result;

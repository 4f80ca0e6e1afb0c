//! Call domain model

pub mod entity;
pub mod repository;

pub use entity::{Call, CallStatus};
pub use repository::CallRepository;

#[cfg(test)]
pub use repository::MockCallRepository;

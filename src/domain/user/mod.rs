//! User domain model

pub mod entity;
pub mod repository;

pub use entity::User;
pub use repository::UserRepository;

#[cfg(test)]
pub use repository::MockUserRepository;

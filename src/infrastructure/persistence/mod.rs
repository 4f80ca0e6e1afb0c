//! Persistence implementations

pub mod memory;

#[cfg(feature = "postgres")]
pub mod call_repository;
#[cfg(feature = "postgres")]
pub mod database;
#[cfg(feature = "postgres")]
pub mod user_repository;

pub use memory::{MemoryCallRepository, MemoryUserRepository};

#[cfg(feature = "postgres")]
pub use call_repository::PgCallRepository;
#[cfg(feature = "postgres")]
pub use database::{create_pool, run_migrations};
#[cfg(feature = "postgres")]
pub use user_repository::PgUserRepository;

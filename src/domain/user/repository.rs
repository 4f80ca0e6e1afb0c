//! User repository interface

use crate::domain::shared::result::Result;
use crate::domain::user::entity::User;

/// Repository interface for user accounts
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user; the store assigns the id and returns the record
    async fn create(&self, user: User) -> Result<User>;

    /// Find a user by email
    async fn get_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Find a user by ID
    async fn get_by_id(&self, id: &str) -> Result<Option<User>>;
}

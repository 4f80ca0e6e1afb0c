//! Call repository interface
//!
//! Defined in the domain layer as a trait (port), implemented in the
//! infrastructure layer (adapter).

use crate::domain::call::entity::Call;
use crate::domain::shared::result::Result;

/// Repository interface for durable call records
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CallRepository: Send + Sync {
    /// Persist a new call; the store assigns the id and returns the record
    async fn create(&self, call: Call) -> Result<Call>;

    /// Update an existing call
    async fn update(&self, call: &Call) -> Result<()>;

    /// Find a call by its ID
    async fn get_by_id(&self, id: &str) -> Result<Option<Call>>;

    /// List calls owned by a user, most recent first
    async fn list_by_user_id(&self, user_id: &str) -> Result<Vec<Call>>;
}

//! User entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Registered platform user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Identifier assigned by the store on creation
    pub id: String,
    pub email: String,
    /// bcrypt hash; never serialized out through the API
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: String, password_hash: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id: String::new(),
            email,
            password_hash,
            created_at,
        }
    }
}

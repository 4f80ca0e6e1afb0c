//! In-memory repository implementations
//!
//! Used by integration tests and by deployments without a database.

use crate::domain::call::{Call, CallRepository};
use crate::domain::shared::result::Result;
use crate::domain::user::{User, UserRepository};
use crate::DomainError;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
pub struct MemoryCallRepository {
    calls: RwLock<HashMap<String, Call>>,
}

impl MemoryCallRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CallRepository for MemoryCallRepository {
    async fn create(&self, mut call: Call) -> Result<Call> {
        call.id = Uuid::new_v4().to_string();
        let mut calls = self.calls.write().await;
        calls.insert(call.id.clone(), call.clone());
        Ok(call)
    }

    async fn update(&self, call: &Call) -> Result<()> {
        let mut calls = self.calls.write().await;
        if !calls.contains_key(&call.id) {
            return Err(DomainError::CallNotFound);
        }
        calls.insert(call.id.clone(), call.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Call>> {
        let calls = self.calls.read().await;
        Ok(calls.get(id).cloned())
    }

    async fn list_by_user_id(&self, user_id: &str) -> Result<Vec<Call>> {
        let calls = self.calls.read().await;
        let mut owned: Vec<Call> = calls
            .values()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.start_time.cmp(&a.start_time));
        Ok(owned)
    }
}

#[derive(Default)]
pub struct MemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create(&self, mut user: User) -> Result<User> {
        user.id = Uuid::new_v4().to_string();
        let mut users = self.users.write().await;
        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(id).cloned())
    }
}

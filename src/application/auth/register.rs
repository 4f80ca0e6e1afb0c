//! Registration use case

use crate::domain::shared::clock::Clock;
use crate::domain::shared::result::Result;
use crate::domain::shared::validation::is_valid_email;
use crate::domain::user::{User, UserRepository};
use crate::infrastructure::auth::hash_password;
use crate::DomainError;
use std::sync::Arc;
use tracing::info;

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct RegisterOutput {
    pub user_id: String,
    pub email: String,
}

pub struct RegisterUseCase {
    user_repo: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
}

impl RegisterUseCase {
    pub fn new(user_repo: Arc<dyn UserRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { user_repo, clock }
    }

    pub async fn execute(&self, input: RegisterInput) -> Result<RegisterOutput> {
        if !is_valid_email(&input.email) {
            return Err(DomainError::InvalidEmail);
        }
        if input.password.len() < MIN_PASSWORD_LEN {
            return Err(DomainError::WeakPassword(MIN_PASSWORD_LEN));
        }

        if self.user_repo.get_by_email(&input.email).await?.is_some() {
            return Err(DomainError::EmailTaken);
        }

        let password_hash = hash_password(&input.password)?;
        let user = User::new(input.email.clone(), password_hash, self.clock.now());
        let user = self.user_repo.create(user).await?;

        info!(user_id = %user.id, email = %user.email, "user registered");

        Ok(RegisterOutput {
            user_id: user.id,
            email: user.email,
        })
    }
}

//! Login use case

use crate::domain::shared::result::Result;
use crate::domain::user::UserRepository;
use crate::infrastructure::auth::{verify_password, JwtService};
use crate::DomainError;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct LoginOutput {
    pub access_token: String,
    pub user_id: String,
    pub email: String,
}

pub struct LoginUseCase {
    user_repo: Arc<dyn UserRepository>,
    jwt: Arc<JwtService>,
}

impl LoginUseCase {
    pub fn new(user_repo: Arc<dyn UserRepository>, jwt: Arc<JwtService>) -> Self {
        Self { user_repo, jwt }
    }

    pub async fn execute(&self, input: LoginInput) -> Result<LoginOutput> {
        let user = self
            .user_repo
            .get_by_email(&input.email)
            .await?
            .ok_or(DomainError::InvalidCredentials)?;

        if !verify_password(&input.password, &user.password_hash) {
            return Err(DomainError::InvalidCredentials);
        }

        let token = self.jwt.generate_token(&user.id, &user.email)?;

        info!(user_id = %user.id, email = %user.email, "user logged in");

        Ok(LoginOutput {
            access_token: token,
            user_id: user.id,
            email: user.email,
        })
    }
}

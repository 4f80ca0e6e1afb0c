//! PostgreSQL implementation of the user repository

use crate::domain::shared::result::Result;
use crate::domain::user::{User, UserRepository};
use crate::DomainError;
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::{debug, error};
use uuid::Uuid;

#[derive(FromRow)]
struct UserRow {
    id: String,
    email: String,
    password_hash: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        User {
            id: r.id,
            email: r.email,
            password_hash: r.password_hash,
            created_at: r.created_at,
        }
    }
}

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, mut user: User) -> Result<User> {
        let id = Uuid::new_v4().to_string();
        debug!(user_id = %id, email = %user.email, "creating user");

        sqlx::query(
            r#"
            INSERT INTO users (id, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "failed to create user");
            DomainError::Storage(e.to_string())
        })?;

        user.id = id;
        Ok(user)
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "failed to load user by email");
            DomainError::Storage(e.to_string())
        })?;

        Ok(row.map(User::from))
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, user_id = %id, "failed to load user");
            DomainError::Storage(e.to_string())
        })?;

        Ok(row.map(User::from))
    }
}

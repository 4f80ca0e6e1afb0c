//! Authentication infrastructure - JWT issuance and password hashing

use crate::domain::shared::result::Result;
use crate::DomainError;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::error;

/// Access tokens are valid for 24 hours
const ACCESS_TOKEN_TTL_HOURS: i64 = 24;

/// Access token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

/// HS256 access token service
#[derive(Clone)]
pub struct JwtService {
    secret: String,
}

impl JwtService {
    pub fn new(secret: String) -> Self {
        Self { secret }
    }

    pub fn generate_token(&self, user_id: &str, email: &str) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(ACCESS_TOKEN_TTL_HOURS)).timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| {
            error!(error = %e, "failed to sign access token");
            DomainError::Internal("failed to generate token".to_string())
        })
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|_| DomainError::Unauthorized)
    }

    /// Verify a bearer token and return the authenticated user id
    pub fn extract_user_id(&self, token: &str) -> Result<String> {
        Ok(self.verify_token(token)?.sub)
    }
}

/// Hash a password with bcrypt
pub fn hash_password(password: &str) -> Result<String> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(|e| {
        error!(error = %e, "failed to hash password");
        DomainError::Internal("failed to hash password".to_string())
    })
}

/// Verify a password against its bcrypt hash
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

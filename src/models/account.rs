//! Account model and JWT claims

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Full account model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Account {
    pub id: i32,
    pub username: String,
    /// Hashed password (argon2)
    #[serde(skip_serializing)]
    pub password: String,
    pub created_at: DateTime<Utc>,
}

/// Public account representation returned on registration
#[derive(Debug, Serialize, ToSchema)]
pub struct AccountResponse {
    pub id: i32,
    pub username: String,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        AccountResponse {
            id: account.id,
            username: account.username,
        }
    }
}

/// Register account request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterAccount {
    #[validate(length(min = 1, max = 150, message = "Username must be 1-150 characters"))]
    pub username: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

/// Token request credentials
#[derive(Debug, Deserialize, ToSchema)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Token response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

/// JWT claims for authenticated accounts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountClaims {
    pub sub: String,
    pub account_id: i32,
    pub exp: i64,
    pub iat: i64,
}

impl AccountClaims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }
}

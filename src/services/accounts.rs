//! Accounts service: registration and token issue

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use validator::Validate;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::account::{AccountClaims, AccountResponse, Credentials, RegisterAccount},
    repository::Repository,
};

const INVALID_CREDENTIALS: &str = "Unable to log in with provided credentials";

#[derive(Clone)]
pub struct AccountsService {
    repository: Repository,
    config: AuthConfig,
}

impl AccountsService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Register a new account
    pub async fn register(&self, account: RegisterAccount) -> AppResult<AccountResponse> {
        account.validate()?;

        if self
            .repository
            .accounts
            .username_exists(&account.username)
            .await?
        {
            return Err(AppError::Validation(
                "A user with that username already exists".to_string(),
            ));
        }

        let password = hash_password(&account.password)?;
        let created = self
            .repository
            .accounts
            .create(&account.username, &password)
            .await?;

        Ok(AccountResponse::from(created))
    }

    /// Verify credentials and issue a JWT
    pub async fn issue_token(&self, credentials: &Credentials) -> AppResult<String> {
        let account = self
            .repository
            .accounts
            .get_by_username(&credentials.username)
            .await?
            .ok_or_else(|| AppError::Validation(INVALID_CREDENTIALS.to_string()))?;

        if !verify_password(&account.password, &credentials.password)? {
            return Err(AppError::Validation(INVALID_CREDENTIALS.to_string()));
        }

        let now = Utc::now().timestamp();
        let exp = now + (self.config.jwt_expiration_hours as i64 * 3600);

        let claims = AccountClaims {
            sub: account.username.clone(),
            account_id: account.id,
            exp,
            iat: now,
        };

        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }
}

/// Hash a password using Argon2
fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

/// Verify a password against its stored hash
fn verify_password(hash: &str, password: &str) -> AppResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

//! Accounts repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::account::Account,
    repository::map_unique_violation,
};

const USERNAME_CONSTRAINT: &str = "accounts_username_key";
const USERNAME_TAKEN: &str = "A user with that username already exists";

#[derive(Clone)]
pub struct AccountsRepository {
    pool: Pool<Postgres>,
}

impl AccountsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get account by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Account> {
        let account = sqlx::query_as::<_, Account>(
            "SELECT id, username, password, created_at FROM accounts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Account with id {} not found", id)))?;

        Ok(account)
    }

    /// Get account by username
    pub async fn get_by_username(&self, username: &str) -> AppResult<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(
            "SELECT id, username, password, created_at FROM accounts WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    /// Check if a username is already taken
    pub async fn username_exists(&self, username: &str) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM accounts WHERE username = $1)")
                .bind(username)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    /// Create a new account with an already-hashed password
    pub async fn create(&self, username: &str, password: &str) -> AppResult<Account> {
        let id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO accounts (username, password) VALUES ($1, $2) RETURNING id",
        )
        .bind(username)
        .bind(password)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, USERNAME_CONSTRAINT, USERNAME_TAKEN))?;

        self.get_by_id(id).await
    }
}

//! Repository layer for database operations

pub mod accounts;
pub mod authors;
pub mod books;

use sqlx::{Pool, Postgres};

use crate::error::AppError;

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub authors: authors::AuthorsRepository,
    pub books: books::BooksRepository,
    pub accounts: accounts::AccountsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            authors: authors::AuthorsRepository::new(pool.clone()),
            books: books::BooksRepository::new(pool.clone()),
            accounts: accounts::AccountsRepository::new(pool.clone()),
            pool,
        }
    }
}

/// Build a case-insensitive LIKE pattern from a raw search term.
/// LIKE metacharacters are escaped so the term matches literally.
pub(crate) fn like_pattern(term: &str) -> String {
    let escaped = term
        .trim()
        .to_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

/// Translate a unique constraint violation into a validation error,
/// passing any other database error through unchanged.
pub(crate) fn map_unique_violation(err: sqlx::Error, constraint: &str, message: &str) -> AppError {
    if err.as_database_error().and_then(|db| db.constraint()) == Some(constraint) {
        AppError::Validation(message.to_string())
    } else {
        AppError::Database(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_lowercases() {
        assert_eq!(like_pattern("Tolkien"), "%tolkien%");
    }

    #[test]
    fn test_like_pattern_trims() {
        assert_eq!(like_pattern("  2023-01-01 "), "%2023-01-01%");
    }

    #[test]
    fn test_like_pattern_escapes_percent() {
        assert_eq!(like_pattern("50%"), "%50\\%%");
    }

    #[test]
    fn test_like_pattern_escapes_underscore() {
        assert_eq!(like_pattern("test_author"), "%test\\_author%");
    }

    #[test]
    fn test_like_pattern_escapes_backslash_first() {
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }
}

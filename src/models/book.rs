//! Book model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::models::author::Author;

/// Internal row structure for book queries, without the author list
#[derive(Debug, Clone, FromRow)]
pub struct BookRow {
    pub id: i32,
    pub title: String,
    pub book_pages: i32,
    pub genre: i32,
    pub release_date: NaiveDate,
}

/// Full book representation with embedded authors
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: Vec<Author>,
    pub book_pages: i32,
    pub genre: i32,
    pub release_date: NaiveDate,
}

impl Book {
    pub fn from_row(row: BookRow, authors: Vec<Author>) -> Self {
        Book {
            id: row.id,
            title: row.title,
            author: authors,
            book_pages: row.book_pages,
            genre: row.genre,
            release_date: row.release_date,
        }
    }
}

/// Create book request, also used for full updates.
/// Authors are referenced by id; responses embed the full representations.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    /// Author ids to associate with the book
    #[serde(default)]
    pub author: Vec<i32>,
    #[validate(range(min = 0, message = "Pages must be non-negative"))]
    pub book_pages: i32,
    #[validate(range(min = 0, message = "Genre must be non-negative"))]
    pub genre: i32,
    pub release_date: NaiveDate,
}

/// Partial update request: only supplied fields change
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,
    /// Replaces the full author set when supplied
    pub author: Option<Vec<i32>>,
    #[validate(range(min = 0, message = "Pages must be non-negative"))]
    pub book_pages: Option<i32>,
    #[validate(range(min = 0, message = "Genre must be non-negative"))]
    pub genre: Option<i32>,
    pub release_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_book() -> CreateBook {
        CreateBook {
            title: "book2".to_string(),
            author: vec![],
            book_pages: 50,
            genre: 1,
            release_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
        }
    }

    #[test]
    fn test_create_book_valid() {
        assert!(valid_book().validate().is_ok());
    }

    #[test]
    fn test_create_book_rejects_negative_pages() {
        let mut book = valid_book();
        book.book_pages = -1;
        let errors = book.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("book_pages"));
    }

    #[test]
    fn test_create_book_rejects_negative_genre() {
        let mut book = valid_book();
        book.genre = -5;
        let errors = book.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("genre"));
    }

    #[test]
    fn test_create_book_author_defaults_to_empty() {
        let book: CreateBook = serde_json::from_value(serde_json::json!({
            "title": "book2",
            "book_pages": 50,
            "genre": 1,
            "release_date": "2023-01-01"
        }))
        .unwrap();
        assert!(book.author.is_empty());
    }
}

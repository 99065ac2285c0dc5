//! Author model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Full author model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: i32,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone: i64,
    /// Social media handle
    pub fb_name: Option<String>,
    /// Reference to the stored portrait image
    pub image: Option<String>,
}

/// Reduced author view returned by the image upload endpoint
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct AuthorImage {
    pub id: i32,
    pub image: Option<String>,
}

/// Create author request, also used for full updates
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAuthor {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 200, message = "Surname must be 1-200 characters"))]
    pub surname: String,
    #[validate(
        email(message = "Enter a valid email address"),
        length(max = 200, message = "Email must be at most 200 characters")
    )]
    pub email: String,
    pub phone: i64,
    #[validate(length(max = 200, message = "Social handle must be at most 200 characters"))]
    pub fb_name: Option<String>,
}

/// Partial update request: only supplied fields change
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAuthor {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 200, message = "Surname must be 1-200 characters"))]
    pub surname: Option<String>,
    #[validate(
        email(message = "Enter a valid email address"),
        length(max = 200, message = "Email must be at most 200 characters")
    )]
    pub email: Option<String>,
    pub phone: Option<i64>,
    #[validate(length(max = 200, message = "Social handle must be at most 200 characters"))]
    pub fb_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_author() -> CreateAuthor {
        CreateAuthor {
            name: "test".to_string(),
            surname: "author".to_string(),
            email: "test@gmail.com".to_string(),
            phone: 9120032100,
            fb_name: None,
        }
    }

    #[test]
    fn test_create_author_valid() {
        assert!(valid_author().validate().is_ok());
    }

    #[test]
    fn test_create_author_rejects_bad_email() {
        let mut author = valid_author();
        author.email = "not-an-email".to_string();
        let errors = author.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_create_author_rejects_empty_name() {
        let mut author = valid_author();
        author.name = String::new();
        let errors = author.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn test_partial_update_skips_absent_fields() {
        let update = UpdateAuthor {
            name: None,
            surname: None,
            email: None,
            phone: Some(9000060000),
            fb_name: None,
        };
        assert!(update.validate().is_ok());
    }

    #[test]
    fn test_partial_update_validates_present_fields() {
        let update = UpdateAuthor {
            name: None,
            surname: None,
            email: Some("broken".to_string()),
            phone: None,
            fb_name: None,
        };
        let errors = update.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }
}

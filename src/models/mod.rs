//! Data models for Folia

pub mod account;
pub mod author;
pub mod book;

// Re-export commonly used types
pub use account::Account;
pub use author::Author;
pub use book::Book;

use serde::Deserialize;

/// Query parameters for list endpoints
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    /// Term matched case-insensitively against the resource's searchable fields
    pub search: Option<String>,
}

//! Books service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, CreateBook, UpdateBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List books, filtered by the search term when present
    pub async fn list(&self, search: Option<&str>) -> AppResult<Vec<Book>> {
        let term = search.map(str::trim).filter(|t| !t.is_empty());
        self.repository.books.list(term).await
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    /// Create a new book
    pub async fn create(&self, book: CreateBook) -> AppResult<Book> {
        book.validate()?;

        if self.repository.books.title_exists(&book.title, None).await? {
            return Err(AppError::Validation(
                "Book with this title already exists".to_string(),
            ));
        }

        self.verify_author_ids(&book.author).await?;

        self.repository.books.create(&book).await
    }

    /// Replace all fields of an existing book
    pub async fn update(&self, id: i32, book: CreateBook) -> AppResult<Book> {
        book.validate()?;

        self.repository.books.get_by_id(id).await?;

        if self
            .repository
            .books
            .title_exists(&book.title, Some(id))
            .await?
        {
            return Err(AppError::Validation(
                "Book with this title already exists".to_string(),
            ));
        }

        self.verify_author_ids(&book.author).await?;

        self.repository.books.update_full(id, &book).await
    }

    /// Update only the supplied fields of an existing book
    pub async fn update_partial(&self, id: i32, book: UpdateBook) -> AppResult<Book> {
        book.validate()?;

        self.repository.books.get_by_id(id).await?;

        if let Some(ref title) = book.title {
            if self.repository.books.title_exists(title, Some(id)).await? {
                return Err(AppError::Validation(
                    "Book with this title already exists".to_string(),
                ));
            }
        }

        if let Some(ref author_ids) = book.author {
            self.verify_author_ids(author_ids).await?;
        }

        self.repository.books.update_partial(id, &book).await
    }

    /// Delete a book
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.books.get_by_id(id).await?;
        self.repository.books.delete(id).await
    }

    /// Ensure every referenced author id exists before any row is written
    async fn verify_author_ids(&self, ids: &[i32]) -> AppResult<()> {
        if ids.is_empty() {
            return Ok(());
        }

        let existing = self.repository.authors.filter_existing_ids(ids).await?;
        let missing: Vec<String> = ids
            .iter()
            .filter(|id| !existing.contains(id))
            .map(|id| id.to_string())
            .collect();

        if !missing.is_empty() {
            return Err(AppError::Validation(format!(
                "Unknown author id(s): {}",
                missing.join(", ")
            )));
        }

        Ok(())
    }
}

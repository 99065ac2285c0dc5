//! Books repository for database operations

use std::collections::HashMap;

use chrono::Utc;
use sqlx::{Pool, Postgres, Row, Transaction};

use crate::{
    error::{AppError, AppResult},
    models::{
        author::Author,
        book::{Book, BookRow, CreateBook, UpdateBook},
    },
    repository::{like_pattern, map_unique_violation},
};

const TITLE_CONSTRAINT: &str = "books_title_key";
const TITLE_TAKEN: &str = "Book with this title already exists";

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get book by ID with its authors embedded
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        let row = sqlx::query_as::<_, BookRow>(
            "SELECT id, title, book_pages, genre, release_date FROM books WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))?;

        let authors = self.get_book_authors(id).await?;

        Ok(Book::from_row(row, authors))
    }

    /// List books, optionally filtered by a search term matched against
    /// title, author name, page count and release date.
    pub async fn list(&self, search: Option<&str>) -> AppResult<Vec<Book>> {
        let rows = match search {
            Some(term) => {
                sqlx::query_as::<_, BookRow>(
                    r#"
                    SELECT b.id, b.title, b.book_pages, b.genre, b.release_date
                    FROM books b
                    WHERE LOWER(b.title) LIKE $1
                       OR CAST(b.book_pages AS TEXT) LIKE $1
                       OR CAST(b.release_date AS TEXT) LIKE $1
                       OR EXISTS (
                            SELECT 1 FROM book_authors ba
                            JOIN authors a ON a.id = ba.author_id
                            WHERE ba.book_id = b.id AND LOWER(a.name) LIKE $1
                       )
                    ORDER BY b.id
                    "#,
                )
                .bind(like_pattern(term))
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, BookRow>(
                    "SELECT id, title, book_pages, genre, release_date FROM books ORDER BY id",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        let ids: Vec<i32> = rows.iter().map(|row| row.id).collect();
        let mut authors_by_book = self.get_authors_for_books(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let authors = authors_by_book.remove(&row.id).unwrap_or_default();
                Book::from_row(row, authors)
            })
            .collect())
    }

    /// Check if a book with the given title already exists
    pub async fn title_exists(&self, title: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let exists: bool = if let Some(id) = exclude_id {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE title = $1 AND id != $2)")
                .bind(title)
                .bind(id)
                .fetch_one(&self.pool)
                .await?
        } else {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE title = $1)")
                .bind(title)
                .fetch_one(&self.pool)
                .await?
        };
        Ok(exists)
    }

    /// Create a new book and its author associations in one transaction
    pub async fn create(&self, book: &CreateBook) -> AppResult<Book> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO books (title, book_pages, genre, release_date, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(&book.title)
        .bind(book.book_pages)
        .bind(book.genre)
        .bind(book.release_date)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, TITLE_CONSTRAINT, TITLE_TAKEN))?;

        self.sync_book_authors(&mut tx, id, &book.author).await?;

        tx.commit().await?;

        self.get_by_id(id).await
    }

    /// Replace all fields of an existing book, including its author set
    pub async fn update_full(&self, id: i32, book: &CreateBook) -> AppResult<Book> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            UPDATE books
            SET title = $1, book_pages = $2, genre = $3, release_date = $4, updated_at = $5
            WHERE id = $6
            "#,
        )
        .bind(&book.title)
        .bind(book.book_pages)
        .bind(book.genre)
        .bind(book.release_date)
        .bind(now)
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, TITLE_CONSTRAINT, TITLE_TAKEN))?;

        self.sync_book_authors(&mut tx, id, &book.author).await?;

        tx.commit().await?;

        self.get_by_id(id).await
    }

    /// Update only the supplied fields of an existing book. The author set
    /// is replaced when present and left untouched when absent.
    pub async fn update_partial(&self, id: i32, book: &UpdateBook) -> AppResult<Book> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            UPDATE books
            SET title = COALESCE($1, title),
                book_pages = COALESCE($2, book_pages),
                genre = COALESCE($3, genre),
                release_date = COALESCE($4, release_date),
                updated_at = $5
            WHERE id = $6
            "#,
        )
        .bind(&book.title)
        .bind(book.book_pages)
        .bind(book.genre)
        .bind(book.release_date)
        .bind(now)
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, TITLE_CONSTRAINT, TITLE_TAKEN))?;

        if let Some(ref author_ids) = book.author {
            self.sync_book_authors(&mut tx, id, author_ids).await?;
        }

        tx.commit().await?;

        self.get_by_id(id).await
    }

    /// Delete a book; join table rows are removed by cascade
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Replace all authors for a book: delete existing rows then insert new ones
    async fn sync_book_authors(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        book_id: i32,
        author_ids: &[i32],
    ) -> AppResult<()> {
        sqlx::query("DELETE FROM book_authors WHERE book_id = $1")
            .bind(book_id)
            .execute(&mut **tx)
            .await?;

        for author_id in author_ids {
            sqlx::query(
                r#"
                INSERT INTO book_authors (book_id, author_id)
                VALUES ($1, $2)
                ON CONFLICT (book_id, author_id) DO NOTHING
                "#,
            )
            .bind(book_id)
            .bind(author_id)
            .execute(&mut **tx)
            .await?;
        }

        Ok(())
    }

    /// Load all authors for a book via the book_authors junction table
    async fn get_book_authors(&self, book_id: i32) -> AppResult<Vec<Author>> {
        let authors = sqlx::query_as::<_, Author>(
            r#"
            SELECT a.id, a.name, a.surname, a.email, a.phone, a.fb_name, a.image
            FROM book_authors ba
            JOIN authors a ON a.id = ba.author_id
            WHERE ba.book_id = $1
            ORDER BY a.id
            "#,
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(authors)
    }

    /// Load authors for a set of books in one query, grouped by book id
    async fn get_authors_for_books(&self, book_ids: &[i32]) -> AppResult<HashMap<i32, Vec<Author>>> {
        if book_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query(
            r#"
            SELECT ba.book_id, a.id, a.name, a.surname, a.email, a.phone, a.fb_name, a.image
            FROM book_authors ba
            JOIN authors a ON a.id = ba.author_id
            WHERE ba.book_id = ANY($1)
            ORDER BY ba.book_id, a.id
            "#,
        )
        .bind(book_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut authors_by_book: HashMap<i32, Vec<Author>> = HashMap::new();
        for row in rows {
            authors_by_book
                .entry(row.get("book_id"))
                .or_default()
                .push(Author {
                    id: row.get("id"),
                    name: row.get("name"),
                    surname: row.get("surname"),
                    email: row.get("email"),
                    phone: row.get("phone"),
                    fb_name: row.get("fb_name"),
                    image: row.get("image"),
                });
        }

        Ok(authors_by_book)
    }
}

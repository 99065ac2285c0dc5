//! Authors repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::author::{Author, AuthorImage, CreateAuthor, UpdateAuthor},
    repository::{like_pattern, map_unique_violation},
};

const NAME_SURNAME_CONSTRAINT: &str = "authors_name_surname_key";
const NAME_SURNAME_TAKEN: &str = "Author with this name and surname already exists";

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Postgres>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get author by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Author> {
        let author = sqlx::query_as::<_, Author>(
            "SELECT id, name, surname, email, phone, fb_name, image FROM authors WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Author with id {} not found", id)))?;

        Ok(author)
    }

    /// List authors, optionally filtered by a search term matched against
    /// name, surname and email.
    pub async fn list(&self, search: Option<&str>) -> AppResult<Vec<Author>> {
        let authors = match search {
            Some(term) => {
                sqlx::query_as::<_, Author>(
                    r#"
                    SELECT id, name, surname, email, phone, fb_name, image
                    FROM authors
                    WHERE LOWER(name) LIKE $1
                       OR LOWER(surname) LIKE $1
                       OR LOWER(email) LIKE $1
                    ORDER BY id
                    "#,
                )
                .bind(like_pattern(term))
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Author>(
                    "SELECT id, name, surname, email, phone, fb_name, image FROM authors ORDER BY id",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(authors)
    }

    /// Check if an author with the given name and surname already exists
    pub async fn name_pair_exists(
        &self,
        name: &str,
        surname: &str,
        exclude_id: Option<i32>,
    ) -> AppResult<bool> {
        let exists: bool = if let Some(id) = exclude_id {
            sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM authors WHERE name = $1 AND surname = $2 AND id != $3)",
            )
            .bind(name)
            .bind(surname)
            .bind(id)
            .fetch_one(&self.pool)
            .await?
        } else {
            sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM authors WHERE name = $1 AND surname = $2)",
            )
            .bind(name)
            .bind(surname)
            .fetch_one(&self.pool)
            .await?
        };
        Ok(exists)
    }

    /// Return the subset of the given ids that exist
    pub async fn filter_existing_ids(&self, ids: &[i32]) -> AppResult<Vec<i32>> {
        let existing = sqlx::query_scalar::<_, i32>("SELECT id FROM authors WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(existing)
    }

    /// Create a new author
    pub async fn create(&self, author: &CreateAuthor) -> AppResult<Author> {
        let now = Utc::now();

        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO authors (name, surname, email, phone, fb_name, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(&author.name)
        .bind(&author.surname)
        .bind(&author.email)
        .bind(author.phone)
        .bind(&author.fb_name)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, NAME_SURNAME_CONSTRAINT, NAME_SURNAME_TAKEN))?;

        self.get_by_id(id).await
    }

    /// Replace all fields of an existing author, leaving the image untouched
    pub async fn update_full(&self, id: i32, author: &CreateAuthor) -> AppResult<Author> {
        let now = Utc::now();

        sqlx::query(
            r#"
            UPDATE authors
            SET name = $1, surname = $2, email = $3, phone = $4, fb_name = $5, updated_at = $6
            WHERE id = $7
            "#,
        )
        .bind(&author.name)
        .bind(&author.surname)
        .bind(&author.email)
        .bind(author.phone)
        .bind(&author.fb_name)
        .bind(now)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, NAME_SURNAME_CONSTRAINT, NAME_SURNAME_TAKEN))?;

        self.get_by_id(id).await
    }

    /// Update only the supplied fields of an existing author
    pub async fn update_partial(&self, id: i32, author: &UpdateAuthor) -> AppResult<Author> {
        let now = Utc::now();

        sqlx::query(
            r#"
            UPDATE authors
            SET name = COALESCE($1, name),
                surname = COALESCE($2, surname),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                fb_name = COALESCE($5, fb_name),
                updated_at = $6
            WHERE id = $7
            "#,
        )
        .bind(&author.name)
        .bind(&author.surname)
        .bind(&author.email)
        .bind(author.phone)
        .bind(&author.fb_name)
        .bind(now)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, NAME_SURNAME_CONSTRAINT, NAME_SURNAME_TAKEN))?;

        self.get_by_id(id).await
    }

    /// Record the stored image reference on an author
    pub async fn set_image(&self, id: i32, image: &str) -> AppResult<AuthorImage> {
        let now = Utc::now();

        sqlx::query("UPDATE authors SET image = $1, updated_at = $2 WHERE id = $3")
            .bind(image)
            .bind(now)
            .bind(id)
            .execute(&self.pool)
            .await?;

        let row = sqlx::query_as::<_, AuthorImage>("SELECT id, image FROM authors WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Author with id {} not found", id)))?;

        Ok(row)
    }

    /// Delete an author; join table rows are removed by cascade
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

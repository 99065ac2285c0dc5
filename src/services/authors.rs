//! Authors service

use std::sync::Arc;

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::author::{Author, AuthorImage, CreateAuthor, UpdateAuthor},
    repository::Repository,
    services::assets::{detect_image_format, AssetStore},
};

#[derive(Clone)]
pub struct AuthorsService {
    repository: Repository,
    assets: Arc<dyn AssetStore>,
}

impl AuthorsService {
    pub fn new(repository: Repository, assets: Arc<dyn AssetStore>) -> Self {
        Self { repository, assets }
    }

    /// List authors, filtered by the search term when present
    pub async fn list(&self, search: Option<&str>) -> AppResult<Vec<Author>> {
        let term = search.map(str::trim).filter(|t| !t.is_empty());
        self.repository.authors.list(term).await
    }

    /// Get author by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Author> {
        self.repository.authors.get_by_id(id).await
    }

    /// Create a new author
    pub async fn create(&self, author: CreateAuthor) -> AppResult<Author> {
        author.validate()?;

        if self
            .repository
            .authors
            .name_pair_exists(&author.name, &author.surname, None)
            .await?
        {
            return Err(AppError::Validation(
                "Author with this name and surname already exists".to_string(),
            ));
        }

        self.repository.authors.create(&author).await
    }

    /// Replace all fields of an existing author
    pub async fn update(&self, id: i32, author: CreateAuthor) -> AppResult<Author> {
        author.validate()?;

        self.repository.authors.get_by_id(id).await?;

        if self
            .repository
            .authors
            .name_pair_exists(&author.name, &author.surname, Some(id))
            .await?
        {
            return Err(AppError::Validation(
                "Author with this name and surname already exists".to_string(),
            ));
        }

        self.repository.authors.update_full(id, &author).await
    }

    /// Update only the supplied fields of an existing author
    pub async fn update_partial(&self, id: i32, author: UpdateAuthor) -> AppResult<Author> {
        author.validate()?;

        let current = self.repository.authors.get_by_id(id).await?;

        // Re-check uniqueness for the pair that would result from the patch
        if author.name.is_some() || author.surname.is_some() {
            let name = author.name.as_deref().unwrap_or(&current.name);
            let surname = author.surname.as_deref().unwrap_or(&current.surname);
            if self
                .repository
                .authors
                .name_pair_exists(name, surname, Some(id))
                .await?
            {
                return Err(AppError::Validation(
                    "Author with this name and surname already exists".to_string(),
                ));
            }
        }

        self.repository.authors.update_partial(id, &author).await
    }

    /// Delete an author
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.authors.get_by_id(id).await?;
        self.repository.authors.delete(id).await
    }

    /// Validate and store an uploaded image, then record its reference
    /// on the author. A previously stored image is left in place.
    pub async fn upload_image(&self, id: i32, bytes: &[u8]) -> AppResult<AuthorImage> {
        self.repository.authors.get_by_id(id).await?;

        if detect_image_format(bytes).is_none() {
            return Err(AppError::Validation(
                "Upload a valid image. The file you uploaded was either not an image or a corrupted image".to_string(),
            ));
        }

        let image = self.assets.store(bytes).await?;
        self.repository.authors.set_image(id, &image).await
    }
}

//! Author endpoints

use axum::{
    body::Bytes,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::{
        author::{Author, AuthorImage, CreateAuthor, UpdateAuthor},
        SearchQuery,
    },
};

use super::{AppJson, AuthenticatedAccount};

/// List authors with optional search
#[utoipa::path(
    get,
    path = "/v1/author",
    tag = "authors",
    params(
        ("search" = Option<String>, Query, description = "Search in name, surname and email")
    ),
    responses(
        (status = 200, description = "List of authors", body = Vec<Author>)
    )
)]
pub async fn list_authors(
    State(state): State<crate::AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<Author>>> {
    let authors = state.services.authors.list(query.search.as_deref()).await?;
    Ok(Json(authors))
}

/// Get author details by ID
#[utoipa::path(
    get,
    path = "/v1/author/{id}",
    tag = "authors",
    params(
        ("id" = i32, Path, description = "Author ID")
    ),
    responses(
        (status = 200, description = "Author details", body = Author),
        (status = 404, description = "Author not found")
    )
)]
pub async fn get_author(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Author>> {
    let author = state.services.authors.get_by_id(id).await?;
    Ok(Json(author))
}

/// Create a new author
#[utoipa::path(
    post,
    path = "/v1/author",
    tag = "authors",
    security(("bearer_auth" = [])),
    request_body = CreateAuthor,
    responses(
        (status = 201, description = "Author created", body = Author),
        (status = 400, description = "Invalid input or duplicate name/surname"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn create_author(
    State(state): State<crate::AppState>,
    AuthenticatedAccount(_claims): AuthenticatedAccount,
    AppJson(author): AppJson<CreateAuthor>,
) -> AppResult<(StatusCode, Json<Author>)> {
    let created = state.services.authors.create(author).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Replace an existing author
#[utoipa::path(
    put,
    path = "/v1/author/{id}",
    tag = "authors",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Author ID")
    ),
    request_body = CreateAuthor,
    responses(
        (status = 200, description = "Author updated", body = Author),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Author not found")
    )
)]
pub async fn update_author(
    State(state): State<crate::AppState>,
    AuthenticatedAccount(_claims): AuthenticatedAccount,
    Path(id): Path<i32>,
    AppJson(author): AppJson<CreateAuthor>,
) -> AppResult<Json<Author>> {
    let updated = state.services.authors.update(id, author).await?;
    Ok(Json(updated))
}

/// Partially update an existing author
#[utoipa::path(
    patch,
    path = "/v1/author/{id}",
    tag = "authors",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Author ID")
    ),
    request_body = UpdateAuthor,
    responses(
        (status = 200, description = "Author updated", body = Author),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Author not found")
    )
)]
pub async fn patch_author(
    State(state): State<crate::AppState>,
    AuthenticatedAccount(_claims): AuthenticatedAccount,
    Path(id): Path<i32>,
    AppJson(author): AppJson<UpdateAuthor>,
) -> AppResult<Json<Author>> {
    let updated = state.services.authors.update_partial(id, author).await?;
    Ok(Json(updated))
}

/// Delete an author
#[utoipa::path(
    delete,
    path = "/v1/author/{id}",
    tag = "authors",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Author ID")
    ),
    responses(
        (status = 204, description = "Author deleted"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Author not found")
    )
)]
pub async fn delete_author(
    State(state): State<crate::AppState>,
    AuthenticatedAccount(_claims): AuthenticatedAccount,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.authors.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Multipart form for image upload
#[derive(ToSchema)]
pub struct UploadImageForm {
    /// Image file content
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
}

/// Upload a portrait image for an author
#[utoipa::path(
    post,
    path = "/v1/author/{id}/upload-image",
    tag = "authors",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Author ID")
    ),
    request_body(content = UploadImageForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Image stored", body = AuthorImage),
        (status = 400, description = "Payload is not a supported image"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Author not found")
    )
)]
pub async fn upload_author_image(
    State(state): State<crate::AppState>,
    AuthenticatedAccount(_claims): AuthenticatedAccount,
    Path(id): Path<i32>,
    mut multipart: Multipart,
) -> AppResult<Json<AuthorImage>> {
    let mut image: Option<Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart payload: {}", e)))?
    {
        if field.name() == Some("image") {
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read image field: {}", e)))?;
            image = Some(data);
        }
    }

    let image = image.ok_or_else(|| AppError::Validation("No image field provided".to_string()))?;

    let updated = state.services.authors.upload_image(id, &image).await?;
    Ok(Json(updated))
}

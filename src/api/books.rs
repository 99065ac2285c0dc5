//! Book endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        book::{Book, CreateBook, UpdateBook},
        SearchQuery,
    },
};

use super::{AppJson, AuthenticatedAccount};

/// List books with optional search
#[utoipa::path(
    get,
    path = "/v1/books",
    tag = "books",
    params(
        ("search" = Option<String>, Query, description = "Search in title, author name, pages and release date")
    ),
    responses(
        (status = 200, description = "List of books", body = Vec<Book>)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.books.list(query.search.as_deref()).await?;
    Ok(Json(books))
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/v1/books/{id}",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Book>> {
    let book = state.services.books.get_by_id(id).await?;
    Ok(Json(book))
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/v1/books",
    tag = "books",
    security(("bearer_auth" = [])),
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid input, duplicate title or unknown author id"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    AuthenticatedAccount(_claims): AuthenticatedAccount,
    AppJson(book): AppJson<CreateBook>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let created = state.services.books.create(book).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Replace an existing book
#[utoipa::path(
    put,
    path = "/v1/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    request_body = CreateBook,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    AuthenticatedAccount(_claims): AuthenticatedAccount,
    Path(id): Path<i32>,
    AppJson(book): AppJson<CreateBook>,
) -> AppResult<Json<Book>> {
    let updated = state.services.books.update(id, book).await?;
    Ok(Json(updated))
}

/// Partially update an existing book
#[utoipa::path(
    patch,
    path = "/v1/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn patch_book(
    State(state): State<crate::AppState>,
    AuthenticatedAccount(_claims): AuthenticatedAccount,
    Path(id): Path<i32>,
    AppJson(book): AppJson<UpdateBook>,
) -> AppResult<Json<Book>> {
    let updated = state.services.books.update_partial(id, book).await?;
    Ok(Json(updated))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/v1/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    AuthenticatedAccount(_claims): AuthenticatedAccount,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.books.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

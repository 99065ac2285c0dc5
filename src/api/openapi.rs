//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{accounts, authors, books, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Folia API",
        version = "1.0.0",
        description = "Library Catalog REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Authors
        authors::list_authors,
        authors::get_author,
        authors::create_author,
        authors::update_author,
        authors::patch_author,
        authors::delete_author,
        authors::upload_author_image,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::patch_book,
        books::delete_book,
        // Accounts
        accounts::register,
        accounts::token,
    ),
    components(
        schemas(
            // Authors
            crate::models::author::Author,
            crate::models::author::AuthorImage,
            crate::models::author::CreateAuthor,
            crate::models::author::UpdateAuthor,
            authors::UploadImageForm,
            // Books
            crate::models::book::Book,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            // Accounts
            crate::models::account::AccountResponse,
            crate::models::account::RegisterAccount,
            crate::models::account::Credentials,
            crate::models::account::TokenResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "authors", description = "Author catalog management"),
        (name = "books", description = "Book catalog management"),
        (name = "accounts", description = "Account registration and tokens")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

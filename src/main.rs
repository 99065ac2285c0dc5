//! Folia Server - Library Catalog Backend
//!
//! A Rust REST API server for managing a catalog of authors and books.

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folia_server::{
    api,
    config::AppConfig,
    repository::Repository,
    services::Services,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("folia_server={},tower_http=debug", config.logging.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Folia Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository, &config);

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Versioned resource routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Authors
        .route("/author", get(api::authors::list_authors))
        .route("/author", post(api::authors::create_author))
        .route("/author/:id", get(api::authors::get_author))
        .route("/author/:id", put(api::authors::update_author))
        .route("/author/:id", patch(api::authors::patch_author))
        .route("/author/:id", delete(api::authors::delete_author))
        .route("/author/:id/upload-image", post(api::authors::upload_author_image))
        // Books
        .route("/books", get(api::books::list_books))
        .route("/books", post(api::books::create_book))
        .route("/books/:id", get(api::books::get_book))
        .route("/books/:id", put(api::books::update_book))
        .route("/books/:id", patch(api::books::patch_book))
        .route("/books/:id", delete(api::books::delete_book))
        .with_state(state.clone());

    // Account routes live at the root, outside the versioned scope
    let accounts = Router::new()
        .route("/create", post(api::accounts::register))
        .route("/token", post(api::accounts::token))
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/v1", api_v1)
        .merge(accounts)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

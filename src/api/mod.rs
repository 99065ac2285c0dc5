//! API handlers for Folia REST endpoints

pub mod accounts;
pub mod authors;
pub mod books;
pub mod health;
pub mod openapi;

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Request},
    http::{header::AUTHORIZATION, request::Parts},
    Json,
};

use crate::{error::AppError, models::account::AccountClaims, AppState};

/// Json body extractor that reports a missing, mistyped or unparsable
/// body as a 400 validation failure instead of axum's default 422.
pub struct AppJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;

        Ok(AppJson(value))
    }
}

/// Extractor for authenticated account from JWT token.
/// Write handlers take this; read handlers stay open.
pub struct AuthenticatedAccount(pub AccountClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedAccount {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        // Get the Authorization header
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

        // Check for Bearer token
        if !auth_header.starts_with("Bearer ") {
            return Err(AppError::Authentication("Invalid authorization header format".to_string()));
        }

        let token = &auth_header[7..];

        // Validate JWT token using the secret from configuration
        let claims = AccountClaims::from_token(token, &state.config.auth.jwt_secret)
            .map_err(|e| AppError::Authentication(e.to_string()))?;

        Ok(AuthenticatedAccount(claims))
    }
}

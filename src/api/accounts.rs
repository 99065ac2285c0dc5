//! Account registration and token endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::AppResult,
    models::account::{AccountResponse, Credentials, RegisterAccount, TokenResponse},
};

use super::AppJson;

/// Register a new account
#[utoipa::path(
    post,
    path = "/create",
    tag = "accounts",
    request_body = RegisterAccount,
    responses(
        (status = 201, description = "Account created", body = AccountResponse),
        (status = 400, description = "Invalid input or username already taken")
    )
)]
pub async fn register(
    State(state): State<crate::AppState>,
    AppJson(account): AppJson<RegisterAccount>,
) -> AppResult<(StatusCode, Json<AccountResponse>)> {
    let created = state.services.accounts.register(account).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Issue a bearer token for valid credentials
#[utoipa::path(
    post,
    path = "/token",
    tag = "accounts",
    request_body = Credentials,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Invalid credentials")
    )
)]
pub async fn token(
    State(state): State<crate::AppState>,
    AppJson(credentials): AppJson<Credentials>,
) -> AppResult<Json<TokenResponse>> {
    let token = state.services.accounts.issue_token(&credentials).await?;
    Ok(Json(TokenResponse { token }))
}

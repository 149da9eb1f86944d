use axum::{Json, Router, extract::State, routing::post};

use crate::{
    dto::auth::{LoginRequest, RegisterRequest, TokenResponse},
    error::AppError,
    services::auth_service,
    state::SharedState,
};

/// Account routes, exempt from the admin guard.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

/// Create an account and return its first session token.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account created", body = TokenResponse),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn register(
    State(state): State<SharedState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    Ok(Json(auth_service::register(&state, payload).await?))
}

/// Exchange credentials for a session token.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login succeeded", body = TokenResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<SharedState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    Ok(Json(auth_service::login(&state, payload).await?))
}

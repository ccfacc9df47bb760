//! Authentication routes for register, login, token refresh, and the
//! current-user lookup.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;
use tracing::{error, info};

use crate::{AppState, middleware::AuthUser};
use moneta_core::auth::{hash_password, verify_password};
use moneta_db::UserRepository;
use moneta_shared::auth::{
    AuthResponse, LoginRequest, RefreshRequest, RegisterRequest, UserInfo,
};

/// Creates the public auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
}

/// Creates the auth routes that require an authenticated caller.
pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/auth/me", get(me))
}

/// POST /auth/register - Create a user with default accounts and
/// categories, returning tokens.
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> impl IntoResponse {
    if payload.name.trim().is_empty()
        || payload.email.trim().is_empty()
        || payload.password.is_empty()
    {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_input",
                "message": "Name, email, and password are required"
            })),
        )
            .into_response();
    }

    let user_repo = UserRepository::new((*state.db).clone());

    match user_repo.email_exists(&payload.email).await {
        Ok(true) => {
            return (
                StatusCode::CONFLICT,
                Json(json!({
                    "error": "email_exists",
                    "message": "An account with this email already exists"
                })),
            )
                .into_response();
        }
        Ok(false) => {}
        Err(e) => {
            error!(error = %e, "Database error checking email");
            return internal_error("An error occurred during registration");
        }
    }

    let password_hash = match hash_password(&payload.password) {
        Ok(h) => h,
        Err(e) => {
            error!(error = %e, "Failed to hash password");
            return internal_error("An error occurred during registration");
        }
    };

    let user = match user_repo
        .create_with_defaults(&payload.name, &payload.email, &password_hash)
        .await
    {
        Ok(u) => u,
        Err(e) => {
            error!(error = %e, "Failed to create user");
            return internal_error("An error occurred during registration");
        }
    };

    info!(user_id = %user.id, email = %user.email, "New user registered");

    let (access_token, refresh_token) = match issue_tokens(&state, user.id) {
        Ok(pair) => pair,
        Err(response) => return response,
    };

    (
        StatusCode::CREATED,
        Json(AuthResponse {
            user: UserInfo {
                id: user.id,
                name: user.name,
                email: user.email,
            },
            access_token,
            refresh_token,
            expires_in: state.jwt_service.access_ttl_seconds(),
        }),
    )
        .into_response()
}

/// POST /auth/login - Authenticate a user and return tokens.
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    let user_repo = UserRepository::new((*state.db).clone());

    let user = match user_repo.find_by_email(&payload.email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            info!(email = %payload.email, "Login attempt for unknown email");
            return invalid_credentials();
        }
        Err(e) => {
            error!(error = %e, "Database error during login");
            return internal_error("An error occurred during login");
        }
    };

    match verify_password(&payload.password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            info!(user_id = %user.id, "Failed login attempt");
            return invalid_credentials();
        }
        Err(e) => {
            error!(error = %e, "Password verification error");
            return internal_error("An error occurred during login");
        }
    }

    let (access_token, refresh_token) = match issue_tokens(&state, user.id) {
        Ok(pair) => pair,
        Err(response) => return response,
    };

    info!(user_id = %user.id, "User logged in");

    (
        StatusCode::OK,
        Json(AuthResponse {
            user: UserInfo {
                id: user.id,
                name: user.name,
                email: user.email,
            },
            access_token,
            refresh_token,
            expires_in: state.jwt_service.access_ttl_seconds(),
        }),
    )
        .into_response()
}

/// POST /auth/refresh - Issue a new access token from a refresh token.
async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> impl IntoResponse {
    let claims = match state.jwt_service.decode_token(&payload.refresh_token) {
        Ok(c) => c,
        Err(e) => {
            let (error, message) = match e {
                moneta_shared::JwtError::Expired => {
                    ("token_expired", "Refresh token has expired")
                }
                _ => ("invalid_token", "Invalid refresh token"),
            };
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": error, "message": message })),
            )
                .into_response();
        }
    };

    let access_token = match state.jwt_service.issue_access_token(claims.user_id()) {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "Failed to issue access token");
            return internal_error("An error occurred during token refresh");
        }
    };

    (
        StatusCode::OK,
        Json(json!({
            "access_token": access_token,
            "expires_in": state.jwt_service.access_ttl_seconds()
        })),
    )
        .into_response()
}

/// GET /auth/me - Return the authenticated user.
async fn me(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let user_repo = UserRepository::new((*state.db).clone());

    match user_repo.find_by_id(auth.user_id()).await {
        Ok(Some(user)) => (
            StatusCode::OK,
            Json(UserInfo {
                id: user.id,
                name: user.name,
                email: user.email,
            }),
        )
            .into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "user_not_found",
                "message": "User no longer exists"
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Database error loading user");
            internal_error("An error occurred")
        }
    }
}

fn issue_tokens(
    state: &AppState,
    user_id: uuid::Uuid,
) -> Result<(String, String), axum::response::Response> {
    let access_token = state.jwt_service.issue_access_token(user_id).map_err(|e| {
        error!(error = %e, "Failed to issue access token");
        internal_error("An error occurred issuing tokens")
    })?;
    let refresh_token = state
        .jwt_service
        .issue_refresh_token(user_id)
        .map_err(|e| {
            error!(error = %e, "Failed to issue refresh token");
            internal_error("An error occurred issuing tokens")
        })?;
    Ok((access_token, refresh_token))
}

fn invalid_credentials() -> axum::response::Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": "invalid_credentials",
            "message": "Invalid email or password"
        })),
    )
        .into_response()
}

fn internal_error(message: &str) -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "internal_error",
            "message": message
        })),
    )
        .into_response()
}

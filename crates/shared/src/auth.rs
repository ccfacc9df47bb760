//! Wire types for the auth endpoints.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body of `POST /api/v1/auth/register`.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    /// Display name for the new user.
    pub name: String,
    /// Email address, used as the login identifier.
    pub email: String,
    /// Plaintext password; hashed before storage.
    pub password: String,
}

/// Body of `POST /api/v1/auth/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// Email address the account was registered with.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// Body of `POST /api/v1/auth/refresh`.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshRequest {
    /// A refresh token from an earlier login or registration.
    pub refresh_token: String,
}

/// The authenticated user, as embedded in token responses and returned
/// by `GET /api/v1/auth/me`.
#[derive(Debug, Clone, Serialize)]
pub struct UserInfo {
    /// User ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
}

/// Token bundle returned by register and login.
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    /// The user the tokens belong to.
    pub user: UserInfo,
    /// Short-lived bearer token for API calls.
    pub access_token: String,
    /// Long-lived token for `POST /api/v1/auth/refresh`.
    pub refresh_token: String,
    /// Seconds until `access_token` expires.
    pub expires_in: i64,
}

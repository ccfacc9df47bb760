//! Bearer-token authentication for the protected API surface.

use axum::{
    Json,
    extract::{FromRequestParts, Request, State},
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::AppState;
use moneta_shared::{Claims, JwtError};

/// Splits an `Authorization` header value into scheme and token,
/// accepting any casing of `Bearer`.
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.split_once(' ')?;
    if scheme.eq_ignore_ascii_case("bearer") {
        Some(token.trim())
    } else {
        None
    }
}

fn unauthorized(error: &str, message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": error, "message": message })),
    )
        .into_response()
}

/// Requires a valid access token on every request it wraps.
///
/// On success the decoded [`Claims`] are stashed in request extensions,
/// where [`AuthUser`] picks them up.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_token);

    let Some(token) = token else {
        return unauthorized(
            "missing_token",
            "Authorization header with Bearer token is required",
        );
    };

    match state.jwt_service.decode_token(token) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(JwtError::Expired) => unauthorized("token_expired", "Token has expired"),
        Err(_) => unauthorized("invalid_token", "Invalid or malformed token"),
    }
}

/// Claims of the caller, extracted from request extensions.
///
/// Handlers behind [`auth_middleware`] take this as an argument:
///
/// ```ignore
/// async fn handler(auth: AuthUser) -> impl IntoResponse {
///     let user_id = auth.user_id();
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// ID of the authenticated user.
    #[must_use]
    pub const fn user_id(&self) -> uuid::Uuid {
        self.0.user_id()
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| unauthorized("unauthorized", "Authentication required"))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::bearer_token;

    #[rstest]
    #[case("Bearer abc123", Some("abc123"))]
    #[case("bearer abc123", Some("abc123"))]
    #[case("BEARER abc123", Some("abc123"))]
    #[case("Bearer  abc123", Some("abc123"))]
    #[case("Basic dXNlcjpwYXNz", None)]
    #[case("abc123", None)]
    #[case("", None)]
    fn bearer_token_parsing(#[case] header: &str, #[case] expected: Option<&str>) {
        assert_eq!(bearer_token(header), expected);
    }
}

//! Bearer-token issuance and verification.
//!
//! Access and refresh tokens carry the same claim shape and are signed
//! with the same secret; they differ only in lifetime.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Claims embedded in every Moneta token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: Uuid,
    /// Issued-at, unix seconds.
    pub iat: i64,
    /// Expiry, unix seconds.
    pub exp: i64,
}

impl Claims {
    /// The user this token was issued for.
    #[must_use]
    pub const fn user_id(&self) -> Uuid {
        self.sub
    }
}

/// Errors from token issuance or verification.
#[derive(Debug, Error)]
pub enum JwtError {
    /// Signing the claims failed.
    #[error("token signing failed: {0}")]
    Sign(String),

    /// The token was valid once but its expiry has passed.
    #[error("token has expired")]
    Expired,

    /// Malformed, tampered with, or signed with a different secret.
    #[error("token rejected: {0}")]
    Verify(String),
}

/// Issues and verifies the API's bearer tokens.
///
/// Signing keys are derived from the shared secret once, at construction.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Keys are deliberately omitted.
        f.debug_struct("JwtService")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish_non_exhaustive()
    }
}

impl JwtService {
    /// Builds a service from the signing secret and token lifetimes.
    #[must_use]
    pub fn new(secret: &str, access_minutes: i64, refresh_days: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_ttl: Duration::minutes(access_minutes),
            refresh_ttl: Duration::days(refresh_days),
        }
    }

    /// Issues a short-lived access token for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`JwtError::Sign`] if signing fails.
    pub fn issue_access_token(&self, user_id: Uuid) -> Result<String, JwtError> {
        self.issue(user_id, self.access_ttl)
    }

    /// Issues a long-lived refresh token for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`JwtError::Sign`] if signing fails.
    pub fn issue_refresh_token(&self, user_id: Uuid) -> Result<String, JwtError> {
        self.issue(user_id, self.refresh_ttl)
    }

    fn issue(&self, user_id: Uuid, ttl: Duration) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::Sign(e.to_string()))
    }

    /// Checks a token's signature and expiry and returns its claims.
    ///
    /// # Errors
    ///
    /// Returns [`JwtError::Expired`] for an outdated token and
    /// [`JwtError::Verify`] for anything else that fails validation.
    pub fn decode_token(&self, token: &str) -> Result<Claims, JwtError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
                _ => JwtError::Verify(e.to_string()),
            })
    }

    /// Access token lifetime in seconds, for `expires_in` response fields.
    #[must_use]
    pub const fn access_ttl_seconds(&self) -> i64 {
        self.access_ttl.num_seconds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new("unit-test-secret", 15, 7)
    }

    #[test]
    fn access_token_round_trips_claims() {
        let svc = service();
        let user_id = Uuid::new_v4();

        let token = svc.issue_access_token(user_id).unwrap();
        let claims = svc.decode_token(&token).unwrap();

        assert_eq!(claims.user_id(), user_id);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn refresh_token_outlives_access_token() {
        let svc = service();
        let user_id = Uuid::new_v4();

        let access = svc
            .decode_token(&svc.issue_access_token(user_id).unwrap())
            .unwrap();
        let refresh = svc
            .decode_token(&svc.issue_refresh_token(user_id).unwrap())
            .unwrap();

        assert!(refresh.exp > access.exp);
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        // Negative lifetime puts the expiry in the past, beyond the
        // default validation leeway.
        let svc = JwtService::new("unit-test-secret", -5, 7);
        let token = svc.issue_access_token(Uuid::new_v4()).unwrap();

        assert!(matches!(svc.decode_token(&token), Err(JwtError::Expired)));
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(matches!(
            service().decode_token("not.a.token"),
            Err(JwtError::Verify(_))
        ));
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let theirs = JwtService::new("some-other-secret", 15, 7);
        let token = theirs.issue_access_token(Uuid::new_v4()).unwrap();

        assert!(matches!(
            service().decode_token(&token),
            Err(JwtError::Verify(_))
        ));
    }
}

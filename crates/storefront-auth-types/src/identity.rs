//! `Authorization` header extractor.

use std::fmt;
use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts};
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use http::header::AUTHORIZATION;
use http::request::Parts;
use uuid::Uuid;

use crate::token::validate_token;

/// HMAC secret used to sign and verify session tokens.
#[derive(Clone)]
pub struct JwtSecret(Arc<str>);

impl JwtSecret {
    pub fn new(secret: impl Into<Arc<str>>) -> Self {
        Self(secret.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for JwtSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("JwtSecret(..)")
    }
}

/// Rejection for any request without a usable session token.
///
/// Missing header, malformed token, wrong signature and expiry all map here
/// without distinction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidToken;

impl InvalidToken {
    pub const KIND: &'static str = "INVALID_TOKEN";
    pub const MESSAGE: &'static str = "Invalid or expired token";
}

impl IntoResponse for InvalidToken {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "success": false,
            "kind": Self::KIND,
            "message": Self::MESSAGE,
        });
        (StatusCode::UNAUTHORIZED, axum::Json(body)).into_response()
    }
}

/// Caller identity taken from the raw JWT in the `Authorization` header.
///
/// The header value is the token itself; no `Bearer ` prefix is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignedInUser {
    pub user_id: Uuid,
}

impl<S> FromRequestParts<S> for SignedInUser
where
    S: Send + Sync,
    JwtSecret: FromRef<S>,
{
    type Rejection = InvalidToken;

    // Validation is synchronous; resolve it up front and hand back a 'static future.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let secret = JwtSecret::from_ref(state);
        let result = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(InvalidToken)
            .and_then(|raw| {
                validate_token(raw, secret.as_str()).map_err(|e| {
                    tracing::debug!(error = %e, "rejected session token");
                    InvalidToken
                })
            })
            .map(|info| SignedInUser {
                user_id: info.user_id,
            });

        async move { result }
    }
}

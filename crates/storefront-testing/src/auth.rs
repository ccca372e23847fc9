//! Signed `Authorization` headers for integration tests.
//!
//! Handlers behind `SignedInUser` expect the raw JWT in the `Authorization`
//! header. `MockAuth` signs a real token with the test secret so requests go
//! through the same validation path as production traffic.

use axum::http::{HeaderName, HeaderValue, header::AUTHORIZATION};
use uuid::Uuid;

use storefront_auth_types::token::issue_token;

/// Secret shared between the test app state and [`MockAuth`].
pub const TEST_JWT_SECRET: &str = "test-jwt-secret-for-integration-tests";

/// Configurable identity injected into test requests.
pub struct MockAuth {
    pub user_id: Uuid,
    secret: String,
}

impl MockAuth {
    pub fn new(user_id: Uuid) -> Self {
        Self::with_secret(user_id, TEST_JWT_SECRET)
    }

    pub fn with_secret(user_id: Uuid, secret: &str) -> Self {
        Self {
            user_id,
            secret: secret.to_owned(),
        }
    }

    /// A freshly signed token for this identity.
    pub fn token(&self) -> String {
        let (token, _) = issue_token(self.user_id, &self.secret).expect("sign test token");
        token
    }

    /// `Authorization` header carrying the raw token.
    pub fn header(&self) -> (HeaderName, HeaderValue) {
        let value = HeaderValue::from_str(&self.token()).expect("token is a valid header value");
        (AUTHORIZATION, value)
    }
}

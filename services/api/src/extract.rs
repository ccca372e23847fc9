//! Request extractors that need the service's own state.

use axum::extract::{FromRequest, FromRequestParts};
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use uuid::Uuid;

use storefront_auth_types::identity::SignedInUser;

use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::auth::AuthorizeAdminUseCase;

/// A signed-in caller whose account currently has the admin role.
///
/// The role is read from the database on every request, so a demotion takes
/// effect without waiting for the token to expire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminUser {
    pub user_id: Uuid,
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let signed_in = SignedInUser::from_request_parts(parts, state).await?;
        let usecase = AuthorizeAdminUseCase {
            repo: state.user_repo(),
        };
        let user = usecase.execute(signed_in.user_id).await?;
        Ok(AdminUser { user_id: user.id })
    }
}

/// `axum::Json` whose body rejections render as the API failure envelope.
#[derive(Debug, Clone, Copy, Default, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

pub mod auth;
pub mod cart;
pub mod category;
pub mod order;
pub mod payment;
pub mod product;
pub mod view;

use uuid::Uuid;

use crate::error::ApiError;

/// Parse an id taken from the path. Malformed ids never reach the database.
pub(crate) fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::validation(format!("Invalid id: {raw}")))
}

#[derive(serde::Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub const fn ok() -> Self {
        Self { ok: true }
    }
}

#[derive(serde::Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: &'static str,
}

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use storefront_auth_types::identity::InvalidToken;
use storefront_core::error::error_response;

/// Storefront API error variants.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Request failed input validation; the message is shown to the client.
    #[error("{0}")]
    Validation(String),
    #[error("category does not exist")]
    InvalidCategory,
    #[error("Invalid Password")]
    InvalidCredentials,
    #[error("Invalid or expired token")]
    InvalidToken,
    #[error("unauthorized access")]
    NotAdmin,
    #[error("{0}")]
    PaymentDeclined(String),
    #[error("Email is not registered")]
    EmailNotRegistered,
    #[error("Wrong Email Or Answer")]
    WrongEmailOrAnswer,
    #[error("user not found")]
    UserNotFound,
    #[error("category not found")]
    CategoryNotFound,
    #[error("product not found")]
    ProductNotFound,
    #[error("photo not found")]
    PhotoNotFound,
    #[error("order not found")]
    OrderNotFound,
    #[error("Already registered, please login")]
    EmailAlreadyRegistered,
    #[error("Category Already Exists")]
    CategoryAlreadyExists,
    #[error("Product Already Exists")]
    ProductAlreadyExists,
    #[error("category still has products")]
    CategoryInUse,
    #[error("payment already in progress")]
    PaymentInProgress,
    #[error("payment gateway unavailable")]
    Gateway(#[source] anyhow::Error),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "INVALID_INPUT",
            Self::InvalidCategory => "INVALID_CATEGORY",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidToken => InvalidToken::KIND,
            Self::NotAdmin => "NOT_ADMIN",
            Self::PaymentDeclined(_) => "PAYMENT_DECLINED",
            Self::EmailNotRegistered => "EMAIL_NOT_REGISTERED",
            Self::WrongEmailOrAnswer => "WRONG_EMAIL_OR_ANSWER",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::CategoryNotFound => "CATEGORY_NOT_FOUND",
            Self::ProductNotFound => "PRODUCT_NOT_FOUND",
            Self::PhotoNotFound => "PHOTO_NOT_FOUND",
            Self::OrderNotFound => "ORDER_NOT_FOUND",
            Self::EmailAlreadyRegistered => "EMAIL_ALREADY_REGISTERED",
            Self::CategoryAlreadyExists => "CATEGORY_ALREADY_EXISTS",
            Self::ProductAlreadyExists => "PRODUCT_ALREADY_EXISTS",
            Self::CategoryInUse => "CATEGORY_IN_USE",
            Self::PaymentInProgress => "PAYMENT_IN_PROGRESS",
            Self::Gateway(_) => "PAYMENT_GATEWAY",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidCategory => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials | Self::InvalidToken | Self::NotAdmin => {
                StatusCode::UNAUTHORIZED
            }
            Self::PaymentDeclined(_) => StatusCode::PAYMENT_REQUIRED,
            Self::EmailNotRegistered
            | Self::WrongEmailOrAnswer
            | Self::UserNotFound
            | Self::CategoryNotFound
            | Self::ProductNotFound
            | Self::PhotoNotFound
            | Self::OrderNotFound => StatusCode::NOT_FOUND,
            Self::EmailAlreadyRegistered
            | Self::CategoryAlreadyExists
            | Self::ProductAlreadyExists
            | Self::CategoryInUse
            | Self::PaymentInProgress => StatusCode::CONFLICT,
            Self::Gateway(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<InvalidToken> for ApiError {
    fn from(_: InvalidToken) -> Self {
        Self::InvalidToken
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Internal(e) => tracing::error!(error = ?e, kind = "INTERNAL", "internal error"),
            Self::Gateway(e) => {
                tracing::error!(error = ?e, kind = "PAYMENT_GATEWAY", "payment gateway error")
            }
            _ => {}
        }
        error_response(self.status(), self.kind(), &self.to_string())
    }
}

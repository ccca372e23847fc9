use axum::{
    extract::State,
    http::{HeaderMap, HeaderName},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_auth_types::identity::SignedInUser;
use storefront_domain::cart::Cart;

use crate::error::ApiError;
use crate::extract::Json;
use crate::state::AppState;
use crate::usecase::payment::{CheckoutInput, CheckoutUseCase, ClientTokenUseCase};

pub const IDEMPOTENCY_KEY: HeaderName = HeaderName::from_static("idempotency-key");

// ── GET /product/braintree/token ─────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientTokenResponse {
    pub success: bool,
    pub client_token: String,
}

pub async fn client_token(
    State(state): State<AppState>,
) -> Result<Json<ClientTokenResponse>, ApiError> {
    let usecase = ClientTokenUseCase {
        gateway: state.gateway.clone(),
    };
    let client_token = usecase.execute().await?;
    Ok(Json(ClientTokenResponse {
        success: true,
        client_token,
    }))
}

// ── POST /product/braintree/payment ──────────────────────────────────────────

#[derive(Deserialize)]
pub struct PaymentRequest {
    #[serde(default)]
    pub nonce: String,
    #[serde(default)]
    pub cart: Cart,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub ok: bool,
    pub order_id: Uuid,
}

pub async fn checkout(
    user: SignedInUser,
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<PaymentRequest>,
) -> Result<Json<PaymentResponse>, ApiError> {
    let idempotency_key = headers
        .get(IDEMPOTENCY_KEY)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let usecase = CheckoutUseCase {
        gateway: state.gateway.clone(),
        orders: state.order_repo(),
        attempts: state.payment_attempt_repo(),
        carts: state.cart_repo(),
    };
    let order_id = usecase
        .execute(
            user.user_id,
            CheckoutInput {
                nonce: body.nonce,
                cart: body.cart,
                idempotency_key,
            },
        )
        .await?;
    Ok(Json(PaymentResponse { ok: true, order_id }))
}

use axum::extract::{Path, State};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_auth_types::identity::SignedInUser;
use storefront_domain::cart::Cart;

use crate::error::ApiError;
use crate::extract::Json;
use crate::state::AppState;
use crate::usecase::cart::{
    AddToCartUseCase, ClearCartUseCase, GetCartUseCase, RemoveFromCartUseCase,
};

/// Every cart endpoint answers with the resulting snapshot and its total.
#[derive(Serialize)]
pub struct CartResponse {
    pub success: bool,
    pub total: Decimal,
    pub cart: Cart,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        Self {
            success: true,
            total: cart.total(),
            cart,
        }
    }
}

// ── GET /cart ────────────────────────────────────────────────────────────────

pub async fn get_cart(
    user: SignedInUser,
    State(state): State<AppState>,
) -> Result<Json<CartResponse>, ApiError> {
    let usecase = GetCartUseCase {
        carts: state.cart_repo(),
    };
    let cart = usecase.execute(user.user_id).await?;
    Ok(Json(cart.into()))
}

// ── POST /cart/items ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub product_id: Uuid,
}

pub async fn add_item(
    user: SignedInUser,
    State(state): State<AppState>,
    Json(body): Json<AddItemRequest>,
) -> Result<Json<CartResponse>, ApiError> {
    let usecase = AddToCartUseCase {
        carts: state.cart_repo(),
        products: state.product_repo(),
    };
    let cart = usecase.execute(user.user_id, body.product_id).await?;
    Ok(Json(cart.into()))
}

// ── DELETE /cart/items/{index} ───────────────────────────────────────────────

pub async fn remove_item(
    user: SignedInUser,
    State(state): State<AppState>,
    Path(index): Path<String>,
) -> Result<Json<CartResponse>, ApiError> {
    let index = index
        .parse::<usize>()
        .map_err(|_| ApiError::validation(format!("Invalid cart index: {index}")))?;
    let usecase = RemoveFromCartUseCase {
        carts: state.cart_repo(),
    };
    let cart = usecase.execute(user.user_id, index).await?;
    Ok(Json(cart.into()))
}

// ── DELETE /cart ─────────────────────────────────────────────────────────────

pub async fn clear_cart(
    user: SignedInUser,
    State(state): State<AppState>,
) -> Result<Json<CartResponse>, ApiError> {
    let usecase = ClearCartUseCase {
        carts: state.cart_repo(),
    };
    let cart = usecase.execute(user.user_id).await?;
    Ok(Json(cart.into()))
}

use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};

use storefront_auth_types::identity::SignedInUser;

use crate::error::ApiError;
use crate::extract::{AdminUser, Json};
use crate::handlers::parse_id;
use crate::handlers::view::{OrderRecordResponse, OrderResponse};
use crate::state::AppState;
use crate::usecase::order::{ListAllOrdersUseCase, ListBuyerOrdersUseCase, UpdateOrderStatusUseCase};

// ── GET /auth/orders ─────────────────────────────────────────────────────────

pub async fn my_orders(
    user: SignedInUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<OrderResponse>>, ApiError> {
    let usecase = ListBuyerOrdersUseCase {
        repo: state.order_repo(),
    };
    let orders = usecase.execute(user.user_id).await?;
    Ok(Json(orders.into_iter().map(Into::into).collect()))
}

// ── GET /auth/all-orders ─────────────────────────────────────────────────────

pub async fn all_orders(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<OrderResponse>>, ApiError> {
    let usecase = ListAllOrdersUseCase {
        repo: state.order_repo(),
    };
    let orders = usecase.execute().await?;
    Ok(Json(orders.into_iter().map(Into::into).collect()))
}

// ── PUT /auth/order-status/{orderId} ─────────────────────────────────────────

#[derive(Deserialize)]
pub struct OrderStatusRequest {
    #[serde(default)]
    pub status: String,
}

#[derive(Serialize)]
pub struct OrderStatusResponse {
    pub success: bool,
    pub order: OrderRecordResponse,
}

pub async fn update_order_status(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(order_id): Path<String>,
    Json(body): Json<OrderStatusRequest>,
) -> Result<Json<OrderStatusResponse>, ApiError> {
    let usecase = UpdateOrderStatusUseCase {
        repo: state.order_repo(),
    };
    let order = usecase.execute(parse_id(&order_id)?, &body.status).await?;
    Ok(Json(OrderStatusResponse {
        success: true,
        order: order.into(),
    }))
}

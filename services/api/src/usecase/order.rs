use uuid::Uuid;

use storefront_domain::order::OrderStatus;

use crate::domain::repository::OrderRepository;
use crate::domain::types::{Order, OrderView};
use crate::error::ApiError;

// ── ListBuyerOrders ──────────────────────────────────────────────────────────

pub struct ListBuyerOrdersUseCase<R: OrderRepository> {
    pub repo: R,
}

impl<R: OrderRepository> ListBuyerOrdersUseCase<R> {
    pub async fn execute(&self, buyer_id: Uuid) -> Result<Vec<OrderView>, ApiError> {
        self.repo.list_by_buyer(buyer_id).await
    }
}

// ── ListAllOrders ────────────────────────────────────────────────────────────

pub struct ListAllOrdersUseCase<R: OrderRepository> {
    pub repo: R,
}

impl<R: OrderRepository> ListAllOrdersUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<OrderView>, ApiError> {
        self.repo.list_all().await
    }
}

// ── UpdateOrderStatus ────────────────────────────────────────────────────────

pub struct UpdateOrderStatusUseCase<R: OrderRepository> {
    pub repo: R,
}

impl<R: OrderRepository> UpdateOrderStatusUseCase<R> {
    /// The status is validated before the order is looked up, so an invalid
    /// value is rejected even for an unknown order id.
    pub async fn execute(&self, order_id: Uuid, raw_status: &str) -> Result<Order, ApiError> {
        let status: OrderStatus = raw_status
            .parse()
            .map_err(|_| ApiError::validation("Invalid order status"))?;
        self.repo
            .update_status(order_id, status)
            .await?
            .ok_or(ApiError::OrderNotFound)
    }
}

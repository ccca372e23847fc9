use chrono::Utc;
use uuid::Uuid;

use storefront_domain::cart::Cart;
use storefront_domain::order::OrderStatus;

use crate::domain::repository::{
    CartRepository, OrderRepository, PaymentAttemptRepository, PaymentGateway,
};
use crate::domain::types::{Order, Reservation};
use crate::error::ApiError;

// ── ClientToken ──────────────────────────────────────────────────────────────

pub struct ClientTokenUseCase<G: PaymentGateway> {
    pub gateway: G,
}

impl<G: PaymentGateway> ClientTokenUseCase<G> {
    pub async fn execute(&self) -> Result<String, ApiError> {
        self.gateway.client_token().await
    }
}

// ── Checkout ─────────────────────────────────────────────────────────────────

pub struct CheckoutInput {
    pub nonce: String,
    pub cart: Cart,
    /// Client-chosen key that makes retries of the same checkout safe.
    pub idempotency_key: Option<String>,
}

/// Charge the cart total and record the order.
///
/// 1. Reject an empty cart.
/// 2. With an idempotency key, reserve it: a finished key returns its order,
///    a key still in flight is rejected.
/// 3. Charge `cart.total()`. A decline releases the key; a gateway failure
///    keeps it reserved because the card may have been charged.
/// 4. Persist the order as "Not Processed", clear the buyer's stored cart and
///    mark the key completed.
pub struct CheckoutUseCase<G, O, A, C>
where
    G: PaymentGateway,
    O: OrderRepository,
    A: PaymentAttemptRepository,
    C: CartRepository,
{
    pub gateway: G,
    pub orders: O,
    pub attempts: A,
    pub carts: C,
}

impl<G, O, A, C> CheckoutUseCase<G, O, A, C>
where
    G: PaymentGateway,
    O: OrderRepository,
    A: PaymentAttemptRepository,
    C: CartRepository,
{
    pub async fn execute(&self, buyer_id: Uuid, input: CheckoutInput) -> Result<Uuid, ApiError> {
        if input.cart.is_empty() {
            return Err(ApiError::validation("cart is empty"));
        }
        if input.nonce.trim().is_empty() {
            return Err(ApiError::validation("nonce is required"));
        }

        let key = input
            .idempotency_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty());
        if let Some(key) = key {
            match self.attempts.reserve(buyer_id, key).await? {
                Reservation::Reserved => {}
                Reservation::Completed(order_id) => return Ok(order_id),
                Reservation::InProgress => return Err(ApiError::PaymentInProgress),
            }
        }

        let amount = input.cart.total();
        let charge = match self.gateway.charge(&input.nonce, amount).await {
            Ok(charge) => charge,
            Err(ApiError::PaymentDeclined(reason)) => {
                tracing::warn!(%buyer_id, %amount, %reason, "payment declined");
                if let Some(key) = key {
                    if let Err(release_err) = self.attempts.release(buyer_id, key).await {
                        tracing::error!(
                            error = ?release_err,
                            %buyer_id,
                            "failed to release payment attempt"
                        );
                    }
                }
                return Err(ApiError::PaymentDeclined(reason));
            }
            Err(e) => {
                // The charge may have gone through: keep the key reserved so a
                // retry cannot charge again before the payment is reconciled.
                if let Some(key) = key {
                    tracing::error!(
                        error = ?e,
                        %buyer_id,
                        idempotency_key = key,
                        "charge outcome unknown, keeping payment attempt reserved"
                    );
                }
                return Err(e);
            }
        };

        let now = Utc::now();
        let order = Order {
            id: Uuid::now_v7(),
            buyer_id,
            product_ids: input.cart.product_ids(),
            payment: charge.raw,
            status: OrderStatus::NotProcessed,
            created_at: now,
            updated_at: now,
        };
        // The card is already charged: a failure here keeps the reservation so
        // a retry with the same key cannot charge twice.
        if let Err(e) = self.orders.create(&order).await {
            tracing::error!(
                error = ?e,
                %buyer_id,
                transaction_id = %charge.transaction_id,
                "charged but failed to record order"
            );
            return Err(e);
        }
        tracing::info!(
            order_id = %order.id,
            %buyer_id,
            %amount,
            transaction_id = %charge.transaction_id,
            "payment captured"
        );

        if let Err(e) = self.carts.clear(buyer_id).await {
            tracing::warn!(error = ?e, %buyer_id, "failed to clear cart after checkout");
        }
        if let Some(key) = key {
            if let Err(e) = self.attempts.complete(buyer_id, key, order.id).await {
                tracing::error!(
                    error = ?e,
                    %buyer_id,
                    order_id = %order.id,
                    idempotency_key = key,
                    "failed to mark payment attempt completed"
                );
            }
        }
        Ok(order.id)
    }
}

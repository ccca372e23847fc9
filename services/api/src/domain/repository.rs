#![allow(async_fn_in_trait)]

use rust_decimal::Decimal;
use uuid::Uuid;

use storefront_domain::cart::Cart;
use storefront_domain::order::OrderStatus;
use storefront_domain::pagination::PageRequest;

use crate::domain::types::{
    CatalogProduct, Category, ChargeResult, Order, OrderView, Product, ProductFilter,
    ProductPhoto, ProfileChanges, Reservation, User,
};
use crate::error::ApiError;

/// Repository for registered accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError>;
    async fn find_by_email_and_answer(
        &self,
        email: &str,
        answer: &str,
    ) -> Result<Option<User>, ApiError>;
    async fn create(&self, user: &User) -> Result<(), ApiError>;
    /// Apply `changes`; `changes.password` must already be hashed.
    /// Returns `None` if the user does not exist.
    async fn update_profile(
        &self,
        id: Uuid,
        changes: ProfileChanges,
    ) -> Result<Option<User>, ApiError>;
    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), ApiError>;
    async fn list(&self) -> Result<Vec<User>, ApiError>;
}

/// Repository for product categories.
pub trait CategoryRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, ApiError>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, ApiError>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, ApiError>;
    async fn list(&self) -> Result<Vec<Category>, ApiError>;
    async fn create(&self, category: &Category) -> Result<(), ApiError>;
    async fn update(&self, category: &Category) -> Result<(), ApiError>;
    /// Delete a category. Fails with [`ApiError::CategoryInUse`] while products
    /// reference it. Returns `true` if a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, ApiError>;
}

/// Read side of the catalog. Nothing here loads photo bytes.
pub trait ProductQueryRepository: Send + Sync {
    async fn filter(&self, filter: &ProductFilter) -> Result<Vec<CatalogProduct>, ApiError>;
    /// Newest first.
    async fn page(&self, page: PageRequest) -> Result<Vec<CatalogProduct>, ApiError>;
    async fn latest(&self, limit: u64) -> Result<Vec<CatalogProduct>, ApiError>;
    async fn search(&self, keyword: &str) -> Result<Vec<CatalogProduct>, ApiError>;
    /// Other products in `category_id`, excluding `product_id`.
    async fn related(
        &self,
        product_id: Uuid,
        category_id: Uuid,
        limit: u64,
    ) -> Result<Vec<CatalogProduct>, ApiError>;
    async fn in_category(&self, category_id: Uuid) -> Result<Vec<CatalogProduct>, ApiError>;
    /// Approximate row count; may lag behind recent writes.
    async fn estimated_count(&self) -> Result<u64, ApiError>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<CatalogProduct>, ApiError>;
    async fn photo(&self, product_id: Uuid) -> Result<Option<ProductPhoto>, ApiError>;
}

/// Write side of the catalog.
pub trait ProductRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, ApiError>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Product>, ApiError>;
    /// Insert the product and, when given, its photo in one transaction.
    async fn create(
        &self,
        product: &Product,
        photo: Option<&ProductPhoto>,
    ) -> Result<(), ApiError>;
    /// Update the product; a `Some` photo replaces the stored one.
    async fn update(
        &self,
        product: &Product,
        photo: Option<&ProductPhoto>,
    ) -> Result<(), ApiError>;
    /// Returns `true` if a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, ApiError>;
}

/// Repository for orders.
pub trait OrderRepository: Send + Sync {
    /// Insert the order and its product lines in one transaction.
    async fn create(&self, order: &Order) -> Result<(), ApiError>;
    async fn list_by_buyer(&self, buyer_id: Uuid) -> Result<Vec<OrderView>, ApiError>;
    /// Every order, newest first.
    async fn list_all(&self) -> Result<Vec<OrderView>, ApiError>;
    /// Returns `None` if the order does not exist.
    async fn update_status(
        &self,
        id: Uuid,
        status: OrderStatus,
    ) -> Result<Option<Order>, ApiError>;
}

/// Idempotency-key reservations for checkout.
pub trait PaymentAttemptRepository: Send + Sync {
    async fn reserve(&self, buyer_id: Uuid, key: &str) -> Result<Reservation, ApiError>;
    async fn complete(&self, buyer_id: Uuid, key: &str, order_id: Uuid) -> Result<(), ApiError>;
    /// Drop an unfinished reservation so the key can be retried.
    async fn release(&self, buyer_id: Uuid, key: &str) -> Result<(), ApiError>;
}

/// Server-side cart storage, one cart per user.
pub trait CartRepository: Send + Sync {
    /// A user without a stored cart has an empty one.
    async fn load(&self, user_id: Uuid) -> Result<Cart, ApiError>;
    async fn save(&self, user_id: Uuid, cart: &Cart) -> Result<(), ApiError>;
    async fn clear(&self, user_id: Uuid) -> Result<(), ApiError>;
}

/// Outbound port to the card payment processor.
pub trait PaymentGateway: Send + Sync {
    /// Token the browser drop-in uses to tokenize a card.
    async fn client_token(&self) -> Result<String, ApiError>;
    /// Authorize `amount` against `nonce` and submit it for settlement.
    ///
    /// A processor decline is [`ApiError::PaymentDeclined`]; transport and
    /// protocol failures are [`ApiError::Gateway`].
    async fn charge(&self, nonce: &str, amount: Decimal) -> Result<ChargeResult, ApiError>;
}

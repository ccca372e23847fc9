use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use storefront_domain::order::OrderStatus;
use storefront_domain::user::UserRole;

use crate::error::ApiError;

/// Largest accepted product photo, exclusive.
pub const MAX_PHOTO_BYTES: usize = 1_000_000;

/// Size of the unpaginated "latest products" listing.
pub const LATEST_PRODUCTS_LIMIT: u64 = 12;

/// Size of the related-products rail.
pub const RELATED_PRODUCTS_LIMIT: u64 = 3;

/// Registered account. `password` is the stored hash, never the plaintext.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub address: String,
    pub answer: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields a user may change on their own profile. `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

/// Catalog entry without its photo.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub price: Decimal,
    pub category_id: Uuid,
    pub quantity: i32,
    pub shipping: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A product joined with its category.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogProduct {
    pub product: Product,
    pub category: Category,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductPhoto {
    pub data: Vec<u8>,
    pub content_type: String,
}

/// Inclusive price bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    pub min: Decimal,
    pub max: Decimal,
}

/// Storefront filter panel state translated into query terms.
///
/// An empty `categories` list means "any category"; `price: None` means
/// "any price".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub categories: Vec<Uuid>,
    pub price: Option<PriceRange>,
}

impl ProductFilter {
    /// Build a filter from the checked categories and the `[min, max]` radio
    /// tuple. The tuple must be empty or hold exactly two bounds.
    pub fn new(checked: Vec<Uuid>, radio: &[Decimal]) -> Result<Self, ApiError> {
        let price = match radio {
            [] => None,
            [min, max] => Some(PriceRange {
                min: *min,
                max: *max,
            }),
            _ => return Err(ApiError::validation("Invalid radio(price) filter")),
        };
        Ok(Self {
            categories: checked,
            price,
        })
    }
}

/// A paid order. `product_ids` keeps cart order and duplicates.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: Uuid,
    pub buyer_id: Uuid,
    pub product_ids: Vec<Uuid>,
    pub payment: serde_json::Value,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An order with its buyer's name and the products it still resolves to.
///
/// Products deleted since checkout are absent from `products`.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderView {
    pub order: Order,
    pub buyer_name: String,
    pub products: Vec<Product>,
}

/// Successful charge as reported by the payment gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct ChargeResult {
    pub transaction_id: String,
    pub status: String,
    pub amount: Decimal,
    /// Gateway response kept verbatim on the order.
    pub raw: serde_json::Value,
}

/// Outcome of reserving an idempotency key before charging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reservation {
    /// First use of the key; the caller owns the attempt.
    Reserved,
    /// The key already produced this order.
    Completed(Uuid),
    /// Another request holds the key and has not finished.
    InProgress,
}

//! JSON shapes returned to the storefront client.
//!
//! Field names follow the client's expectations: `_id` for identifiers and
//! camelCase timestamps.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use storefront_domain::order::OrderStatus;

use crate::domain::types::{CatalogProduct, Category, Order, OrderView, Product, User};

/// Account details without the password hash or security answer.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub role: u8,
    #[serde(serialize_with = "storefront_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "storefront_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            address: user.address,
            role: user.role.as_u8(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            slug: category.slug,
        }
    }
}

/// A product as stored, with the category as a bare id.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecordResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub price: Decimal,
    pub category: Uuid,
    pub quantity: i32,
    pub shipping: bool,
    #[serde(serialize_with = "storefront_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "storefront_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductRecordResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            slug: product.slug,
            description: product.description,
            price: product.price,
            category: product.category_id,
            quantity: product.quantity,
            shipping: product.shipping,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

/// A catalog listing entry with its category populated.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub price: Decimal,
    pub category: CategoryResponse,
    pub quantity: i32,
    pub shipping: bool,
    #[serde(serialize_with = "storefront_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "storefront_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<CatalogProduct> for ProductResponse {
    fn from(CatalogProduct { product, category }: CatalogProduct) -> Self {
        Self {
            id: product.id,
            name: product.name,
            slug: product.slug,
            description: product.description,
            price: product.price,
            category: category.into(),
            quantity: product.quantity,
            shipping: product.shipping,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

pub fn catalog(products: Vec<CatalogProduct>) -> Vec<ProductResponse> {
    products.into_iter().map(ProductResponse::from).collect()
}

#[derive(Debug, Serialize)]
pub struct BuyerResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
}

/// An order with its products and buyer populated.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub products: Vec<ProductRecordResponse>,
    pub payment: serde_json::Value,
    pub buyer: BuyerResponse,
    pub status: OrderStatus,
    #[serde(serialize_with = "storefront_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "storefront_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<OrderView> for OrderResponse {
    fn from(view: OrderView) -> Self {
        let OrderView {
            order,
            buyer_name,
            products,
        } = view;
        Self {
            id: order.id,
            products: products.into_iter().map(Into::into).collect(),
            payment: order.payment,
            buyer: BuyerResponse {
                id: order.buyer_id,
                name: buyer_name,
            },
            status: order.status,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

/// An order as stored, with references left unpopulated.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecordResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub products: Vec<Uuid>,
    pub payment: serde_json::Value,
    pub buyer: Uuid,
    pub status: OrderStatus,
    #[serde(serialize_with = "storefront_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "storefront_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<Order> for OrderRecordResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            products: order.product_ids,
            payment: order.payment,
            buyer: order.buyer_id,
            status: order.status,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

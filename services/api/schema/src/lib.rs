//! sea-orm entities for the storefront API database.

pub mod carts;
pub mod categories;
pub mod order_products;
pub mod orders;
pub mod payment_attempts;
pub mod product_photos;
pub mod products;
pub mod users;

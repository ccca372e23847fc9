//! Domain types shared across the Storefront crates.
//!
//! This crate contains only pure types with no framework dependencies.

pub mod cart;
pub mod order;
pub mod pagination;
pub mod slug;
pub mod user;

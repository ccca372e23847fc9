//! Auth primitives shared across Storefront crates.
//!
//! Provides JWT issue/validation, password hashing, and the `SignedInUser`
//! extractor.

pub mod identity;
pub mod password;
pub mod token;

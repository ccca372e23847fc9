//! Fixed-size page requests.

use serde::{Deserialize, Serialize};

/// Number of products on one catalog page.
pub const CATALOG_PAGE_SIZE: u64 = 6;

/// Rejected `page` path parameter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid page param")]
pub struct InvalidPage;

/// One page of a fixed-size listing.
///
/// - `page`: ≥ 1
/// - `per_page`: ≥ 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u64,
    pub per_page: u64,
}

impl PageRequest {
    /// Parse a 1-based page number from a path segment.
    ///
    /// Anything that is not a positive base-10 integer is rejected, including
    /// `0`, negatives, fractions and surrounding whitespace.
    pub fn parse(raw: &str, per_page: u64) -> Result<Self, InvalidPage> {
        let page = raw.parse::<u64>().map_err(|_| InvalidPage)?;
        if page == 0 {
            return Err(InvalidPage);
        }
        Ok(Self {
            page,
            per_page: per_page.max(1),
        })
    }

    /// Rows to skip before this page.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.per_page)
    }

    pub fn limit(&self) -> u64 {
        self.per_page
    }
}

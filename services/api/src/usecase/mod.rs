pub mod auth;
pub mod cart;
pub mod category;
pub mod order;
pub mod payment;
pub mod product;

use storefront_domain::slug::slugify;

use crate::error::ApiError;

/// Reject a missing or blank form field with `"<label> is Required"`.
pub(crate) fn required(value: Option<String>, label: &str) -> Result<String, ApiError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ApiError::validation(format!("{label} is Required"))),
    }
}

/// Treat blank optional inputs as absent.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Slug for a display name; a name with no slug-safe characters is rejected.
pub(crate) fn slug_for(name: &str) -> Result<String, ApiError> {
    let slug = slugify(name);
    if slug.is_empty() {
        return Err(ApiError::validation(
            "Name must contain at least one letter or digit",
        ));
    }
    Ok(slug)
}

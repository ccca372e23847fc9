//! URL-safe identifiers derived from display names.

/// Derive a slug from a display name.
///
/// Deterministic: the same name always yields the same slug. Letters keep
/// their case, runs of whitespace and separators become a single `-`,
/// characters outside `[alnum - _ . ~]` are dropped, and leading/trailing
/// dashes are trimmed.
///
/// ```
/// use storefront_domain::slug::slugify;
///
/// assert_eq!(slugify("Smart Phones"), "Smart-Phones");
/// assert_eq!(slugify("  Books & Comics "), "Books-Comics");
/// ```
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.chars() {
        if c.is_whitespace() || c == '-' {
            pending_dash = true;
            continue;
        }
        if !(c.is_alphanumeric() || matches!(c, '_' | '.' | '~')) {
            continue;
        }
        if pending_dash && !slug.is_empty() {
            slug.push('-');
        }
        pending_dash = false;
        slug.push(c);
    }
    slug
}

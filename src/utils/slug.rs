//! Slug generation and validation utilities.
//!
//! Slugs identify posts and tags in URLs. They are derived from titles and
//! tag names with the `slug` crate and validated before storage.

use crate::error::AppError;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Maximum slug length, matching the `posts.slug` column.
pub const MAX_SLUG_LENGTH: usize = 250;

static SLUG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("slug regex is valid"));

/// Derives a URL-safe slug from arbitrary text.
///
/// Non-ASCII characters are transliterated, everything else that is not a
/// letter or digit collapses into single hyphens. The result is truncated to
/// [`MAX_SLUG_LENGTH`] without leaving a trailing hyphen.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if nothing slug-worthy remains.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(slugify("Who was Django Reinhardt?")?, "who-was-django-reinhardt");
/// ```
pub fn slugify(text: &str) -> Result<String, AppError> {
    let mut slug = slug::slugify(text);

    if slug.len() > MAX_SLUG_LENGTH {
        slug.truncate(MAX_SLUG_LENGTH);
        while slug.ends_with('-') {
            slug.pop();
        }
    }

    if slug.is_empty() {
        return Err(AppError::bad_request(
            "Cannot derive a slug from the given text",
            json!({ "text": text }),
        ));
    }

    Ok(slug)
}

/// Validates a user-provided slug.
///
/// # Rules
///
/// - Length: 1-250 characters
/// - Allowed characters: lowercase letters, digits, hyphens
/// - No leading, trailing or doubled hyphens
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_slug(slug: &str) -> Result<(), AppError> {
    if slug.is_empty() || slug.len() > MAX_SLUG_LENGTH {
        return Err(AppError::bad_request(
            "Slug must be 1-250 characters",
            json!({ "provided_length": slug.len() }),
        ));
    }

    if !SLUG_REGEX.is_match(slug) {
        return Err(AppError::bad_request(
            "Slug may only contain lowercase letters, digits and single hyphens",
            json!({ "slug": slug }),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_title() {
        assert_eq!(
            slugify("Who was Django Reinhardt?").unwrap(),
            "who-was-django-reinhardt"
        );
    }

    #[test]
    fn test_slugify_transliterates() {
        assert_eq!(slugify("Crème Brûlée").unwrap(), "creme-brulee");
    }

    #[test]
    fn test_slugify_rejects_symbols_only() {
        assert!(slugify("?!*").is_err());
    }

    #[test]
    fn test_slugify_truncates_without_trailing_hyphen() {
        let title = format!("{} tail", "a".repeat(MAX_SLUG_LENGTH - 1));
        let slug = slugify(&title).unwrap();

        assert!(slug.len() <= MAX_SLUG_LENGTH);
        assert!(!slug.ends_with('-'));
        assert!(validate_slug(&slug).is_ok());
    }

    #[test]
    fn test_validate_slug() {
        assert!(validate_slug("new-post-2024").is_ok());
        assert!(validate_slug("").is_err());
        assert!(validate_slug("Upper-Case").is_err());
        assert!(validate_slug("-leading").is_err());
        assert!(validate_slug("trailing-").is_err());
        assert!(validate_slug("double--hyphen").is_err());
        assert!(validate_slug("with space").is_err());
        assert!(validate_slug(&"a".repeat(MAX_SLUG_LENGTH + 1)).is_err());
    }
}

//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx with
//! parameterised queries mapped through `FromRow` row structs.
//!
//! # Repositories
//!
//! - [`PgPostRepository`] - Post listing, detail lookup and similarity ranking
//! - [`PgCommentRepository`] - Comment submission and moderation
//! - [`PgTagRepository`] - Tag lookup and assignment
//! - [`PgAuthorRepository`] - Author accounts

pub mod pg_author_repository;
pub mod pg_comment_repository;
pub mod pg_post_repository;
pub mod pg_tag_repository;

pub use pg_author_repository::PgAuthorRepository;
pub use pg_comment_repository::PgCommentRepository;
pub use pg_post_repository::PgPostRepository;
pub use pg_tag_repository::PgTagRepository;

/// Builds an `ILIKE` pattern matching `term` anywhere, with `%`, `_` and `\`
/// taken literally.
pub(crate) fn contains_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("django"), "%django%");
        assert_eq!(contains_pattern("100%"), "%100\\%%");
        assert_eq!(contains_pattern("snake_case"), "%snake\\_case%");
    }
}

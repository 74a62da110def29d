//! Tag entity.

/// A free-form label attached to posts.
///
/// Tags are created implicitly when an author assigns them to a post and are
/// used both for filtering the post list and for ranking similar posts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

impl Tag {
    pub fn new(id: i64, name: String, slug: String) -> Self {
        Self { id, name, slug }
    }

    /// Path of the post list filtered by this tag.
    pub fn absolute_path(&self) -> String {
        format!("/blog/tag/{}", self.slug)
    }
}

//! Comment entity.

use chrono::{DateTime, Utc};

/// A visitor comment on a post.
///
/// Comments are stored inactive and only shown once a moderator sets
/// `active`.
#[derive(Debug, Clone)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub name: String,
    pub email: String,
    pub body: String,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub active: bool,
}

impl Comment {
    pub fn created_display(&self) -> String {
        self.created.format("%B %-d, %Y %H:%M").to_string()
    }
}

/// Input data for a new comment. The stored record always starts inactive.
#[derive(Debug, Clone, PartialEq)]
pub struct NewComment {
    pub post_id: i64,
    pub name: String,
    pub email: String,
    pub body: String,
}

/// Moderation listing filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommentFilter {
    pub active: Option<bool>,
    /// Case-insensitive match against name, email and body.
    pub search: Option<String>,
}

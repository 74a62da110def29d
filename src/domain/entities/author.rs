//! Author entity.

use chrono::{DateTime, Utc};

/// The account a post is written by.
#[derive(Debug, Clone)]
pub struct Author {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Input data for creating a new author.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAuthor {
    pub username: String,
    pub email: String,
}

//! Core domain entities representing the blog data model.
//!
//! # Entity Types
//!
//! - [`Post`] - An article with a publication status and tags
//! - [`Comment`] - A visitor comment awaiting or past moderation
//! - [`Tag`] - A label shared between posts
//! - [`Author`] - The account a post is written by
//!
//! Separate `New*` structs carry the data needed to insert a record, and
//! filter structs describe the admin listing queries.

pub mod author;
pub mod comment;
pub mod post;
pub mod tag;

pub use author::{Author, NewAuthor};
pub use comment::{Comment, CommentFilter, NewComment};
pub use post::{NewPost, Post, PostFilter, PostStatus};
pub use tag::Tag;

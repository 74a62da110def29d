//! Business logic services for the application layer.

pub mod authoring_service;
pub mod comment_service;
pub mod post_service;
pub mod share_service;

pub use authoring_service::{AuthoringService, PostDraft};
pub use comment_service::{CommentInput, CommentService};
pub use post_service::{POSTS_PER_PAGE, PostListing, PostService, SIMILAR_POSTS_LIMIT};
pub use share_service::{ShareRequest, ShareService};

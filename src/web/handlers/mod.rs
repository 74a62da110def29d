//! Blog page handlers.

pub mod post_detail;
pub mod post_list;
pub mod post_share;

pub use post_detail::{post_comment_handler, post_detail_handler};
pub use post_list::{post_list_handler, post_list_by_tag_handler};
pub use post_share::{post_share_form_handler, post_share_handler};

//! Post entity and its publication status.

use chrono::{DateTime, Datelike, Utc};
use std::fmt;
use std::str::FromStr;

use super::Tag;

/// Publication status of a post.
///
/// Only [`PostStatus::Published`] posts are visible on the public site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
}

impl PostStatus {
    /// Value stored in the `posts.status` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            other => Err(format!("unknown post status '{other}'")),
        }
    }
}

/// A blog post with its author name and tags resolved.
#[derive(Debug, Clone)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub author: String,
    pub body: String,
    pub publish: DateTime<Utc>,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub status: PostStatus,
    pub tags: Vec<Tag>,
}

impl Post {
    /// Number of words kept by [`Post::excerpt`].
    pub const EXCERPT_WORDS: usize = 30;

    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published
    }

    /// Canonical path of the detail page: `/blog/{year}/{month}/{day}/{slug}`.
    ///
    /// Date components are taken in UTC and are not zero padded.
    pub fn absolute_path(&self) -> String {
        format!(
            "/blog/{}/{}/{}/{}",
            self.publish.year(),
            self.publish.month(),
            self.publish.day(),
            self.slug
        )
    }

    /// Path of the share form for this post.
    pub fn share_path(&self) -> String {
        format!("/blog/{}/share", self.id)
    }

    pub fn publish_display(&self) -> String {
        self.publish.format("%B %-d, %Y %H:%M").to_string()
    }

    /// First [`Self::EXCERPT_WORDS`] words of the body, with an ellipsis when cut.
    pub fn excerpt(&self) -> String {
        let mut words = self.body.split_whitespace();
        let head: Vec<&str> = words.by_ref().take(Self::EXCERPT_WORDS).collect();
        let mut excerpt = head.join(" ");
        if words.next().is_some() {
            excerpt.push_str(" …");
        }
        excerpt
    }

    /// Comma separated tag names, as shown under each post.
    pub fn tag_names(&self) -> String {
        self.tags
            .iter()
            .map(|t| t.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Input data for creating a new post.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub slug: String,
    pub author_id: i64,
    pub body: String,
    pub publish: DateTime<Utc>,
    pub status: PostStatus,
    /// Tags attached in the same transaction as the insert.
    pub tag_ids: Vec<i64>,
}

/// Admin listing filter. `None` fields do not restrict the result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostFilter {
    pub status: Option<PostStatus>,
    /// Case-insensitive match against title and body.
    pub search: Option<String>,
    pub author: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn post_with_body(body: &str) -> Post {
        let publish = Utc.with_ymd_and_hms(2024, 3, 7, 9, 5, 0).unwrap();
        Post {
            id: 12,
            title: "Who was Django Reinhardt?".to_string(),
            slug: "who-was-django-reinhardt".to_string(),
            author: "admin".to_string(),
            body: body.to_string(),
            publish,
            created: publish,
            updated: publish,
            status: PostStatus::Published,
            tags: vec![
                Tag::new(1, "music".to_string(), "music".to_string()),
                Tag::new(2, "jazz".to_string(), "jazz".to_string()),
            ],
        }
    }

    #[test]
    fn test_status_round_trips_through_column_value() {
        assert_eq!("draft".parse::<PostStatus>(), Ok(PostStatus::Draft));
        assert_eq!("published".parse::<PostStatus>(), Ok(PostStatus::Published));
        assert_eq!(PostStatus::Published.as_str(), "published");
        assert!("archived".parse::<PostStatus>().is_err());
    }

    #[test]
    fn test_default_status_is_draft() {
        assert_eq!(PostStatus::default(), PostStatus::Draft);
    }

    #[test]
    fn test_absolute_path_is_not_zero_padded() {
        let post = post_with_body("text");
        assert_eq!(post.absolute_path(), "/blog/2024/3/7/who-was-django-reinhardt");
        assert_eq!(post.share_path(), "/blog/12/share");
    }

    #[test]
    fn test_publish_display() {
        let post = post_with_body("text");
        assert_eq!(post.publish_display(), "March 7, 2024 09:05");
    }

    #[test]
    fn test_excerpt_keeps_short_bodies_intact() {
        let post = post_with_body("A short body.");
        assert_eq!(post.excerpt(), "A short body.");
    }

    #[test]
    fn test_excerpt_truncates_long_bodies() {
        let body = (1..=40).map(|i| i.to_string()).collect::<Vec<_>>().join(" ");
        let post = post_with_body(&body);
        let excerpt = post.excerpt();

        assert!(excerpt.starts_with("1 2 3"));
        assert!(excerpt.ends_with("30 …"));
        assert!(!excerpt.contains("31"));
    }

    #[test]
    fn test_tag_names() {
        let post = post_with_body("text");
        assert_eq!(post.tag_names(), "music, jazz");
    }
}

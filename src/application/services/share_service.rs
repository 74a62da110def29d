//! Post recommendation by email.

use std::sync::Arc;

use serde_json::json;
use url::Url;

use crate::domain::entities::Post;
use crate::error::AppError;
use crate::infrastructure::mail::{Mailer, OutgoingEmail};

/// A visitor's request to recommend a post, already validated by the form layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ShareRequest {
    pub name: String,
    pub email: String,
    pub to: String,
    pub comments: String,
}

/// Service sending "recommend this post" emails.
///
/// Every successful call sends exactly one message from the configured
/// sender address. Delivery is not retried.
pub struct ShareService {
    mailer: Arc<dyn Mailer>,
    site_url: Url,
    from: String,
}

impl ShareService {
    /// Creates a new share service.
    ///
    /// # Arguments
    ///
    /// - `mailer` - Delivery backend
    /// - `site_url` - Absolute base URL that post paths are joined onto
    /// - `from` - Sender address of every message
    pub fn new(mailer: Arc<dyn Mailer>, site_url: Url, from: impl Into<String>) -> Self {
        Self {
            mailer,
            site_url,
            from: from.into(),
        }
    }

    /// Absolute URL of the post's detail page.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the path cannot be joined onto the site URL.
    pub fn post_url(&self, post: &Post) -> Result<Url, AppError> {
        self.site_url.join(&post.absolute_path()).map_err(|e| {
            AppError::internal(
                "Failed to build post URL",
                json!({ "site_url": self.site_url.as_str(), "reason": e.to_string() }),
            )
        })
    }

    /// Sends one recommendation email for `post`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the message cannot be built or delivered.
    pub async fn recommend_post(&self, post: &Post, request: ShareRequest) -> Result<(), AppError> {
        let post_url = self.post_url(post)?;
        let name = request.name.trim();

        let email = OutgoingEmail {
            from: self.from.clone(),
            to: request.to.trim().to_string(),
            subject: format!("{name} recommends you read {}", post.title),
            body: format!(
                "Read {} at {post_url} {name}'s comments: {}",
                post.title,
                request.comments.trim()
            ),
        };
        let recipient_domain = email.to.rsplit('@').next().unwrap_or_default().to_string();

        if let Err(e) = self.mailer.send(email).await {
            tracing::error!(post_id = post.id, error = %e, backend = self.mailer.backend(), "Share email failed");
            return Err(e.into());
        }

        tracing::info!(post_id = post.id, recipient_domain = %recipient_domain, "Share email sent");
        Ok(())
    }

    /// Checks if the mail backend is reachable.
    pub async fn mail_health(&self) -> bool {
        self.mailer.health_check().await
    }

    pub fn mail_backend(&self) -> &'static str {
        self.mailer.backend()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::PostStatus;
    use crate::infrastructure::mail::{MailError, MemoryMailer, MockMailer};
    use chrono::{TimeZone, Utc};

    fn create_test_post() -> Post {
        let publish = Utc.with_ymd_and_hms(2024, 1, 2, 10, 0, 0).unwrap();
        Post {
            id: 8,
            title: "Jazz".to_string(),
            slug: "jazz".to_string(),
            author: "admin".to_string(),
            body: "Body".to_string(),
            publish,
            created: publish,
            updated: publish,
            status: PostStatus::Published,
            tags: vec![],
        }
    }

    fn request(comments: &str) -> ShareRequest {
        ShareRequest {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            to: "friend@example.com".to_string(),
            comments: comments.to_string(),
        }
    }

    fn site() -> Url {
        Url::parse("http://localhost:8000").unwrap()
    }

    #[test]
    fn test_post_url_is_absolute() {
        let service = ShareService::new(Arc::new(MemoryMailer::new()), site(), "admin@myblog.com");
        let url = service.post_url(&create_test_post()).unwrap();

        assert_eq!(url.as_str(), "http://localhost:8000/blog/2024/1/2/jazz");
    }

    #[tokio::test]
    async fn test_recommend_post_sends_one_email() {
        let mailer = Arc::new(MemoryMailer::new());
        let service = ShareService::new(mailer.clone(), site(), "admin@myblog.com");

        service
            .recommend_post(&create_test_post(), request("Worth it"))
            .await
            .unwrap();

        let outbox = mailer.outbox();
        assert_eq!(outbox.len(), 1);

        let email = &outbox[0];
        assert_eq!(email.from, "admin@myblog.com");
        assert_eq!(email.to, "friend@example.com");
        assert_eq!(email.subject, "Ana recommends you read Jazz");
        assert_eq!(
            email.body,
            "Read Jazz at http://localhost:8000/blog/2024/1/2/jazz Ana's comments: Worth it"
        );
    }

    #[tokio::test]
    async fn test_recommend_post_without_comments() {
        let mailer = Arc::new(MemoryMailer::new());
        let service = ShareService::new(mailer.clone(), site(), "admin@myblog.com");

        service
            .recommend_post(&create_test_post(), request(""))
            .await
            .unwrap();

        assert!(mailer.outbox()[0].body.ends_with("Ana's comments: "));
    }

    #[tokio::test]
    async fn test_recommend_post_surfaces_mail_failure() {
        let mut mock_mailer = MockMailer::new();
        mock_mailer
            .expect_send()
            .times(1)
            .returning(|_| Err(MailError::Transport("connection refused".to_string())));
        mock_mailer.expect_backend().return_const("smtp");

        let service = ShareService::new(Arc::new(mock_mailer), site(), "admin@myblog.com");
        let result = service.recommend_post(&create_test_post(), request("x")).await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }
}

//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, migrations, mailer selection and the Axum server
//! lifecycle.

use crate::application::services::{CommentService, PostService, ShareService};
use crate::config::{Config, MailBackend};
use crate::infrastructure::mail::{ConsoleMailer, Mailer, SmtpMailer};
use crate::infrastructure::persistence::{PgCommentRepository, PgPostRepository, PgTagRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Opens the PostgreSQL pool with the configured limits.
///
/// # Errors
///
/// Returns an error if the database cannot be reached.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")
}

/// Builds the mailer selected by `MAIL_BACKEND`.
///
/// # Errors
///
/// Returns an error if the SMTP transport cannot be configured.
pub fn build_mailer(config: &Config) -> Result<Arc<dyn Mailer>> {
    match (config.mail_backend, config.smtp_settings()) {
        (MailBackend::Smtp, Some(settings)) => {
            let mailer = SmtpMailer::new(&settings).context("Failed to configure SMTP mailer")?;
            Ok(Arc::new(mailer))
        }
        (MailBackend::Smtp, None) => anyhow::bail!("SMTP_HOST must be set when MAIL_BACKEND is 'smtp'"),
        (MailBackend::Console, _) => {
            tracing::info!("Mail backend: console (emails are logged, not sent)");
            Ok(Arc::new(ConsoleMailer::new()))
        }
    }
}

/// Wires repositories and services into the shared application state.
pub fn build_state(pool: PgPool, mailer: Arc<dyn Mailer>, config: &Config) -> Result<AppState> {
    let pool = Arc::new(pool);

    let post_repository = Arc::new(PgPostRepository::new(pool.clone()));
    let tag_repository = Arc::new(PgTagRepository::new(pool.clone()));
    let comment_repository = Arc::new(PgCommentRepository::new(pool));

    let site_url = config.parsed_site_url()?;

    Ok(AppState {
        post_service: Arc::new(PostService::new(post_repository, tag_repository)),
        comment_service: Arc::new(CommentService::new(comment_repository)),
        share_service: Arc::new(ShareService::new(mailer, site_url, config.mail_from.clone())),
    })
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Mail backend (SMTP or console)
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Mailer configuration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_pool(&config).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Migrations applied");

    let mailer = build_mailer(&config)?;
    let state = build_state(pool, mailer, &config)?;

    let app = app_router(state, config.behind_proxy);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .await?;

    Ok(())
}

//! CLI administration tool for the blog.
//!
//! Provides commands for managing authors, posts, tags and comment
//! moderation without a web admin interface.
//!
//! # Usage
//!
//! ```bash
//! # Create an author
//! cargo run --bin admin -- author create --username admin --email admin@myblog.com
//!
//! # Write a post (slug derived from the title) and publish it right away
//! cargo run --bin admin -- post create --author admin --title "Who was Django Reinhardt?" \
//!     --body-file django.txt --tags music,jazz --publish
//!
//! # List drafts mentioning "jazz"
//! cargo run --bin admin -- post list --status draft --search jazz
//!
//! # Moderate comments
//! cargo run --bin admin -- comment list --inactive
//! cargo run --bin admin -- comment approve 12
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string

use blog::application::services::{AuthoringService, CommentService, PostDraft};
use blog::domain::entities::{CommentFilter, Post, PostFilter, PostStatus};
use blog::infrastructure::persistence::{
    PgAuthorRepository, PgCommentRepository, PgPostRepository, PgTagRepository,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::path::PathBuf;
use std::sync::Arc;

type Authoring = AuthoringService<PgPostRepository, PgTagRepository, PgAuthorRepository>;

/// CLI tool for managing the blog.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage authors
    Author {
        #[command(subcommand)]
        action: AuthorAction,
    },

    /// Write, publish and tag posts
    Post {
        #[command(subcommand)]
        action: PostAction,
    },

    /// Moderate comments
    Comment {
        #[command(subcommand)]
        action: CommentAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum AuthorAction {
    /// Create a new author
    Create {
        #[arg(short, long)]
        username: Option<String>,

        #[arg(short, long)]
        email: Option<String>,
    },

    /// List all authors
    List,
}

#[derive(Clone, Copy, ValueEnum)]
enum StatusArg {
    Draft,
    Published,
}

impl From<StatusArg> for PostStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Draft => PostStatus::Draft,
            StatusArg::Published => PostStatus::Published,
        }
    }
}

#[derive(Subcommand)]
enum PostAction {
    /// Create a new post
    Create {
        /// Author username
        #[arg(short, long)]
        author: String,

        #[arg(short, long)]
        title: Option<String>,

        /// Custom slug (derived from the title if omitted)
        #[arg(short, long)]
        slug: Option<String>,

        /// Post body
        #[arg(short, long, conflicts_with = "body_file")]
        body: Option<String>,

        /// Read the body from a file
        #[arg(long)]
        body_file: Option<PathBuf>,

        /// Comma separated tag names
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,

        /// Publish immediately instead of saving a draft
        #[arg(long)]
        publish: bool,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List posts of any status
    List {
        #[arg(long, value_enum)]
        status: Option<StatusArg>,

        /// Match against title and body
        #[arg(long)]
        search: Option<String>,

        /// Author username
        #[arg(long)]
        author: Option<String>,
    },

    /// Publish a draft
    Publish { id: i64 },

    /// Move a post back to draft
    Unpublish { id: i64 },

    /// Replace the tags of a post
    Tag {
        id: i64,

        /// Comma separated tag names; `--tags ""` removes every tag
        #[arg(long, value_delimiter = ',', required = true)]
        tags: Vec<String>,
    },
}

#[derive(Subcommand)]
enum CommentAction {
    /// List comments, newest first
    List {
        /// Only approved comments
        #[arg(long, conflicts_with = "inactive")]
        active: bool,

        /// Only comments awaiting moderation
        #[arg(long)]
        inactive: bool,

        /// Match against name, email and body
        #[arg(long)]
        search: Option<String>,
    },

    /// Approve a comment so it is shown on the post page
    Approve { id: i64 },

    /// Hide a comment
    Hide { id: i64 },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Author { action } => handle_author_action(action, authoring(&pool)).await?,
        Commands::Post { action } => handle_post_action(action, authoring(&pool)).await?,
        Commands::Comment { action } => handle_comment_action(action, &pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

fn authoring(pool: &PgPool) -> Authoring {
    let pool = Arc::new(pool.clone());
    AuthoringService::new(
        Arc::new(PgPostRepository::new(pool.clone())),
        Arc::new(PgTagRepository::new(pool.clone())),
        Arc::new(PgAuthorRepository::new(pool)),
    )
}

async fn handle_author_action(action: AuthorAction, service: Authoring) -> Result<()> {
    match action {
        AuthorAction::Create { username, email } => {
            println!("{}", "👤 Create Author".bright_blue().bold());
            println!();

            let username = match username {
                Some(u) => u,
                None => Input::new().with_prompt("Username").interact_text()?,
            };
            let email = match email {
                Some(e) => e,
                None => Input::new()
                    .with_prompt("Email")
                    .allow_empty(true)
                    .interact_text()?,
            };

            let author = service.create_author(&username, &email).await?;

            println!(
                "{} {} (id {})",
                "✅ Author created:".green().bold(),
                author.username.cyan(),
                author.id
            );
        }
        AuthorAction::List => {
            println!("{}", "📋 Authors".bright_blue().bold());
            println!();

            let authors = service.list_authors().await?;
            if authors.is_empty() {
                println!("{}", "  No authors found".yellow());
                return Ok(());
            }

            println!(
                "  {:<4} {:<20} {:<30} {}",
                "ID".bright_white().bold(),
                "Username".bright_white().bold(),
                "Email".bright_white().bold(),
                "Created".bright_white().bold()
            );
            println!("  {}", "─".repeat(75).bright_black());

            for author in &authors {
                println!(
                    "  {:<4} {:<20} {:<30} {}",
                    author.id.to_string().bright_black(),
                    author.username.cyan(),
                    author.email,
                    author
                        .created_at
                        .format("%Y-%m-%d %H:%M")
                        .to_string()
                        .bright_black()
                );
            }
            println!();
        }
    }

    Ok(())
}

async fn handle_post_action(action: PostAction, service: Authoring) -> Result<()> {
    match action {
        PostAction::Create {
            author,
            title,
            slug,
            body,
            body_file,
            tags,
            publish,
            yes,
        } => {
            println!("{}", "📝 Create Post".bright_blue().bold());
            println!();

            let title = match title {
                Some(t) => t,
                None => Input::new().with_prompt("Title").interact_text()?,
            };

            let body = match (body, body_file) {
                (Some(b), _) => b,
                (None, Some(path)) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                (None, None) => Input::new().with_prompt("Body").interact_text()?,
            };

            if !yes {
                println!("  Title:  {}", title.cyan());
                println!("  Author: {}", author.cyan());
                println!(
                    "  Status: {}",
                    if publish { "published".green() } else { "draft".yellow() }
                );
                println!();

                let confirmed = Confirm::new()
                    .with_prompt("Create this post?")
                    .default(true)
                    .interact()?;

                if !confirmed {
                    println!("{}", "❌ Cancelled".red());
                    return Ok(());
                }
            }

            let post = service
                .create_post(PostDraft {
                    author,
                    title,
                    slug,
                    body,
                    tags,
                    publish,
                })
                .await?;

            println!();
            println!("{}", "✅ Post created successfully!".green().bold());
            print_post_details(&post);
        }
        PostAction::List {
            status,
            search,
            author,
        } => {
            println!("{}", "📋 Posts".bright_blue().bold());
            println!();

            let posts = service
                .list_posts(PostFilter {
                    status: status.map(PostStatus::from),
                    search,
                    author,
                })
                .await?;

            if posts.is_empty() {
                println!("{}", "  No posts found".yellow());
                return Ok(());
            }

            println!(
                "  {:<4} {:<40} {:<12} {:<10} {:<17} {}",
                "ID".bright_white().bold(),
                "Title".bright_white().bold(),
                "Author".bright_white().bold(),
                "Status".bright_white().bold(),
                "Publish".bright_white().bold(),
                "Tags".bright_white().bold()
            );
            println!("  {}", "─".repeat(100).bright_black());

            for post in &posts {
                let status = if post.is_published() {
                    "published".green()
                } else {
                    "draft".yellow()
                };

                println!(
                    "  {:<4} {:<40} {:<12} {:<10} {:<17} {}",
                    post.id.to_string().bright_black(),
                    truncate(&post.title, 40).cyan(),
                    post.author,
                    status,
                    post.publish.format("%Y-%m-%d %H:%M").to_string().bright_black(),
                    post.tag_names()
                );
            }

            println!();
            println!("  Total: {}", posts.len().to_string().bright_white().bold());
            println!();
        }
        PostAction::Publish { id } => {
            let post = service.set_post_status(id, PostStatus::Published).await?;
            println!("{} {}", "✅ Published:".green().bold(), post.title.cyan());
            println!("  Path: {}", post.absolute_path().bright_white());
        }
        PostAction::Unpublish { id } => {
            let confirmed = Confirm::new()
                .with_prompt(format!("Move post {id} back to draft?"))
                .default(false)
                .interact()?;

            if !confirmed {
                println!("{}", "❌ Cancelled".red());
                return Ok(());
            }

            let post = service.set_post_status(id, PostStatus::Draft).await?;
            println!("{} {}", "✅ Moved to draft:".green().bold(), post.title.cyan());
        }
        PostAction::Tag { id, tags } => {
            let post = service.retag_post(id, &tags).await?;
            println!(
                "{} {} → [{}]",
                "✅ Tags updated:".green().bold(),
                post.title.cyan(),
                post.tag_names()
            );
        }
    }

    Ok(())
}

fn print_post_details(post: &Post) {
    println!();
    println!("  ID:     {}", post.id.to_string().bright_white());
    println!("  Title:  {}", post.title.cyan());
    println!("  Slug:   {}", post.slug);
    println!("  Status: {}", post.status);
    println!("  Tags:   {}", post.tag_names());
    if post.is_published() {
        println!("  Path:   {}", post.absolute_path().bright_white());
    }
    println!();
}

async fn handle_comment_action(action: CommentAction, pool: &PgPool) -> Result<()> {
    let service = CommentService::new(Arc::new(PgCommentRepository::new(Arc::new(pool.clone()))));

    match action {
        CommentAction::List {
            active,
            inactive,
            search,
        } => {
            println!("{}", "💬 Comments".bright_blue().bold());
            println!();

            let filter = CommentFilter {
                active: match (active, inactive) {
                    (true, _) => Some(true),
                    (_, true) => Some(false),
                    _ => None,
                },
                search,
            };

            let comments = service.search(filter).await?;
            if comments.is_empty() {
                println!("{}", "  No comments found".yellow());
                return Ok(());
            }

            for comment in &comments {
                let state = if comment.active {
                    "ACTIVE".green()
                } else {
                    "PENDING".yellow()
                };

                println!(
                    "  #{} on post {}  {}  {} <{}>  {}",
                    comment.id.to_string().bright_white().bold(),
                    comment.post_id,
                    state,
                    comment.name.cyan(),
                    comment.email,
                    comment.created.format("%Y-%m-%d %H:%M").to_string().bright_black()
                );
                println!("    {}", truncate(&comment.body, 100));
            }

            println!();
            println!("  Total: {}", comments.len().to_string().bright_white().bold());
            println!();
        }
        CommentAction::Approve { id } => {
            service.moderate(id, true).await?;
            println!("{}", format!("✅ Comment {id} approved").green().bold());
        }
        CommentAction::Hide { id } => {
            service.moderate(id, false).await?;
            println!("{}", format!("✅ Comment {id} hidden").green().bold());
        }
    }

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let posts: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts")
                .fetch_one(pool)
                .await?;

            let pending: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE active = FALSE")
                    .fetch_one(pool)
                    .await?;

            println!("  PostgreSQL:       {}", version.bright_white());
            println!("  Posts:            {}", posts.to_string().bright_green().bold());
            println!("  Pending comments: {}", pending.to_string().bright_yellow().bold());
            println!();
        }
    }

    Ok(())
}

/// Shortens text to `max` characters for table output.
fn truncate(text: &str, max: usize) -> String {
    let single_line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if single_line.chars().count() <= max {
        return single_line;
    }
    let mut short: String = single_line.chars().take(max.saturating_sub(1)).collect();
    short.push('…');
    short
}

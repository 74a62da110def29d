//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`            - Redirect to `/blog`
//! - `GET  /health`      - Health check: database, mail (public)
//! - `/blog/*`           - Blog pages
//! - `/static/*`         - Static assets
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket, stricter on the share page
//! - **Path normalization** - Trailing slash handling

use crate::api::handlers::health_handler;
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;
use crate::web;
use axum::Router;
use axum::response::Redirect;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    let blog_router = Router::new()
        .merge(web::routes::public_routes().layer(rate_limit::layer(behind_proxy)))
        .merge(web::routes::share_routes().layer(rate_limit::secure_layer(behind_proxy)));

    let router = Router::new()
        .route("/", get(|| async { Redirect::permanent("/blog") }))
        .route("/health", get(health_handler))
        .nest("/blog", blog_router)
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}


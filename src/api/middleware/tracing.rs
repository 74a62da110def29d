//! Request logging for the blog.
//!
//! Every request gets an `http` span carrying the method, the raw path and,
//! once routing has matched, the route template (`/blog/{year}/{month}/{day}/{slug}`).
//! Grouping by route keeps post slugs from exploding log cardinality.
//!
//! ```text
//! INFO http{method=GET path=/blog/2024/3/7/jazz route=/blog/{year}/{month}/{day}/{slug}}: request served status=200 latency_ms=4
//! ```

use axum::extract::MatchedPath;
use axum::http::Request;
use std::time::Duration;
use tower_http::classify::{ServerErrorsAsFailures, ServerErrorsFailureClass, SharedClassifier};
use tower_http::trace::TraceLayer;
use tracing::Span;

type MakeSpan = fn(&Request<axum::body::Body>) -> Span;
type OnResponse = fn(&axum::http::Response<axum::body::Body>, Duration, &Span);
type OnFailure = fn(ServerErrorsFailureClass, Duration, &Span);

/// Trace layer used by the application router.
pub type HttpTraceLayer = TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    MakeSpan,
    (),
    OnResponse,
    (),
    (),
    OnFailure,
>;

fn make_span(request: &Request<axum::body::Body>) -> Span {
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(MatchedPath::as_str)
        .unwrap_or("-");

    tracing::info_span!(
        "http",
        method = %request.method(),
        path = %request.uri().path(),
        route = route,
    )
}

fn on_response(response: &axum::http::Response<axum::body::Body>, latency: Duration, _span: &Span) {
    let status = response.status();
    let latency_ms = latency.as_millis() as u64;

    if status.is_client_error() {
        tracing::debug!(status = status.as_u16(), latency_ms, "request rejected");
    } else {
        tracing::info!(status = status.as_u16(), latency_ms, "request served");
    }
}

fn on_failure(failure: ServerErrorsFailureClass, latency: Duration, _span: &Span) {
    tracing::error!(
        failure = %failure,
        latency_ms = latency.as_millis() as u64,
        "request failed"
    );
}

/// Builds the request logging layer.
///
/// Client errors (mostly 404s for unknown posts) log at `DEBUG`; server
/// errors log at `ERROR` in addition to the response line.
pub fn layer() -> HttpTraceLayer {
    TraceLayer::new_for_http()
        .make_span_with(make_span as MakeSpan)
        .on_request(())
        .on_response(on_response as OnResponse)
        .on_body_chunk(())
        .on_eos(())
        .on_failure(on_failure as OnFailure)
}

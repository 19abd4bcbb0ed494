//! Issue-to-PRD Service
//!
//! HTTP service that fetches a GitHub issue, ranks relevant codebase files,
//! and returns a rendered PRD. Bind to 127.0.0.1 by default.

pub mod config;
pub mod error;
pub mod github;
mod handlers;
pub mod llm;
mod state;
pub mod types;

use std::any::Any;
use std::sync::Arc;

use axum::extract::Request;
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

pub use config::ServiceConfig;
pub use handlers::{analyze_issue, health};
pub use state::AppState;

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
  let msg = err
    .downcast_ref::<String>()
    .map(String::as_str)
    .or_else(|| err.downcast_ref::<&str>().copied())
    .unwrap_or("unknown panic");
  tracing::error!(panic = msg, "handler panicked");
  error::detail(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
}

pub fn build_router(state: Arc<AppState>) -> Router {
  Router::new()
    .route("/health", get(health))
    .route("/analyze-issue", post(analyze_issue))
    .layer(CatchPanicLayer::custom(panic_response))
    .layer(TraceLayer::new_for_http().make_span_with(|req: &Request| {
      tracing::info_span!(
        "request",
        request_id = %Uuid::new_v4(),
        method = %req.method(),
        uri = %req.uri()
      )
    }))
    .layer(CorsLayer::permissive())
    .with_state(state)
}

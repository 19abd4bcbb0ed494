//! HTTP error mapping: fetch failures are the caller's problem (400),
//! composition failures are ours (500).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use prd_composer::ComposeError;
use thiserror::Error;

use crate::github::FetchError;

#[derive(Debug, Error)]
pub enum ApiError {
  #[error("Failed to fetch GitHub issue: {0}")]
  Fetch(#[from] FetchError),

  #[error("Failed to generate PRD document: {0}")]
  Compose(#[from] ComposeError),
}

impl ApiError {
  pub fn status(&self) -> StatusCode {
    match self {
      Self::Fetch(_) => StatusCode::BAD_REQUEST,
      Self::Compose(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

/// `{"detail": "..."}` body shared by every error response.
pub fn detail(status: StatusCode, msg: impl Into<String>) -> Response {
  (status, Json(serde_json::json!({ "detail": msg.into() }))).into_response()
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    detail(self.status(), self.to_string())
  }
}

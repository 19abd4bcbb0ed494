//! Composition errors. Only the agent-assisted path produces them; the
//! template composer cannot fail.

use issue_analyzer::AnalyzerError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ComposeError {
  #[error("agent backend: {0}")]
  Backend(#[from] AnalyzerError),

  #[error("json: {0}")]
  Json(#[from] serde_json::Error),

  #[error("incomplete document: {0}")]
  Incomplete(String),
}

impl ComposeError {
  pub fn incomplete(msg: impl Into<String>) -> Self {
    Self::Incomplete(msg.into())
  }
}

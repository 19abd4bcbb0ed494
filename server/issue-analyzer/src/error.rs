//! Structured error types for the analyzer.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyzerError {
  #[error("codebase root {}: {reason}", .path.display())]
  CodebaseRoot { path: PathBuf, reason: String },

  #[error("agent: {0}")]
  Agent(String),

  #[error("json: {0}")]
  Json(#[from] serde_json::Error),

  #[error("task: {0}")]
  Task(String),
}

impl AnalyzerError {
  pub fn codebase_root(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
    Self::CodebaseRoot {
      path: path.into(),
      reason: reason.into(),
    }
  }

  pub fn agent(msg: impl Into<String>) -> Self {
    Self::Agent(msg.into())
  }
}

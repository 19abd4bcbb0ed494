//! Optional language-model backend used by the agent-assisted variants.

use async_trait::async_trait;

use crate::error::AnalyzerError;

/// A text-completion backend. Implementations live outside this crate
/// (the service wires an OpenAI-compatible client).
#[async_trait]
pub trait AgentBackend: Send + Sync {
  async fn complete(&self, prompt: &str) -> Result<String, AnalyzerError>;

  /// Short label for health output, e.g. the model name.
  fn describe(&self) -> String;
}

/// Strip a surrounding markdown code fence (```json ... ```) if present.
pub fn strip_code_fence(raw: &str) -> &str {
  let mut s = raw.trim();
  if let Some(rest) = s.strip_prefix("```json") {
    s = rest;
  } else if let Some(rest) = s.strip_prefix("```") {
    s = rest;
  }
  if let Some(rest) = s.strip_suffix("```") {
    s = rest;
  }
  s.trim()
}

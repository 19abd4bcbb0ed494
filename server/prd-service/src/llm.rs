//! OpenAI-compatible chat-completions backend for the agent-assisted
//! analyzer and composer.

use std::time::Duration;

use async_trait::async_trait;
use issue_analyzer::{AgentBackend, AnalyzerError};
use serde::Serialize;
use tracing::debug;

use crate::config::LlmConfig;

#[derive(Debug, Clone, Serialize)]
struct Message<'a> {
  role: &'static str,
  content: &'a str,
}

pub struct ChatBackend {
  client: reqwest::Client,
  base_url: String,
  model: String,
  api_key: String,
}

impl ChatBackend {
  pub fn new(config: &LlmConfig) -> Result<Self, AnalyzerError> {
    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(120))
      .build()
      .map_err(|e| AnalyzerError::agent(format!("failed to create HTTP client: {e}")))?;
    Ok(Self {
      client,
      base_url: config.base_url.clone(),
      model: config.model.clone(),
      api_key: config.api_key.clone(),
    })
  }

  /// Resolve the chat completions endpoint from the base URL.
  fn endpoint(&self) -> String {
    let base = self.base_url.trim_end_matches('/');
    if base.ends_with("/chat/completions") {
      base.to_string()
    } else if base.ends_with("/v1") {
      format!("{}/chat/completions", base)
    } else {
      format!("{}/v1/chat/completions", base)
    }
  }
}

#[async_trait]
impl AgentBackend for ChatBackend {
  async fn complete(&self, prompt: &str) -> Result<String, AnalyzerError> {
    let messages = [Message {
      role: "user",
      content: prompt,
    }];
    let body = serde_json::json!({
      "model": self.model,
      "messages": messages,
      "temperature": 0.2,
    });

    let resp = self
      .client
      .post(self.endpoint())
      .bearer_auth(&self.api_key)
      .json(&body)
      .send()
      .await
      .map_err(|e| AnalyzerError::agent(format!("LLM request failed: {e}")))?;
    let status = resp.status();
    if !status.is_success() {
      return Err(AnalyzerError::agent(format!("LLM returned {status}")));
    }
    let json: serde_json::Value = resp
      .json()
      .await
      .map_err(|e| AnalyzerError::agent(format!("failed to parse LLM JSON: {e}")))?;

    let content = json["choices"]
      .get(0)
      .and_then(|c| c["message"]["content"].as_str())
      .unwrap_or("");
    if content.trim().is_empty() {
      return Err(AnalyzerError::agent("LLM returned no content"));
    }
    debug!(model = %self.model, chars = content.len(), "LLM completion received");
    Ok(content.to_string())
  }

  fn describe(&self) -> String {
    self.model.clone()
  }
}

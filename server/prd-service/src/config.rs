//! Service configuration from the environment (`.env` is loaded first).

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct GitHubConfig {
  pub api_url: String,
  pub token: Option<String>,
}

impl Default for GitHubConfig {
  fn default() -> Self {
    Self {
      api_url: "https://api.github.com".into(),
      token: None,
    }
  }
}

/// OpenAI-compatible chat endpoint. Present only when an API key is set.
#[derive(Debug, Clone)]
pub struct LlmConfig {
  pub base_url: String,
  pub model: String,
  pub api_key: String,
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
  pub host: IpAddr,
  pub port: u16,
  pub codebase_path: PathBuf,
  pub github: GitHubConfig,
  pub llm: Option<LlmConfig>,
}

impl Default for ServiceConfig {
  fn default() -> Self {
    Self {
      host: IpAddr::from([127, 0, 0, 1]),
      port: 8000,
      codebase_path: PathBuf::from("."),
      github: GitHubConfig::default(),
      llm: None,
    }
  }
}

fn var(key: &str) -> Option<String> {
  dotenv::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl ServiceConfig {
  pub fn from_env() -> Result<Self> {
    let _ = dotenv::dotenv();
    Self::from_lookup(var)
  }

  /// Build from any key lookup; `from_env` passes the process environment.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let defaults = Self::default();

    let host = match lookup("HOST") {
      Some(h) => h.parse().with_context(|| format!("HOST must be an IP address, got {h:?}"))?,
      None => defaults.host,
    };
    let port = match lookup("PORT") {
      Some(p) => p.parse().with_context(|| format!("PORT must be a valid u16, got {p:?}"))?,
      None => defaults.port,
    };

    let github = GitHubConfig {
      api_url: lookup("GITHUB_API_URL").unwrap_or(defaults.github.api_url),
      token: lookup("GITHUB_TOKEN"),
    };

    let llm = lookup("LLM_API_KEY")
      .or_else(|| lookup("OPENAI_API_KEY"))
      .map(|api_key| LlmConfig {
        base_url: lookup("LLM_BASE_URL").unwrap_or_else(|| "https://api.openai.com/v1".into()),
        model: lookup("LLM_MODEL").unwrap_or_else(|| "gpt-4o-mini".into()),
        api_key,
      });

    Ok(Self {
      host,
      port,
      codebase_path: lookup("CODEBASE_PATH").map(PathBuf::from).unwrap_or(defaults.codebase_path),
      github,
      llm,
    })
  }

  pub fn addr(&self) -> SocketAddr {
    SocketAddr::new(self.host, self.port)
  }
}

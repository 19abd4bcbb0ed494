//! Binary entrypoint for the PRD service.

use std::sync::Arc;

use anyhow::Context;
use issue_analyzer::{AgentBackend, AnalyzerConfig, HeuristicAnalyzer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use prd_service::github::GitHubClient;
use prd_service::llm::ChatBackend;
use prd_service::{build_router, AppState, ServiceConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  let config = ServiceConfig::from_env()?;

  let fetcher = Arc::new(GitHubClient::new(&config.github)?);
  if config.github.token.is_none() {
    info!("GITHUB_TOKEN not set, using unauthenticated GitHub API");
  }

  let backend: Option<Arc<dyn AgentBackend>> = match &config.llm {
    Some(llm) => {
      let backend = ChatBackend::new(llm)?;
      info!(model = %llm.model, "agent-assisted mode enabled");
      Some(Arc::new(backend))
    }
    None => {
      info!("no LLM API key, using heuristic analysis and template PRDs");
      None
    }
  };

  let analyzer = HeuristicAnalyzer::new(AnalyzerConfig::with_root(&config.codebase_path));
  let state = Arc::new(AppState::new(fetcher, analyzer, backend));
  let app = build_router(state);

  let addr = config.addr();
  info!(%addr, codebase = %config.codebase_path.display(), "prd-service listening");

  let listener = tokio::net::TcpListener::bind(addr)
    .await
    .with_context(|| format!("failed to bind {addr}"))?;
  axum::serve(listener, app).await?;

  Ok(())
}

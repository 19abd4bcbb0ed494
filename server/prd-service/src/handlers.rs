//! HTTP handlers for the PRD service.

use std::sync::Arc;

use axum::{extract::State, Json};
use issue_analyzer::{degraded_result, AnalysisResult, Issue};
use tracing::{info, warn};

use crate::error::ApiError;
use crate::state::AppState;
use crate::types::{AgentStatus, AnalyzeRequest, AnalyzeResponse, HealthResponse, IssueSummary, ServiceStatus};

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
  let agent = state.agent.is_some();
  let pick = |on: &str, off: &str| if agent { on.to_string() } else { off.to_string() };

  Json(HealthResponse {
    status: "healthy".into(),
    services: ServiceStatus {
      github_api: if state.fetcher.is_authenticated() {
        "connected".into()
      } else {
        "not_configured".into()
      },
      codebase_analyzer: pick("initialized", "fallback_mode"),
      prd_generator: pick("initialized", "template_mode"),
      agent: AgentStatus {
        available: agent,
        mode: pick("agent_assisted", "heuristic"),
      },
    },
  })
}

/// Runs the analyzer on its own task so a panic inside it degrades to a
/// keyword-only result instead of failing the request.
async fn analyze(state: &AppState, issue: &Issue) -> AnalysisResult {
  let analyzer = Arc::clone(&state.analyzer);
  let owned = issue.clone();
  match tokio::spawn(async move { analyzer.analyze(&owned).await }).await {
    Ok(result) => result,
    Err(e) => {
      warn!(issue = issue.number, error = %e, "analysis task failed, using keyword-only result");
      degraded_result(issue)
    }
  }
}

pub async fn analyze_issue(
  State(state): State<Arc<AppState>>,
  Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
  let issue = state.fetcher.fetch_issue(&req.github_url).await.map_err(|e| {
    warn!(url = %req.github_url, error = %e, "issue fetch failed");
    ApiError::from(e)
  })?;

  let analysis = analyze(&state, &issue).await;
  let prd = state.composer.compose(&issue, &analysis).await?;

  info!(
    issue = issue.number,
    files = analysis.relevant_files.len(),
    keywords = analysis.keywords.len(),
    "PRD generated"
  );

  Ok(Json(AnalyzeResponse {
    related_files: analysis.file_paths(),
    issue_keywords: analysis.keyword_list(),
    prd_document: prd.to_markdown(),
    analysis_summary: analysis.summary,
    semantic_concepts: analysis.semantic_concepts,
    issue: IssueSummary {
      title: issue.title,
      body: issue.body,
    },
  }))
}

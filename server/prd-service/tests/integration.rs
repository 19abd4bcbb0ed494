//! Router tests: fake fetcher, real analyzer over a temp codebase.

use std::fs;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use issue_analyzer::{AgentBackend, AnalysisResult, AnalyzerConfig, AnalyzerError, HeuristicAnalyzer, Issue};
use prd_composer::{ComposeError, Composer, ComposerMode, PrdDocument};
use prd_service::github::{parse_issue_url, FetchError, IssueFetcher};
use prd_service::types::{AnalyzeResponse, HealthResponse};
use prd_service::{build_router, AppState};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

struct FakeFetcher {
  authenticated: bool,
}

#[async_trait]
impl IssueFetcher for FakeFetcher {
  async fn fetch_issue(&self, url: &str) -> Result<Issue, FetchError> {
    let loc = parse_issue_url(url)?;
    if loc.number == 404 {
      return Err(FetchError::upstream("GitHub API returned 404 Not Found"));
    }
    Ok(
      serde_json::from_value(serde_json::json!({
        "id": 9001,
        "number": loc.number,
        "title": "App hangs forever in FastAPI",
        "body": "calling agent.do() inside an async endpoint causes it to hang forever",
        "user": {"login": "reporter", "id": 7},
        "labels": [],
        "state": "open",
        "created_at": "2025-01-15T10:30:00Z",
        "updated_at": "2025-01-15T10:30:00Z",
        "html_url": url
      }))
      .unwrap(),
    )
  }

  fn is_authenticated(&self) -> bool {
    self.authenticated
  }
}

struct BrokenComposer;

#[async_trait]
impl Composer for BrokenComposer {
  async fn compose(&self, _issue: &Issue, _analysis: &AnalysisResult) -> Result<PrdDocument, ComposeError> {
    Err(ComposeError::incomplete("no sections"))
  }

  fn mode(&self) -> ComposerMode {
    ComposerMode::Template
  }
}

struct OfflineBackend;

#[async_trait]
impl AgentBackend for OfflineBackend {
  async fn complete(&self, _prompt: &str) -> Result<String, AnalyzerError> {
    Err(AnalyzerError::agent("offline"))
  }

  fn describe(&self) -> String {
    "offline-model".into()
  }
}

fn codebase() -> TempDir {
  let dir = TempDir::new().unwrap();
  let agent = dir.path().join("src/upsonic/agent");
  fs::create_dir_all(&agent).unwrap();
  fs::write(agent.join("agent.py"), "class Agent:\n    async def do_async(self): ...\n").unwrap();
  dir
}

fn state(dir: &TempDir, backend: Option<Arc<dyn AgentBackend>>) -> Arc<AppState> {
  Arc::new(AppState::new(
    Arc::new(FakeFetcher { authenticated: false }),
    HeuristicAnalyzer::new(AnalyzerConfig::with_root(dir.path())),
    backend,
  ))
}

async fn post_analyze(state: Arc<AppState>, url: &str) -> (StatusCode, Value) {
  let body = serde_json::json!({ "github_url": url }).to_string();
  let resp = build_router(state)
    .oneshot(
      Request::builder()
        .method("POST")
        .uri("/analyze-issue")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap(),
    )
    .await
    .unwrap();
  let status = resp.status();
  let bytes = resp.into_body().collect().await.unwrap().to_bytes();
  (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn analyze_issue_returns_prd() {
  let dir = codebase();
  let (status, json) = post_analyze(state(&dir, None), "https://github.com/acme/agentkit/issues/17").await;
  assert_eq!(status, StatusCode::OK);

  let resp: AnalyzeResponse = serde_json::from_value(json).unwrap();
  assert_eq!(resp.issue.title, "App hangs forever in FastAPI");
  assert_eq!(resp.related_files, vec!["src/upsonic/agent/agent.py"]);
  assert!(resp.prd_document.starts_with("# PRD: App hangs forever in FastAPI"));
  assert!(resp.prd_document.contains("### src/upsonic/agent/agent.py\n**Reason:** Agent async/sync method implementation\n"));
  assert!(resp.issue_keywords.contains(&"do_async".to_string()));
  assert!(resp.semantic_concepts.contains(&"async".to_string()));
  assert!(resp.analysis_summary.starts_with("Heuristic analysis"));
}

#[tokio::test]
async fn invalid_locator_is_bad_request() {
  let dir = codebase();
  let (status, json) = post_analyze(state(&dir, None), "https://github.com/acme/agentkit/pull/3").await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  let detail = json["detail"].as_str().unwrap();
  assert!(detail.starts_with("Failed to fetch GitHub issue: invalid GitHub issue URL"));
}

#[tokio::test]
async fn upstream_failure_is_bad_request_with_cause() {
  let dir = codebase();
  let (status, json) = post_analyze(state(&dir, None), "https://github.com/acme/agentkit/issues/404").await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(
    json["detail"],
    "Failed to fetch GitHub issue: GitHub API returned 404 Not Found"
  );
}

#[tokio::test]
async fn missing_codebase_degrades_instead_of_failing() {
  let state = Arc::new(AppState::new(
    Arc::new(FakeFetcher { authenticated: false }),
    HeuristicAnalyzer::new(AnalyzerConfig::with_root("/no/such/codebase")),
    None,
  ));
  let (status, json) = post_analyze(state, "https://github.com/acme/agentkit/issues/17").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(json["related_files"], serde_json::json!([]));
  assert_eq!(json["analysis_summary"], "Automated analysis unavailable, manual review recommended");
  assert!(json["prd_document"].as_str().unwrap().contains("src/upsonic/agent/agent.py"));
}

#[tokio::test]
async fn composer_failure_is_server_error() {
  let dir = codebase();
  let mut st = AppState::new(
    Arc::new(FakeFetcher { authenticated: false }),
    HeuristicAnalyzer::new(AnalyzerConfig::with_root(dir.path())),
    None,
  );
  st.composer = Arc::new(BrokenComposer);
  let (status, json) = post_analyze(Arc::new(st), "https://github.com/acme/agentkit/issues/17").await;
  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  assert_eq!(
    json["detail"],
    "Failed to generate PRD document: incomplete document: no sections"
  );
}

#[tokio::test]
async fn offline_agent_falls_back_to_deterministic_output() {
  let dir = codebase();
  let url = "https://github.com/acme/agentkit/issues/17";
  let (_, heuristic) = post_analyze(state(&dir, None), url).await;
  let (status, agent) = post_analyze(state(&dir, Some(Arc::new(OfflineBackend))), url).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(agent, heuristic);
}

#[tokio::test]
async fn health_reports_modes() {
  let dir = codebase();
  let resp = build_router(state(&dir, Some(Arc::new(OfflineBackend))))
    .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
    .await
    .unwrap();
  assert_eq!(resp.status(), StatusCode::OK);
  let bytes = resp.into_body().collect().await.unwrap().to_bytes();
  let health: HealthResponse = serde_json::from_slice(&bytes).unwrap();
  assert_eq!(health.status, "healthy");
  assert_eq!(health.services.github_api, "not_configured");
  assert_eq!(health.services.codebase_analyzer, "initialized");
  assert_eq!(health.services.prd_generator, "initialized");
  assert!(health.services.agent.available);
  assert_eq!(health.services.agent.mode, "agent_assisted");

  let resp = build_router(state(&dir, None))
    .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
    .await
    .unwrap();
  let bytes = resp.into_body().collect().await.unwrap().to_bytes();
  let health: HealthResponse = serde_json::from_slice(&bytes).unwrap();
  assert_eq!(health.services.prd_generator, "template_mode");
  assert_eq!(health.services.codebase_analyzer, "fallback_mode");
  assert!(!health.services.agent.available);
}

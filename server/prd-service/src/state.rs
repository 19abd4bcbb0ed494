//! Shared, read-only service state. Strategies are chosen once at startup.

use std::sync::Arc;

use issue_analyzer::{AgentAssistedAnalyzer, AgentBackend, Analyzer, HeuristicAnalyzer};
use prd_composer::{AgentAssistedComposer, Composer, TemplateComposer};

use crate::github::IssueFetcher;

pub struct AppState {
  pub fetcher: Arc<dyn IssueFetcher>,
  pub analyzer: Arc<dyn Analyzer>,
  pub composer: Arc<dyn Composer>,
  /// Backend label (model name) when agent-assisted mode is on.
  pub agent: Option<String>,
}

impl AppState {
  /// Agent-assisted analyzer and composer when a backend is given, otherwise
  /// the deterministic heuristic and template strategies.
  pub fn new(
    fetcher: Arc<dyn IssueFetcher>,
    heuristic: HeuristicAnalyzer,
    backend: Option<Arc<dyn AgentBackend>>,
  ) -> Self {
    match backend {
      Some(backend) => Self {
        fetcher,
        agent: Some(backend.describe()),
        analyzer: Arc::new(AgentAssistedAnalyzer::new(backend.clone(), heuristic)),
        composer: Arc::new(AgentAssistedComposer::new(backend)),
      },
      None => Self {
        fetcher,
        agent: None,
        analyzer: Arc::new(heuristic),
        composer: Arc::new(TemplateComposer),
      },
    }
  }
}

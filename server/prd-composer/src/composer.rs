//! Composer strategies: the deterministic template and an agent-assisted
//! variant that fills gaps from the template and falls back to it on error.

use std::sync::Arc;

use async_trait::async_trait;
use issue_analyzer::agent::{strip_code_fence, AgentBackend};
use issue_analyzer::analyzer::issue_context;
use issue_analyzer::{AnalysisResult, Issue};
use serde::Deserialize;
use tracing::{info, warn};

use crate::classify;
use crate::compose::{self, compose_template};
use crate::error::ComposeError;
use crate::suggestions;
use crate::types::{ComposerMode, FileModification, PrdDocument, UseCase};

#[async_trait]
pub trait Composer: Send + Sync {
  async fn compose(&self, issue: &Issue, analysis: &AnalysisResult) -> Result<PrdDocument, ComposeError>;

  fn mode(&self) -> ComposerMode;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateComposer;

#[async_trait]
impl Composer for TemplateComposer {
  async fn compose(&self, issue: &Issue, analysis: &AnalysisResult) -> Result<PrdDocument, ComposeError> {
    Ok(compose_template(issue, analysis))
  }

  fn mode(&self) -> ComposerMode {
    ComposerMode::Template
  }
}

// ---------------------------------------------------------------------------
// Agent-assisted
// ---------------------------------------------------------------------------

const MIN_AGENT_CONSTRAINTS: usize = 2;

#[derive(Debug, Deserialize)]
struct AgentUseCase {
  title: Option<String>,
  description: Option<String>,
  acceptance_criteria: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct AgentFileModification {
  #[serde(default)]
  file_path: String,
  reason: Option<String>,
  suggested_changes: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AgentPrd {
  title: Option<String>,
  overview: Option<String>,
  problem_statement: Option<String>,
  #[serde(default)]
  use_cases: Vec<AgentUseCase>,
  #[serde(default)]
  file_modifications: Vec<AgentFileModification>,
  #[serde(default)]
  constraints: Vec<String>,
}

pub struct AgentAssistedComposer {
  backend: Arc<dyn AgentBackend>,
}

impl AgentAssistedComposer {
  pub fn new(backend: Arc<dyn AgentBackend>) -> Self {
    Self { backend }
  }

  async fn try_agent(&self, issue: &Issue, analysis: &AnalysisResult) -> Result<PrdDocument, ComposeError> {
    let raw = self.backend.complete(&prd_prompt(issue, analysis)).await?;
    let parsed: AgentPrd = serde_json::from_str(strip_code_fence(&raw))?;
    fill_from_template(parsed, issue, analysis)
  }
}

#[async_trait]
impl Composer for AgentAssistedComposer {
  async fn compose(&self, issue: &Issue, analysis: &AnalysisResult) -> Result<PrdDocument, ComposeError> {
    match self.try_agent(issue, analysis).await {
      Ok(doc) => {
        info!(issue = issue.number, files = doc.file_modifications.len(), "agent-assisted PRD composed");
        Ok(doc)
      }
      Err(e) => {
        warn!(issue = issue.number, error = %e, "agent composition failed, using template");
        Ok(compose_template(issue, analysis))
      }
    }
  }

  fn mode(&self) -> ComposerMode {
    ComposerMode::AgentAssisted
  }
}

fn non_empty(s: Option<String>) -> Option<String> {
  s.filter(|s| !s.trim().is_empty())
}

/// Missing or thin sections of the agent's document come from the template.
fn fill_from_template(
  agent: AgentPrd,
  issue: &Issue,
  analysis: &AnalysisResult,
) -> Result<PrdDocument, ComposeError> {
  let issue_type = classify::issue_type(issue);

  let use_cases: Vec<UseCase> = agent
    .use_cases
    .into_iter()
    .map(|uc| UseCase {
      title: non_empty(uc.title).unwrap_or_else(|| "Issue Resolution".to_string()),
      description: non_empty(uc.description).unwrap_or_else(|| format!("Resolve issue: {}", issue.title)),
      acceptance_criteria: uc
        .acceptance_criteria
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| vec!["Requirements are met".to_string()]),
    })
    .collect();

  let file_modifications: Vec<FileModification> = agent
    .file_modifications
    .into_iter()
    .filter(|m| !m.file_path.trim().is_empty())
    .map(|m| FileModification {
      file_path: m.file_path,
      reason: non_empty(m.reason).unwrap_or_else(|| "Identified as relevant".to_string()),
      suggested_changes: non_empty(m.suggested_changes)
        .unwrap_or_else(|| "Review and modify as needed".to_string()),
    })
    .collect();

  let doc = PrdDocument {
    title: non_empty(agent.title).unwrap_or_else(|| compose::title(issue)),
    overview: non_empty(agent.overview).unwrap_or_else(|| compose::overview(issue, issue_type)),
    problem_statement: non_empty(agent.problem_statement)
      .unwrap_or_else(|| compose::problem_statement(issue, analysis)),
    use_cases: if use_cases.is_empty() {
      compose::use_cases(issue, issue_type)
    } else {
      use_cases
    },
    file_modifications: if file_modifications.is_empty() {
      suggestions::file_modifications(issue, analysis)
    } else {
      file_modifications
    },
    constraints: if agent.constraints.len() < MIN_AGENT_CONSTRAINTS {
      compose::constraints(issue_type)
    } else {
      agent.constraints
    },
  };

  if doc.title.starts_with('#') {
    return Err(ComposeError::incomplete("title must be plain text"));
  }
  Ok(doc)
}

fn prd_prompt(issue: &Issue, analysis: &AnalysisResult) -> String {
  format!(
    "Create a Product Requirements Document for this GitHub issue.\n\n{}\n\
     Code analysis:\n{}\n\nRelevant files: {}\n\n\
     Respond with only a JSON object with these keys:\n\
     - \"title\", \"overview\", \"problem_statement\": strings\n\
     - \"use_cases\": [{{\"title\", \"description\", \"acceptance_criteria\": [strings]}}]\n\
     - \"file_modifications\": [{{\"file_path\", \"reason\", \"suggested_changes\"}}]\n\
     - \"constraints\": [strings]\n\
     Make file modifications specific and actionable with concrete file paths.\n",
    issue_context(issue),
    analysis.summary,
    analysis.file_paths().join(", ")
  )
}

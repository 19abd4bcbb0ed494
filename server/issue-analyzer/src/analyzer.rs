//! Analyzer strategies: the deterministic heuristic pipeline and an optional
//! agent-assisted decorator that falls back to it.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::agent::{strip_code_fence, AgentBackend};
use crate::concepts;
use crate::config::AnalyzerConfig;
use crate::discover;
use crate::error::AnalyzerError;
use crate::keywords::extract_keywords;
use crate::summary::{build_summary, DEGRADED_SUMMARY};
use crate::types::{AnalysisResult, AnalyzerMode, Issue, KeywordSet};

/// Maps an issue to keywords, ranked files, concepts, and a summary.
/// Never fails: problems degrade to a keyword-only result.
#[async_trait]
pub trait Analyzer: Send + Sync {
  async fn analyze(&self, issue: &Issue) -> AnalysisResult;

  fn mode(&self) -> AnalyzerMode;
}

/// Keyword-only result with no files, used whenever the scan cannot run.
pub fn degraded_result(issue: &Issue) -> AnalysisResult {
  AnalysisResult {
    keywords: extract_keywords(issue),
    relevant_files: Vec::new(),
    summary: DEGRADED_SUMMARY.to_string(),
    semantic_concepts: concepts::semantic_concepts(issue),
  }
}

// ---------------------------------------------------------------------------
// Heuristic
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct HeuristicAnalyzer {
  config: Arc<AnalyzerConfig>,
}

impl HeuristicAnalyzer {
  pub fn new(config: AnalyzerConfig) -> Self {
    Self {
      config: Arc::new(config),
    }
  }

  pub fn config(&self) -> &AnalyzerConfig {
    &self.config
  }

  /// Full pipeline; errors only when the codebase root cannot be scanned.
  pub fn try_analyze(&self, issue: &Issue) -> Result<AnalysisResult, AnalyzerError> {
    let keywords = extract_keywords(issue);
    let relevant_files = discover::discover_and_rank(&keywords, &self.config)?;
    let semantic_concepts = concepts::semantic_concepts(issue);
    let summary = build_summary(issue, &relevant_files, &keywords, &semantic_concepts, &self.config);
    debug!(
      issue = issue.number,
      keywords = keywords.len(),
      files = relevant_files.len(),
      "heuristic analysis complete"
    );
    Ok(AnalysisResult {
      keywords,
      relevant_files,
      summary,
      semantic_concepts,
    })
  }

  /// Blocking variant of [`Analyzer::analyze`].
  pub fn analyze_blocking(&self, issue: &Issue) -> AnalysisResult {
    match self.try_analyze(issue) {
      Ok(result) => result,
      Err(e) => {
        warn!(issue = issue.number, error = %e, "codebase analysis failed, using keyword-only result");
        degraded_result(issue)
      }
    }
  }
}

#[async_trait]
impl Analyzer for HeuristicAnalyzer {
  async fn analyze(&self, issue: &Issue) -> AnalysisResult {
    let this = self.clone();
    let owned = issue.clone();
    match tokio::task::spawn_blocking(move || this.analyze_blocking(&owned)).await {
      Ok(result) => result,
      Err(e) => {
        warn!(issue = issue.number, error = %e, "analysis task failed, using keyword-only result");
        degraded_result(issue)
      }
    }
  }

  fn mode(&self) -> AnalyzerMode {
    AnalyzerMode::Heuristic
  }
}

// ---------------------------------------------------------------------------
// Agent-assisted
// ---------------------------------------------------------------------------

/// JSON shape requested from the agent. Every field is optional.
#[derive(Debug, Default, Deserialize)]
struct AgentAnalysis {
  #[serde(default)]
  analysis: Option<String>,
  #[serde(default)]
  relevant_files: Vec<String>,
  #[serde(default)]
  issue_keywords: Vec<String>,
  #[serde(default)]
  semantic_concepts: Vec<String>,
}

/// Asks the agent for candidate files, verifies them against the codebase,
/// and delegates to the heuristic analyzer on any failure.
pub struct AgentAssistedAnalyzer {
  backend: Arc<dyn AgentBackend>,
  fallback: HeuristicAnalyzer,
}

impl AgentAssistedAnalyzer {
  pub fn new(backend: Arc<dyn AgentBackend>, fallback: HeuristicAnalyzer) -> Self {
    Self { backend, fallback }
  }

  async fn try_agent(&self, issue: &Issue) -> Result<AnalysisResult, AnalyzerError> {
    let raw = self.backend.complete(&analysis_prompt(issue)).await?;
    let parsed: AgentAnalysis = serde_json::from_str(strip_code_fence(&raw))?;

    let keywords: KeywordSet = if parsed.issue_keywords.is_empty() {
      extract_keywords(issue)
    } else {
      parsed
        .issue_keywords
        .iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
    };

    let config = self.fallback.config().clone();
    let candidates = parsed.relevant_files;
    let kw = keywords.clone();
    let relevant_files =
      tokio::task::spawn_blocking(move || discover::rank_candidates(&candidates, &kw, &config))
        .await
        .map_err(|e| AnalyzerError::Task(e.to_string()))?;
    if relevant_files.is_empty() {
      return Err(AnalyzerError::agent("no suggested file matched the codebase"));
    }

    let semantic_concepts = if parsed.semantic_concepts.is_empty() {
      concepts::semantic_concepts(issue)
    } else {
      parsed.semantic_concepts
    };
    let summary = match parsed.analysis {
      Some(text) if !text.trim().is_empty() => text,
      _ => build_summary(
        issue,
        &relevant_files,
        &keywords,
        &semantic_concepts,
        self.fallback.config(),
      ),
    };

    Ok(AnalysisResult {
      keywords,
      relevant_files,
      summary,
      semantic_concepts,
    })
  }
}

#[async_trait]
impl Analyzer for AgentAssistedAnalyzer {
  async fn analyze(&self, issue: &Issue) -> AnalysisResult {
    match self.try_agent(issue).await {
      Ok(result) => {
        info!(issue = issue.number, files = result.relevant_files.len(), "agent-assisted analysis complete");
        result
      }
      Err(e) => {
        warn!(issue = issue.number, error = %e, "agent analysis failed, falling back to heuristics");
        self.fallback.analyze(issue).await
      }
    }
  }

  fn mode(&self) -> AnalyzerMode {
    AnalyzerMode::AgentAssisted
  }
}

const MAX_PROMPT_COMMENTS: usize = 3;
const MAX_COMMENT_CHARS: usize = 200;

/// Issue context handed to the agent.
pub fn issue_context(issue: &Issue) -> String {
  let mut ctx = format!("Title: {}\n", issue.title);
  if let Some(body) = issue.body.as_deref().filter(|b| !b.is_empty()) {
    ctx.push_str(&format!("Description: {}\n", body));
  }
  if !issue.labels.is_empty() {
    let labels: Vec<&str> = issue.label_names().collect();
    ctx.push_str(&format!("Labels: {}\n", labels.join(", ")));
  }
  if !issue.comments.is_empty() {
    ctx.push_str("Comments:\n");
    for c in issue.comments.iter().take(MAX_PROMPT_COMMENTS) {
      let snippet: String = c.body.chars().take(MAX_COMMENT_CHARS).collect();
      ctx.push_str(&format!("- {}: {}...\n", c.user.login, snippet));
    }
  }
  ctx
}

fn analysis_prompt(issue: &Issue) -> String {
  format!(
    "Analyze this GitHub issue against the codebase and identify the source files most likely \
     to change.\n\n{}\n\
     Respond with only a JSON object with these keys:\n\
     - \"analysis\": short free-text analysis\n\
     - \"relevant_files\": file paths relative to the project root, most relevant first\n\
     - \"issue_keywords\": lowercase keywords\n\
     - \"semantic_concepts\": coarse topic tags\n",
    issue_context(issue)
  )
}

//! Issue data model (GitHub JSON contract) and analysis output types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// Issue (what the fetcher hands us; field names match the GitHub REST API)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitHubUser {
  pub login: String,
  pub id: u64,
  #[serde(default)]
  pub avatar_url: String,
  #[serde(default)]
  pub html_url: String,
}

/// Issue label. Duplicates are kept as-is if the source data has them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
  pub name: String,
  #[serde(default)]
  pub color: String,
  #[serde(default)]
  pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
  pub id: u64,
  pub user: GitHubUser,
  #[serde(default)]
  pub body: String,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
  Open,
  Closed,
}

/// A fetched issue. Immutable once built; lives for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
  pub id: u64,
  pub number: u64,
  pub title: String,
  #[serde(default)]
  pub body: Option<String>,
  pub user: GitHubUser,
  #[serde(default)]
  pub labels: Vec<Label>,
  pub state: IssueState,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
  pub html_url: String,
  #[serde(default)]
  pub comments: Vec<Comment>,
}

impl Issue {
  /// Body text, with an absent body treated as empty.
  pub fn body_text(&self) -> &str {
    self.body.as_deref().unwrap_or("")
  }

  pub fn label_names(&self) -> impl Iterator<Item = &str> {
    self.labels.iter().map(|l| l.name.as_str())
  }
}

// ---------------------------------------------------------------------------
// Analysis output
// ---------------------------------------------------------------------------

/// Lowercase keywords; a set, so ordering carries no meaning (sorted for stable output).
pub type KeywordSet = BTreeSet<String>;

/// A candidate source file with its relevance score and why it matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredFile {
  /// Path relative to the codebase root, `/`-separated.
  pub path: String,
  pub score: u32,
  /// e.g. `path:security`, `content:tool`, `semantic:agent`.
  pub reasons: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
  pub keywords: KeywordSet,
  /// Highest score first, at most `AnalyzerConfig::max_files` entries.
  pub relevant_files: Vec<ScoredFile>,
  pub summary: String,
  #[serde(default)]
  pub semantic_concepts: Vec<String>,
}

impl AnalysisResult {
  pub fn file_paths(&self) -> Vec<String> {
    self.relevant_files.iter().map(|f| f.path.clone()).collect()
  }

  pub fn keyword_list(&self) -> Vec<String> {
    self.keywords.iter().cloned().collect()
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalyzerMode {
  Heuristic,
  AgentAssisted,
}

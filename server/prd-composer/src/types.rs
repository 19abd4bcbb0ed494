//! PRD document model and issue classifications.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UseCase {
  pub title: String,
  pub description: String,
  pub acceptance_criteria: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileModification {
  pub file_path: String,
  pub reason: String,
  pub suggested_changes: String,
}

/// A composed PRD. Built once per request, rendered, then dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrdDocument {
  pub title: String,
  pub overview: String,
  pub problem_statement: String,
  pub use_cases: Vec<UseCase>,
  pub file_modifications: Vec<FileModification>,
  pub constraints: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
  BugFix,
  Feature,
  Documentation,
  Refactor,
  General,
}

impl IssueType {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::BugFix => "bug_fix",
      Self::Feature => "feature",
      Self::Documentation => "documentation",
      Self::Refactor => "refactor",
      Self::General => "general",
    }
  }

  /// Lead sentence of the overview section.
  pub fn overview_lead(self) -> &'static str {
    match self {
      Self::BugFix => "This PRD addresses a bug fix requirement",
      Self::Feature => "This PRD outlines the development of a new feature",
      Self::Documentation => "This PRD focuses on documentation improvements",
      Self::Refactor => "This PRD covers code refactoring and improvements",
      Self::General => "This PRD addresses the reported issue",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
  High,
  Medium,
  Low,
}

impl Priority {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::High => "High",
      Self::Medium => "Medium",
      Self::Low => "Low",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComposerMode {
  Template,
  AgentAssisted,
}

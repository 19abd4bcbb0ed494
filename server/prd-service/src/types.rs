//! Request/response types for the PRD service.

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
  pub github_url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct IssueSummary {
  pub title: String,
  pub body: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeResponse {
  pub issue: IssueSummary,
  pub related_files: Vec<String>,
  pub analysis_summary: String,
  pub prd_document: String,
  pub issue_keywords: Vec<String>,
  pub semantic_concepts: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AgentStatus {
  pub available: bool,
  pub mode: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceStatus {
  pub github_api: String,
  pub codebase_analyzer: String,
  pub prd_generator: String,
  pub agent: AgentStatus,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
  pub status: String,
  pub services: ServiceStatus,
}

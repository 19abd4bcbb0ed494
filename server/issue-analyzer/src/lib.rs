//! Issue Relevance Analyzer: keyword extraction and codebase file ranking for
//! GitHub issues. Heuristic mode is deterministic; no network, no state.
//! Used by the binary for stdin/stdout; also called as a library by the PRD service.

pub mod agent;
pub mod analyzer;
pub mod concepts;
pub mod config;
pub mod discover;
pub mod error;
pub mod keywords;
pub mod score;
pub mod summary;
pub mod triggers;
pub mod types;

#[cfg(test)]
mod test_support;

pub use agent::AgentBackend;
pub use analyzer::{degraded_result, AgentAssistedAnalyzer, Analyzer, HeuristicAnalyzer};
pub use config::AnalyzerConfig;
pub use error::AnalyzerError;
pub use keywords::extract_keywords;
pub use triggers::TriggerGroup;
pub use types::{AnalysisResult, AnalyzerMode, Issue, KeywordSet, Label, ScoredFile};

/// Run the heuristic pipeline on a parsed issue (blocking file I/O, no network).
pub fn run(issue: &Issue, config: AnalyzerConfig) -> AnalysisResult {
  HeuristicAnalyzer::new(config).analyze_blocking(issue)
}

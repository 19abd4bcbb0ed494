//! Analyzer configuration with sane defaults.

use std::path::PathBuf;

/// Scoring weights and scan limits for the heuristic analyzer.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
  /// Root directory scanned for candidate files.
  pub codebase_root: PathBuf,
  /// Points per keyword found in the relative path.
  pub path_weight: u32,
  /// Points per keyword found in the content sample.
  pub content_weight: u32,
  /// Flat bonus per semantic anchor (agent, server, security).
  pub semantic_bonus: u32,
  /// Leading lines read from each file as its content sample.
  pub sample_lines: usize,
  /// Max ranked files returned.
  pub max_files: usize,
  /// Directory names never descended into.
  pub excluded_dirs: Vec<String>,
  /// File extensions (no dot) treated as source files.
  pub source_extensions: Vec<String>,
}

impl AnalyzerConfig {
  pub fn with_root(root: impl Into<PathBuf>) -> Self {
    Self {
      codebase_root: root.into(),
      ..Self::default()
    }
  }
}

impl Default for AnalyzerConfig {
  fn default() -> Self {
    Self {
      codebase_root: PathBuf::from("."),
      path_weight: 5,
      content_weight: 2,
      semantic_bonus: 3,
      sample_lines: 30,
      max_files: 15,
      excluded_dirs: [".git", "__pycache__", ".pytest_cache", "node_modules", ".venv", "venv"]
        .iter()
        .map(|s| s.to_string())
        .collect(),
      source_extensions: [
        "py", "rs", "go", "js", "jsx", "ts", "tsx", "java", "kt", "rb", "php", "c", "h", "cc",
        "cpp", "hpp", "cs", "swift", "scala",
      ]
      .iter()
      .map(|s| s.to_string())
      .collect(),
    }
  }
}

//! Binary entrypoint: read one Issue JSON object from stdin, write one
//! AnalysisResult to stdout. The codebase root is the first argument (default `.`).

use issue_analyzer::{run, AnalyzerConfig, Issue};
use std::io::{self, Read, Write};

fn main() {
  if let Err(e) = run_binary() {
    let _ = writeln!(io::stderr(), "issue-analyzer error: {}", e);
    std::process::exit(1);
  }
}

fn run_binary() -> Result<(), Box<dyn std::error::Error>> {
  let root = std::env::args().nth(1).unwrap_or_else(|| ".".to_string());

  let mut raw = String::new();
  io::stdin().lock().read_to_string(&mut raw)?;
  let issue: Issue = serde_json::from_str(&raw)?;

  let out = run(&issue, AnalyzerConfig::with_root(root));
  let json = serde_json::to_vec(&out)?;
  io::stdout().write_all(&json)?;
  Ok(())
}

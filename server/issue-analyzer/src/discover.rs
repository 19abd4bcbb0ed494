//! File discovery and ranking under a codebase root.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::config::AnalyzerConfig;
use crate::error::AnalyzerError;
use crate::score;
use crate::types::{KeywordSet, ScoredFile};

/// Path substrings marking architecturally central files; these rank first.
pub const CORE_ANCHORS: &[&str] = &["__init__.py", "agent", "server", "tools", "safety"];

pub fn is_core_path(rel_path: &str) -> bool {
  CORE_ANCHORS.iter().any(|a| rel_path.contains(a))
}

/// Enumerate source files under `config.codebase_root` in a stable order,
/// as (absolute path, `/`-separated relative path) pairs.
pub fn source_files(config: &AnalyzerConfig) -> Result<Vec<(PathBuf, String)>, AnalyzerError> {
  let root = &config.codebase_root;
  let meta = std::fs::metadata(root)
    .map_err(|e| AnalyzerError::codebase_root(root, e.to_string()))?;
  if !meta.is_dir() {
    return Err(AnalyzerError::codebase_root(root, "not a directory"));
  }

  let mut files = Vec::new();
  let walker = WalkDir::new(root)
    .follow_links(false)
    .sort_by_file_name()
    .into_iter()
    .filter_entry(|e| e.depth() == 0 || !is_excluded_dir(e, config));

  for entry in walker.filter_map(|e| e.ok()) {
    if !entry.file_type().is_file() || !is_source_file(&entry, config) {
      continue;
    }
    let Ok(rel) = entry.path().strip_prefix(root) else {
      continue;
    };
    files.push((entry.path().to_path_buf(), to_slash_path(rel)));
  }
  Ok(files)
}

/// Rank source files by relevance to `keywords`: drop zero scores, sort by
/// score (stable), move core files ahead of the rest, keep the top
/// `config.max_files`. Files that cannot be read are skipped.
pub fn discover_and_rank(
  keywords: &KeywordSet,
  config: &AnalyzerConfig,
) -> Result<Vec<ScoredFile>, AnalyzerError> {
  let mut scored = Vec::new();

  for (abs, rel) in source_files(config)? {
    let sample = match read_sample(&abs, config.sample_lines) {
      Ok(s) => s,
      Err(e) => {
        tracing::debug!(path = %rel, error = %e, "skipping unreadable file");
        continue;
      }
    };
    let (score, reasons) = score::score_candidate(&rel, &sample, keywords, config);
    if score > 0 {
      scored.push(ScoredFile {
        path: rel,
        score,
        reasons,
      });
    }
  }

  Ok(prioritize(scored, config.max_files))
}

/// Score externally suggested paths (relative to the root) the same way
/// discovery does. Paths that escape the root, do not exist, cannot be read,
/// or score 0 are dropped.
pub fn rank_candidates(
  candidates: &[String],
  keywords: &KeywordSet,
  config: &AnalyzerConfig,
) -> Vec<ScoredFile> {
  let mut seen = std::collections::HashSet::new();
  let mut scored = Vec::new();

  for candidate in candidates {
    let rel = candidate.trim().trim_start_matches("./").trim_start_matches('/');
    let rel_path = Path::new(rel);
    if rel.is_empty()
      || rel_path
        .components()
        .any(|c| !matches!(c, std::path::Component::Normal(_)))
    {
      continue;
    }
    let rel = to_slash_path(rel_path);
    if !seen.insert(rel.clone()) {
      continue;
    }
    let abs = config.codebase_root.join(rel_path);
    if !abs.is_file() {
      continue;
    }
    let Ok(sample) = read_sample(&abs, config.sample_lines) else {
      continue;
    };
    let (score, reasons) = score::score_candidate(&rel, &sample, keywords, config);
    if score > 0 {
      scored.push(ScoredFile {
        path: rel,
        score,
        reasons,
      });
    }
  }

  prioritize(scored, config.max_files)
}

/// Sort descending by score (ties keep input order), then put core files
/// first with each group keeping its order, then truncate.
pub fn prioritize(mut files: Vec<ScoredFile>, max_files: usize) -> Vec<ScoredFile> {
  files.sort_by(|a, b| b.score.cmp(&a.score));
  let (mut core, other): (Vec<_>, Vec<_>) = files.into_iter().partition(|f| is_core_path(&f.path));
  core.extend(other);
  core.truncate(max_files);
  core
}

/// Upper bound on bytes read for one content sample.
pub const MAX_SAMPLE_BYTES: u64 = 64 * 1024;

/// First `lines` lines joined by a space, lowercased, reading at most
/// `MAX_SAMPLE_BYTES`. Fails on I/O or invalid UTF-8.
pub fn read_sample(path: &Path, lines: usize) -> io::Result<String> {
  let mut reader = BufReader::new(File::open(path)?.take(MAX_SAMPLE_BYTES));
  let mut sampled = Vec::with_capacity(lines);
  let mut buf = Vec::new();
  while sampled.len() < lines {
    buf.clear();
    if reader.read_until(b'\n', &mut buf)? == 0 {
      break;
    }
    let cut = buf.last() != Some(&b'\n');
    if !cut {
      buf.pop();
      if buf.last() == Some(&b'\r') {
        buf.pop();
      }
    }
    sampled.push(decode_line(&buf, cut)?);
  }
  Ok(sampled.join(" ").to_lowercase())
}

// A line cut at the byte limit may end inside a multi-byte character.
fn decode_line(bytes: &[u8], cut: bool) -> io::Result<String> {
  match std::str::from_utf8(bytes) {
    Ok(line) => Ok(line.to_string()),
    Err(e) if cut && e.error_len().is_none() => {
      Ok(String::from_utf8_lossy(&bytes[..e.valid_up_to()]).into_owned())
    }
    Err(e) => Err(io::Error::new(io::ErrorKind::InvalidData, e)),
  }
}

fn is_excluded_dir(entry: &DirEntry, config: &AnalyzerConfig) -> bool {
  entry.file_type().is_dir()
    && entry
      .file_name()
      .to_str()
      .map(|name| config.excluded_dirs.iter().any(|d| d == name))
      .unwrap_or(false)
}

fn is_source_file(entry: &DirEntry, config: &AnalyzerConfig) -> bool {
  let Some(name) = entry.file_name().to_str() else {
    return false;
  };
  if name.starts_with('.') {
    return false;
  }
  entry
    .path()
    .extension()
    .and_then(|e| e.to_str())
    .map(|ext| config.source_extensions.iter().any(|s| s.eq_ignore_ascii_case(ext)))
    .unwrap_or(false)
}

fn to_slash_path(rel: &Path) -> String {
  rel
    .components()
    .map(|c| c.as_os_str().to_string_lossy())
    .collect::<Vec<_>>()
    .join("/")
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::fs;
  use tempfile::TempDir;

  fn kw(words: &[&str]) -> KeywordSet {
    words.iter().map(|w| w.to_string()).collect()
  }

  fn write(root: &Path, rel: &str, content: &[u8]) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
  }

  fn paths(files: &[ScoredFile]) -> Vec<&str> {
    files.iter().map(|f| f.path.as_str()).collect()
  }

  #[test]
  fn excluded_dirs_and_hidden_files_are_skipped() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "src/cache.py", b"cache");
    write(dir.path(), ".git/hooks/cache.py", b"cache");
    write(dir.path(), "node_modules/pkg/cache.js", b"cache");
    write(dir.path(), "__pycache__/cache.py", b"cache");
    write(dir.path(), ".venv/lib/cache.py", b"cache");
    write(dir.path(), "src/.cache.py", b"cache");
    write(dir.path(), "notes/cache.txt", b"cache");

    let config = AnalyzerConfig::with_root(dir.path());
    let ranked = discover_and_rank(&kw(&["cache"]), &config).unwrap();
    assert_eq!(paths(&ranked), vec!["src/cache.py"]);
  }

  #[test]
  fn zero_score_files_are_excluded() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.py", b"pricing");
    write(dir.path(), "b.py", b"nothing relevant");
    let config = AnalyzerConfig::with_root(dir.path());
    let ranked = discover_and_rank(&kw(&["pricing"]), &config).unwrap();
    assert_eq!(paths(&ranked), vec!["a.py"]);
    assert!(ranked.iter().all(|f| f.score > 0));
  }

  #[test]
  fn path_match_ranks_above_content_match() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "lib/billing.py", b"# pricing table lives here");
    write(dir.path(), "lib/pricing.py", b"import os");
    let config = AnalyzerConfig::with_root(dir.path());
    let ranked = discover_and_rank(&kw(&["pricing"]), &config).unwrap();
    assert_eq!(paths(&ranked), vec!["lib/pricing.py", "lib/billing.py"]);
    assert!(ranked[0].score > ranked[1].score);
    assert_eq!(ranked[0].reasons, vec!["path:pricing"]);
    assert_eq!(ranked[1].reasons, vec!["content:pricing"]);
  }

  #[test]
  fn core_files_come_first_on_equal_score() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a_helpers/run.py", b"blocking call");
    write(dir.path(), "b_agent/run.py", b"blocking call");
    let config = AnalyzerConfig::with_root(dir.path());
    let ranked = discover_and_rank(&kw(&["blocking"]), &config).unwrap();
    assert_eq!(ranked[0].score, ranked[1].score);
    assert_eq!(paths(&ranked), vec!["b_agent/run.py", "a_helpers/run.py"]);
  }

  #[test]
  fn core_priority_overrides_raw_score() {
    let files = vec![
      ScoredFile { path: "docs/guide.py".into(), score: 20, reasons: vec![] },
      ScoredFile { path: "src/server/app.py".into(), score: 2, reasons: vec![] },
    ];
    let out = prioritize(files, 15);
    assert_eq!(paths(&out), vec!["src/server/app.py", "docs/guide.py"]);
  }

  #[test]
  fn ties_keep_enumeration_order() {
    let dir = TempDir::new().unwrap();
    for name in ["c.py", "a.py", "b.py"] {
      write(dir.path(), name, b"retry");
    }
    let config = AnalyzerConfig::with_root(dir.path());
    let ranked = discover_and_rank(&kw(&["retry"]), &config).unwrap();
    assert_eq!(paths(&ranked), vec!["a.py", "b.py", "c.py"]);
  }

  #[test]
  fn output_is_truncated_to_max_files() {
    let dir = TempDir::new().unwrap();
    for i in 0..40 {
      write(dir.path(), &format!("mod_{i:02}.py"), b"retry");
    }
    let config = AnalyzerConfig::with_root(dir.path());
    let ranked = discover_and_rank(&kw(&["retry"]), &config).unwrap();
    assert_eq!(ranked.len(), 15);
  }

  #[test]
  fn unreadable_files_are_skipped_not_fatal() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "bad_retry.py", &[0xff, 0xfe, 0x00, 0x80]);
    write(dir.path(), "good.py", b"retry");
    let config = AnalyzerConfig::with_root(dir.path());
    let ranked = discover_and_rank(&kw(&["retry"]), &config).unwrap();
    assert_eq!(paths(&ranked), vec!["good.py"]);
  }

  #[test]
  fn only_sampled_lines_count_for_content() {
    let dir = TempDir::new().unwrap();
    let mut body = "x\n".repeat(40);
    body.push_str("retry\n");
    write(dir.path(), "late.py", body.as_bytes());
    let config = AnalyzerConfig::with_root(dir.path());
    assert!(discover_and_rank(&kw(&["retry"]), &config).unwrap().is_empty());
  }

  #[test]
  fn sample_stops_at_byte_limit_on_one_long_line() {
    let dir = TempDir::new().unwrap();
    let mut body = String::from("retry ");
    body.push_str(&"x".repeat(2 * 1024 * 1024));
    body.push_str(" pricing\n");
    write(dir.path(), "minified.js", body.as_bytes());

    let sample = read_sample(&dir.path().join("minified.js"), 30).unwrap();
    assert!(sample.len() as u64 <= MAX_SAMPLE_BYTES);
    assert!(sample.starts_with("retry "));
    assert!(!sample.contains("pricing"));
  }

  #[test]
  fn sample_cut_inside_multibyte_char_is_kept() {
    let dir = TempDir::new().unwrap();
    let mut body = String::from("a");
    body.push_str(&"\u{e9}".repeat(40_000));
    write(dir.path(), "accents.py", body.as_bytes());

    let sample = read_sample(&dir.path().join("accents.py"), 30).unwrap();
    assert_eq!(sample.len() as u64, MAX_SAMPLE_BYTES - 1);
    assert!(sample.starts_with("a\u{e9}"));
  }

  #[test]
  fn sample_strips_line_endings() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "crlf.py", b"Retry\r\nBackoff\r\n");
    let sample = read_sample(&dir.path().join("crlf.py"), 30).unwrap();
    assert_eq!(sample, "retry backoff");
  }

  #[test]
  fn candidates_outside_root_or_missing_are_dropped() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "src/agent/agent.py", b"async def do_async(): pass");
    write(dir.path(), "src/util.py", b"nothing");
    let config = AnalyzerConfig::with_root(dir.path());
    let candidates = vec![
      "./src/agent/agent.py".to_string(),
      "src/agent/agent.py".to_string(),
      "../etc/passwd".to_string(),
      "src/missing.py".to_string(),
      "src/util.py".to_string(),
    ];
    let ranked = rank_candidates(&candidates, &kw(&["async"]), &config);
    assert_eq!(paths(&ranked), vec!["src/agent/agent.py"]);
  }

  #[test]
  fn missing_root_is_an_error() {
    let config = AnalyzerConfig::with_root("/no/such/codebase/root");
    let err = discover_and_rank(&kw(&["tool"]), &config).unwrap_err();
    assert!(matches!(err, AnalyzerError::CodebaseRoot { .. }));
  }

  #[test]
  fn ranking_is_deterministic() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "src/tools/tool.py", b"def tool(): pass");
    write(dir.path(), "src/agent/agent.py", b"class Agent: async def do_async(self): ...");
    write(dir.path(), "src/util.py", b"tool helpers");
    let config = AnalyzerConfig::with_root(dir.path());
    let keywords = kw(&["tool", "agent", "async"]);
    let first = discover_and_rank(&keywords, &config).unwrap();
    let second = discover_and_rank(&keywords, &config).unwrap();
    assert_eq!(first, second);
  }
}

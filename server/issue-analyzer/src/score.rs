//! Per-file relevance scoring: whole-content keyword counts and the weighted
//! path/content/semantic score used for ranking.

use std::path::Path;

use crate::config::AnalyzerConfig;
use crate::types::KeywordSet;

/// One point per keyword that occurs anywhere in the (lowercased) content.
pub fn score_file(content: &str, keywords: &KeywordSet) -> u32 {
  matched_keywords(content, keywords).len() as u32
}

/// Keywords found in the content, in keyword-set order.
pub fn matched_keywords<'a>(content: &str, keywords: &'a KeywordSet) -> Vec<&'a str> {
  let lower = content.to_lowercase();
  keywords
    .iter()
    .filter(|k| lower.contains(k.as_str()))
    .map(String::as_str)
    .collect()
}

/// Score a file on disk. Unreadable files score 0 with no matches.
pub fn score_path(path: &Path, keywords: &KeywordSet) -> (u32, Vec<String>) {
  match std::fs::read_to_string(path) {
    Ok(content) => {
      let matched: Vec<String> = matched_keywords(&content, keywords)
        .into_iter()
        .map(str::to_string)
        .collect();
      (matched.len() as u32, matched)
    }
    Err(e) => {
      tracing::debug!(path = %path.display(), error = %e, "unreadable file scored 0");
      (0, Vec::new())
    }
  }
}

/// Anchor keywords that earn a flat bonus when they show up in the path or
/// content, on top of generic keyword matches.
struct SemanticAnchor {
  keyword: &'static str,
  path_needle: &'static str,
  content_needle: &'static str,
}

const SEMANTIC_ANCHORS: &[SemanticAnchor] = &[
  SemanticAnchor { keyword: "agent", path_needle: "agent", content_needle: "agent" },
  SemanticAnchor { keyword: "server", path_needle: "server", content_needle: "server" },
  SemanticAnchor { keyword: "security", path_needle: "safety", content_needle: "security" },
];

/// Weighted score for one candidate: `rel_path` is `/`-separated, `sample`
/// is the lowercased content sample.
pub fn score_candidate(
  rel_path: &str,
  sample: &str,
  keywords: &KeywordSet,
  config: &AnalyzerConfig,
) -> (u32, Vec<String>) {
  let path_lower = rel_path.to_lowercase();
  let mut score = 0u32;
  let mut reasons = Vec::new();

  for kw in keywords {
    if path_lower.contains(kw.as_str()) {
      score += config.path_weight;
      reasons.push(format!("path:{}", kw));
    }
  }

  for kw in keywords {
    if sample.contains(kw.as_str()) {
      score += config.content_weight;
      reasons.push(format!("content:{}", kw));
    }
  }

  for anchor in SEMANTIC_ANCHORS {
    if keywords.contains(anchor.keyword)
      && (path_lower.contains(anchor.path_needle) || sample.contains(anchor.content_needle))
    {
      score += config.semantic_bonus;
      reasons.push(format!("semantic:{}", anchor.keyword));
    }
  }

  (score, reasons)
}

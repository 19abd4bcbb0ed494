//! Human-readable analysis summary.

use crate::concepts;
use crate::config::AnalyzerConfig;
use crate::discover::is_core_path;
use crate::types::{Issue, KeywordSet, ScoredFile};

/// Summary used when the codebase scan could not run.
pub const DEGRADED_SUMMARY: &str = "Automated analysis unavailable, manual review recommended";

const MAX_CONCEPTS_SHOWN: usize = 5;
const MAX_KEYWORDS_SHOWN: usize = 10;

/// Describe what was found and how it was scored. Pure formatting.
pub fn build_summary(
  issue: &Issue,
  files: &[ScoredFile],
  keywords: &KeywordSet,
  concept_tags: &[String],
  config: &AnalyzerConfig,
) -> String {
  let core_count = files.iter().filter(|f| is_core_path(&f.path)).count();
  let shown_concepts: Vec<&str> = concept_tags.iter().take(MAX_CONCEPTS_SHOWN).map(String::as_str).collect();
  let shown_keywords: Vec<&str> = keywords.iter().take(MAX_KEYWORDS_SHOWN).map(String::as_str).collect();

  format!(
    "Heuristic analysis for issue #{number}: {title}\n\
     \n\
     Semantic understanding:\n\
     - Related concepts: {concepts}\n\
     - Technical domain: {domain}\n\
     - Complexity level: {complexity}\n\
     \n\
     File discovery:\n\
     - Found {found} relevant files\n\
     - Core files prioritized: {core_count}\n\
     - Keywords identified: {keywords}\n\
     \n\
     Analysis method:\n\
     - Multi-level scoring (path: {path}pts, content: {content}pts, semantic: {semantic}pts)\n\
     - Content sampled from the first {lines} lines of each file\n\
     - Core system files listed first\n\
     \n\
     Recommendation: review the core files first for the implementation approach.",
    number = issue.number,
    title = issue.title,
    concepts = shown_concepts.join(", "),
    domain = concepts::technical_domain(issue),
    complexity = concepts::complexity(issue),
    found = files.len(),
    core_count = core_count,
    keywords = shown_keywords.join(", "),
    path = config.path_weight,
    content = config.content_weight,
    semantic = config.semantic_bonus,
    lines = config.sample_lines,
  )
}

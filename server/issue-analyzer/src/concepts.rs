//! Coarse topic tags, technical domain, and complexity derived from an issue.

use std::collections::BTreeSet;

use crate::types::Issue;

/// (body needles, concepts added when any needle is present)
const CONCEPT_RULES: &[(&[&str], &[&str])] = &[
  (&["async", "await"], &["async", "concurrency", "fastapi"]),
  (&["process", "servermanager"], &["process_management", "server", "termination"]),
  (&["security", "vulnerabilit"], &["security", "vulnerability", "authentication"]),
  (&["tool", "function"], &["tool_system", "functionality", "integration"]),
  (&["api", "endpoint"], &["api", "endpoint", "integration"]),
];

/// First matching rule wins.
const DOMAIN_RULES: &[(&[&str], &str)] = &[
  (&["security", "vulnerabilit"], "security"),
  (&["async", "fastapi"], "async_concurrency"),
  (&["process", "servermanager"], "process_management"),
  (&["tool", "function"], "tool_system"),
  (&["api", "endpoint"], "api_integration"),
];

const COMPLEXITY_RULES: &[(&[&str], &str)] = &[
  (&["security", "rce"], "High"),
  (&["server", "process"], "Medium-High"),
  (&["tool", "function"], "Medium"),
];

/// Lowercased title words plus body-driven concept bundles, sorted.
pub fn semantic_concepts(issue: &Issue) -> Vec<String> {
  let mut concepts: BTreeSet<String> = issue
    .title
    .to_lowercase()
    .split_whitespace()
    .map(str::to_string)
    .collect();

  let body = issue.body_text().to_lowercase();
  for (needles, bundle) in CONCEPT_RULES {
    if contains_any(&body, needles) {
      concepts.extend(bundle.iter().map(|c| c.to_string()));
    }
  }
  concepts.into_iter().collect()
}

pub fn technical_domain(issue: &Issue) -> &'static str {
  first_match(issue, DOMAIN_RULES).unwrap_or("general")
}

pub fn complexity(issue: &Issue) -> &'static str {
  first_match(issue, COMPLEXITY_RULES).unwrap_or("Low-Medium")
}

fn first_match(issue: &Issue, rules: &[(&[&str], &'static str)]) -> Option<&'static str> {
  let body = issue.body_text().to_lowercase();
  rules
    .iter()
    .find(|(needles, _)| contains_any(&body, needles))
    .map(|(_, label)| *label)
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
  needles.iter().any(|n| haystack.contains(n))
}

//! Issue type and priority classification from labels, then title/body text.

use issue_analyzer::Issue;

use crate::types::{IssueType, Priority};

/// Exact (lowercased) label names per type, checked in order.
const TYPE_LABELS: &[(IssueType, &[&str])] = &[
  (IssueType::BugFix, &["bug", "error", "fix"]),
  (IssueType::Feature, &["feature", "enhancement", "new"]),
  (IssueType::Documentation, &["documentation", "docs"]),
  (IssueType::Refactor, &["refactor", "cleanup", "improvement"]),
];

/// Substrings of title + body per type, used when no label matched.
const TYPE_WORDS: &[(IssueType, &[&str])] = &[
  (IssueType::BugFix, &["bug", "error", "fix"]),
  (IssueType::Feature, &["feature", "enhancement", "new"]),
  (IssueType::Documentation, &["documentation", "docs"]),
  (IssueType::Refactor, &["refactor", "cleanup"]),
];

const PRIORITY_WORDS: &[(Priority, &[&str])] = &[
  (Priority::High, &["critical", "urgent", "high"]),
  (Priority::Medium, &["medium", "normal"]),
];

pub fn issue_type(issue: &Issue) -> IssueType {
  classify(issue, TYPE_LABELS, TYPE_WORDS).unwrap_or(IssueType::General)
}

pub fn priority(issue: &Issue) -> Priority {
  classify(issue, PRIORITY_WORDS, PRIORITY_WORDS).unwrap_or(Priority::Low)
}

fn classify<T: Copy>(issue: &Issue, by_label: &[(T, &[&str])], by_text: &[(T, &[&str])]) -> Option<T> {
  let labels: Vec<String> = issue.label_names().map(str::to_lowercase).collect();
  let from_labels = by_label
    .iter()
    .find(|(_, words)| labels.iter().any(|l| words.contains(&l.as_str())))
    .map(|(class, _)| *class);
  if from_labels.is_some() {
    return from_labels;
  }

  let text = format!("{} {}", issue.title, issue.body_text()).to_lowercase();
  by_text
    .iter()
    .find(|(_, words)| words.iter().any(|w| text.contains(w)))
    .map(|(class, _)| *class)
}

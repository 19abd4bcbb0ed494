//! Template fill: every PRD section from fixed tables keyed by the issue's
//! classification and trigger phrases.

use issue_analyzer::{AnalysisResult, Issue};
use tracing::debug;

use crate::classify;
use crate::suggestions;
use crate::types::{IssueType, PrdDocument, UseCase};

const MAX_DESCRIPTION_CHARS: usize = 500;

struct RootCause {
  /// Receives the raw body and its lowercased form.
  matches: fn(&str, &str) -> bool,
  text: &'static str,
}

/// Checked in order; the first match is the only block emitted.
const ROOT_CAUSES: &[RootCause] = &[
  RootCause {
    matches: |raw, _| raw.contains("@tool") && raw.contains("decorators"),
    text: "**Root Cause Analysis**: Issue appears to be related to incorrect import path. \
           User is importing from 'upsonic.tools.decorators' which doesn't exist. \
           Correct import should be from 'upsonic.tools.tool'.",
  },
  RootCause {
    matches: |_, lower| lower.contains("pricing") || lower.contains("dynamic"),
    text: "**Root Cause Analysis**: Current static pricing system in MODEL_REGISTRY has several limitations. \
           System needs dynamic pricing integration with OpenRouter API for real-time pricing data, \
           caching mechanisms, and comprehensive model coverage.",
  },
  RootCause {
    matches: |_, lower| lower.contains("security") || lower.contains("vulnerabilit"),
    text: "**Root Cause Analysis**: Security vulnerabilities are being reported publicly in Issues section. \
           Missing SECURITY.md file with clear reporting guidelines and private vulnerability disclosure process. \
           Need proper security policy documentation.",
  },
  RootCause {
    matches: |_, lower| lower.contains("contributing") || lower.contains("code_of_conduct"),
    text: "**Root Cause Analysis**: Missing standard community documentation files. \
           CODE_OF_CONDUCT.md and CONTRIBUTING.md are essential for open source projects. \
           Also need standardized PR naming conventions and contribution workflow.",
  },
  RootCause {
    matches: |_, lower| lower.contains("doesn't work"),
    text: "**Issue Type**: Functionality not working as expected",
  },
  RootCause {
    matches: |_, lower| lower.contains("hang") || lower.contains("forever") || lower.contains("async"),
    text: "**Root Cause Analysis**: Issue appears to be related to async/sync mismatch in FastAPI. \
           Agent.do() is a synchronous method being called in an async FastAPI endpoint, \
           which can cause blocking behavior. Solution requires using agent.do_async() instead.",
  },
  RootCause {
    matches: |_, lower| {
      lower.contains("process") || lower.contains("termination") || lower.contains("servermanager")
    },
    text: "**Root Cause Analysis**: ServerManager.stop() method doesn't properly terminate child processes. \
           Process tree cleanup is incomplete, leaving orphaned processes running. \
           Need to implement proper process group termination with SIGTERM/SIGKILL fallback.",
  },
  RootCause {
    matches: |_, lower| lower.contains("pickle") || lower.contains("deserialization") || lower.contains("rce"),
    text: "**Root Cause Analysis**: Unsafe pickle deserialization vulnerability allowing Remote Code Execution. \
           Functions like get_temporary_memory() and add_tool() use pickle.loads() without validation, \
           enabling arbitrary code execution through crafted serialized data.",
  },
  RootCause {
    matches: |_, lower| lower.contains("boilerplate"),
    text: "**Issue Type**: Developer experience improvement - reducing boilerplate code",
  },
];

pub const BASELINE_CONSTRAINTS: [&str; 3] = [
  "Must maintain backward compatibility",
  "Must follow existing code patterns and standards",
  "Must include appropriate error handling",
];

pub const BUG_FIX_CONSTRAINT: &str = "Must not introduce new bugs while fixing the current issue";

pub fn title(issue: &Issue) -> String {
  format!("PRD: {}", issue.title)
}

pub fn overview(issue: &Issue, issue_type: IssueType) -> String {
  format!(
    "{} based on GitHub issue #{}: '{}'. The goal is to provide a clear roadmap for resolution \
     while maintaining code quality and system stability.",
    issue_type.overview_lead(),
    issue.number,
    issue.title
  )
}

pub fn problem_statement(issue: &Issue, analysis: &AnalysisResult) -> String {
  let mut out = format!("**Issue**: {}\n\n", issue.title);

  if let Some(body) = issue.body.as_deref().filter(|b| !b.is_empty()) {
    let head: String = body.chars().take(MAX_DESCRIPTION_CHARS).collect();
    let ellipsis = if body.chars().count() > MAX_DESCRIPTION_CHARS { "..." } else { "" };
    out.push_str(&format!("**Description**: {head}{ellipsis}\n\n"));

    let lower = body.to_lowercase();
    if let Some(cause) = ROOT_CAUSES.iter().find(|c| (c.matches)(body, &lower)) {
      out.push_str(cause.text);
      out.push_str("\n\n");
    }
  }

  if !analysis.relevant_files.is_empty() {
    out.push_str(&format!(
      "**Relevant Files Identified**: {} files may need attention\n\n",
      analysis.relevant_files.len()
    ));
  }
  out
}

pub fn use_cases(issue: &Issue, issue_type: IssueType) -> Vec<UseCase> {
  let (title, description, criteria): (&str, String, &[&str]) = match issue_type {
    IssueType::BugFix => (
      "Bug Resolution",
      format!(
        "As a user/developer, I need the issue '{}' to be resolved so that the system works as expected.",
        issue.title
      ),
      &[
        "The reported issue no longer occurs",
        "No new issues are introduced",
        "Existing functionality remains intact",
        "Changes are properly tested",
      ],
    ),
    IssueType::Feature => (
      "New Feature Implementation",
      format!(
        "As a user, I want the new feature '{}' to be implemented to enhance functionality.",
        issue.title
      ),
      &[
        "Feature works as described in the issue",
        "Feature integrates seamlessly with existing code",
        "Proper error handling is implemented",
        "Documentation is updated",
      ],
    ),
    _ => (
      "Issue Resolution",
      format!("Resolve the issue: {}", issue.title),
      &[
        "Issue requirements are met",
        "Solution is properly tested",
        "Code follows project standards",
      ],
    ),
  };

  vec![UseCase {
    title: title.to_string(),
    description,
    acceptance_criteria: criteria.iter().map(|c| c.to_string()).collect(),
  }]
}

pub fn constraints(issue_type: IssueType) -> Vec<String> {
  let mut out: Vec<String> = BASELINE_CONSTRAINTS.iter().map(|c| c.to_string()).collect();
  if issue_type == IssueType::BugFix {
    out.push(BUG_FIX_CONSTRAINT.to_string());
  }
  out
}

/// Deterministic PRD for an issue and its analysis. Never fails.
pub fn compose_template(issue: &Issue, analysis: &AnalysisResult) -> PrdDocument {
  let issue_type = classify::issue_type(issue);
  let priority = classify::priority(issue);
  debug!(
    issue = issue.number,
    issue_type = issue_type.as_str(),
    priority = priority.as_str(),
    "classified issue"
  );

  PrdDocument {
    title: title(issue),
    overview: overview(issue, issue_type),
    problem_statement: problem_statement(issue, analysis),
    use_cases: use_cases(issue, issue_type),
    file_modifications: suggestions::file_modifications(issue, analysis),
    constraints: constraints(issue_type),
  }
}

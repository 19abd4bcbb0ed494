//! Markdown rendering of a composed PRD.

use std::fmt::Write;

use crate::types::PrdDocument;

impl PrdDocument {
  /// Fixed layout: title, overview, problem statement, numbered use cases,
  /// file modifications, then constraints (omitted when empty).
  pub fn to_markdown(&self) -> String {
    let mut md = format!(
      "# {}\n\n## Overview\n{}\n\n## Problem Statement\n{}\n\n## Use Cases\n",
      self.title, self.overview, self.problem_statement
    );

    for (i, uc) in self.use_cases.iter().enumerate() {
      let _ = write!(
        md,
        "\n### {}. {}\n{}\n\n**Acceptance Criteria:**\n",
        i + 1,
        uc.title,
        uc.description
      );
      for c in &uc.acceptance_criteria {
        let _ = writeln!(md, "- {c}");
      }
      md.push('\n');
    }

    md.push_str("\n## Suggested File Modifications\n");
    for m in &self.file_modifications {
      let _ = write!(
        md,
        "\n### {}\n**Reason:** {}\n\n**Suggested Changes:**\n{}\n\n",
        m.file_path, m.reason, m.suggested_changes
      );
    }

    if !self.constraints.is_empty() {
      md.push_str("## Constraints\n");
      for c in &self.constraints {
        let _ = writeln!(md, "- {c}");
      }
      md.push('\n');
    }
    md
  }
}

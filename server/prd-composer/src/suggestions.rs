//! Pre-authored file suggestions per trigger group, and the merge with the
//! analyzer's ranked files.

use issue_analyzer::{triggers, AnalysisResult, Issue, TriggerGroup};

use crate::types::FileModification;

/// A (path, reason, suggested change) triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Suggestion {
  pub path: &'static str,
  pub reason: &'static str,
  pub changes: &'static str,
}

const fn s(path: &'static str, reason: &'static str, changes: &'static str) -> Suggestion {
  Suggestion { path, reason, changes }
}

/// Max core files suggested even though the analyzer did not rank them.
pub const MAX_FORCED_SUGGESTIONS: usize = 3;
/// Max core entries (ranked plus forced) before docs and test suggestions.
pub const MAX_CORE_SUGGESTIONS: usize = 8;
/// Generic entries listed when no trigger group matched.
pub const MAX_GENERIC_SUGGESTIONS: usize = 5;

pub const FORCED_SUFFIX: &str = " (Identified as critical for this issue)";

/// Groups that carry file suggestions, in merge order. A later group's entry
/// for the same path replaces an earlier one in place.
const SUGGESTION_ORDER: &[TriggerGroup] = &[
  TriggerGroup::StandaloneTool,
  TriggerGroup::Pricing,
  TriggerGroup::Security,
  TriggerGroup::AsyncHang,
  TriggerGroup::ProcessTermination,
  TriggerGroup::Deserialization,
  TriggerGroup::Contribution,
];

pub fn core_files(group: TriggerGroup) -> &'static [Suggestion] {
  match group {
    TriggerGroup::StandaloneTool => const {
      &[
        s(
          "src/upsonic/tools/__init__.py",
          "Primary import path fix needed",
          "Add import alias: `from .tool import tool as tool`. This will allow users to import the decorator as `from upsonic.tools import tool` instead of the non-existent decorators module.",
        ),
        s(
          "src/upsonic/tools/tool.py",
          "Core decorator implementation verification",
          "Verify that @tool decorator properly sets _upsonic_tool_config attribute on decorated functions. Ensure the decorator works correctly with standalone functions.",
        ),
        s(
          "src/upsonic/tools/processor.py",
          "Tool validation and processing logic",
          "Review normalize_and_process method to ensure standalone @tool decorated functions are properly recognized and validated. Check that functions with _upsonic_tool_config attribute are handled correctly.",
        ),
      ]
    },
    TriggerGroup::Pricing => const {
      &[
        s(
          "src/upsonic/models/providers.py",
          "Model pricing data management",
          "Implement dynamic pricing system with OpenRouter API integration. Add caching layer and real-time price fetching capabilities.",
        ),
        s(
          "src/upsonic/agent/agent.py",
          "Agent model pricing integration",
          "Integrate dynamic pricing system into agent initialization. Add pricing validation and fallback mechanisms.",
        ),
      ]
    },
    TriggerGroup::Security => const {
      &[
        s(
          "SECURITY.md",
          "Security policy documentation",
          "Create comprehensive SECURITY.md file with vulnerability reporting guidelines, private disclosure process, and security contact information.",
        ),
        s(
          "src/upsonic/safety_engine/__init__.py",
          "Safety engine integration",
          "Review and enhance safety engine policies for vulnerability detection and prevention mechanisms.",
        ),
      ]
    },
    TriggerGroup::AsyncHang => const {
      &[
        s(
          "src/upsonic/agent/agent.py",
          "Agent async/sync method implementation",
          "Verify do_async() method exists and works correctly. Ensure proper async handling for FastAPI integration.",
        ),
        s(
          "examples/fastapi_example.py",
          "FastAPI integration example",
          "Update FastAPI example to use agent.do_async() instead of agent.do() for async endpoints.",
        ),
      ]
    },
    TriggerGroup::ProcessTermination => const {
      &[
        s(
          "src/upsonic/server/level_two/server/server.py",
          "ServerManager process termination logic",
          "Implement proper child process termination in stop() method using process groups and SIGTERM/SIGKILL fallback.",
        ),
        s(
          "src/upsonic/server/__init__.py",
          "Server management utilities",
          "Add process tree cleanup utilities and ensure proper resource cleanup on server shutdown.",
        ),
      ]
    },
    TriggerGroup::Deserialization => const {
      &[
        s(
          "src/upsonic/server/level_two/server/server.py",
          "get_temporary_memory function security",
          "Replace unsafe pickle.loads() with secure deserialization. Implement input validation and sandboxing for temporary memory storage.",
        ),
        s(
          "src/upsonic/tools_server/server/tools.py",
          "add_tool function security",
          "Replace unsafe cloudpickle.loads() with secure function validation. Implement input sanitization and execution sandboxing.",
        ),
        s(
          "src/upsonic/safety_engine/__init__.py",
          "Safety engine for malicious input detection",
          "Add security policies to detect and prevent malicious pickle payloads and unsafe deserialization attempts.",
        ),
      ]
    },
    TriggerGroup::Contribution => const {
      &[
        s(
          "CONTRIBUTING.md",
          "Community contribution guidelines",
          "Create CONTRIBUTING.md with contribution workflow, PR naming conventions, coding standards, and issue reporting guidelines.",
        ),
        s(
          "CODE_OF_CONDUCT.md",
          "Community behavior standards",
          "Create CODE_OF_CONDUCT.md defining acceptable behavior, reporting mechanisms, and consequences for violations.",
        ),
      ]
    },
    TriggerGroup::ImportPath | TriggerGroup::ServerApi => &[],
  }
}

pub fn docs_file(group: TriggerGroup) -> Option<Suggestion> {
  let doc = match group {
    TriggerGroup::StandaloneTool => s(
      "README.md or docs/examples/",
      "Documentation and examples need correct import paths",
      "Replace any instances of 'from upsonic.tools.decorators import tool' with 'from upsonic.tools.tool import tool' in documentation and example code.",
    ),
    TriggerGroup::Pricing => s(
      "README.md",
      "Documentation needs dynamic pricing examples",
      "Add examples showing dynamic pricing integration with OpenRouter API, caching mechanisms, and real-time model availability detection.",
    ),
    TriggerGroup::AsyncHang => s(
      "examples/fastapi_async_example.py",
      "FastAPI async integration example",
      "Create example showing proper async FastAPI integration using agent.do_async() instead of blocking agent.do() calls.",
    ),
    TriggerGroup::ProcessTermination => s(
      "docs/server_management.md",
      "Server process management documentation",
      "Document proper server shutdown procedures, process tree cleanup, and resource management best practices.",
    ),
    TriggerGroup::Deserialization => s(
      "SECURITY.md",
      "Security vulnerability documentation",
      "Document security measures against pickle deserialization attacks, input validation requirements, and secure coding practices.",
    ),
    TriggerGroup::Security => s(
      "SECURITY.md",
      "Security policy documentation",
      "Create SECURITY.md with vulnerability reporting guidelines, private disclosure process, and security contact information.",
    ),
    TriggerGroup::Contribution => s(
      "CONTRIBUTING.md",
      "Community contribution guidelines",
      "Create CONTRIBUTING.md with contribution workflow, PR naming conventions, coding standards, and issue reporting guidelines.",
    ),
    TriggerGroup::ImportPath | TriggerGroup::ServerApi => return None,
  };
  Some(doc)
}

pub fn test_file(group: TriggerGroup) -> Option<Suggestion> {
  let test = match group {
    TriggerGroup::StandaloneTool => s(
      "tests/test_tool_function_standalone.py",
      "Add test case for standalone tool functions",
      "Create test case that verifies @tool decorated functions can be used directly in Task.tools without Toolkit wrapper class.",
    ),
    TriggerGroup::Pricing => s(
      "tests/test_dynamic_pricing.py",
      "Add test case for dynamic pricing system",
      "Create tests for OpenRouter API integration, caching mechanisms, and real-time pricing validation.",
    ),
    TriggerGroup::AsyncHang => s(
      "tests/test_fastapi_integration.py",
      "Add test case for FastAPI async integration",
      "Create tests for async FastAPI endpoints using agent.do_async() method and proper async handling.",
    ),
    TriggerGroup::ProcessTermination => s(
      "tests/test_server_process_termination.py",
      "Add test case for server process termination",
      "Create tests for proper child process cleanup in ServerManager.stop() method and process tree termination.",
    ),
    TriggerGroup::Deserialization => s(
      "tests/test_secure_deserialization.py",
      "Add test case for secure deserialization",
      "Create tests for safe pickle/cloudpickle deserialization, input validation, and RCE prevention mechanisms.",
    ),
    TriggerGroup::Security => s(
      "tests/test_security_engine.py",
      "Add test case for security vulnerability detection",
      "Create tests for security policy enforcement and vulnerability detection mechanisms.",
    ),
    TriggerGroup::Contribution | TriggerGroup::ImportPath | TriggerGroup::ServerApi => return None,
  };
  Some(test)
}

/// Groups with file suggestions that fire for this issue, in merge order.
pub fn matched_groups(issue: &Issue) -> Vec<TriggerGroup> {
  let detected = triggers::detect(issue.body_text());
  SUGGESTION_ORDER
    .iter()
    .copied()
    .filter(|g| detected.contains(g))
    .collect()
}

/// Core suggestions of all matched groups as an ordered path → suggestion map.
fn merged_core_files(groups: &[TriggerGroup]) -> Vec<Suggestion> {
  let mut merged: Vec<Suggestion> = Vec::new();
  for group in groups {
    for sug in core_files(*group) {
      match merged.iter_mut().find(|m| m.path == sug.path) {
        Some(existing) => *existing = *sug,
        None => merged.push(*sug),
      }
    }
  }
  merged
}

/// File modifications for the PRD: ranked core files first, then up to
/// three forced core files (eight core entries in all), then docs and test
/// suggestions per group.
pub fn file_modifications(issue: &Issue, analysis: &AnalysisResult) -> Vec<FileModification> {
  let groups = matched_groups(issue);
  let ranked = analysis.file_paths();

  if groups.is_empty() {
    return ranked
      .into_iter()
      .take(MAX_GENERIC_SUGGESTIONS)
      .map(|path| FileModification {
        file_path: path,
        reason: "Identified as relevant to the issue based on analysis".to_string(),
        suggested_changes: "Review and modify as needed to resolve the issue".to_string(),
      })
      .collect();
  }

  let core = merged_core_files(&groups);
  let mut out = Vec::new();

  ranked
    .iter()
    .filter_map(|path| core.iter().find(|c| c.path == path))
    .take(MAX_CORE_SUGGESTIONS)
    .for_each(|sug| out.push(modification(sug, "")));

  let forced = MAX_FORCED_SUGGESTIONS.min(MAX_CORE_SUGGESTIONS - out.len());
  core
    .iter()
    .filter(|c| !ranked.iter().any(|p| p == c.path))
    .take(forced)
    .for_each(|sug| out.push(modification(sug, FORCED_SUFFIX)));

  for group in &groups {
    for sug in [docs_file(*group), test_file(*group)].into_iter().flatten() {
      if !out.iter().any(|m| m.file_path == sug.path) {
        out.push(modification(&sug, ""));
      }
    }
  }

  out
}

fn modification(sug: &Suggestion, reason_suffix: &str) -> FileModification {
  FileModification {
    file_path: sug.path.to_string(),
    reason: format!("{}{}", sug.reason, reason_suffix),
    suggested_changes: sug.changes.to_string(),
  }
}

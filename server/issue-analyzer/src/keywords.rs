//! Keyword extraction from issue title, labels, and body.

use crate::triggers;
use crate::types::{Issue, KeywordSet};

/// Token families: any token present in the body adds the family's bundle.
struct PatternFamily {
  tokens: &'static [&'static str],
  bundle: &'static [&'static str],
}

const PATTERN_FAMILIES: &[PatternFamily] = &[
  // import-style
  PatternFamily {
    tokens: &["import", "from upsonic", "decorator", "@tool"],
    bundle: &["tool", "__init__", "decorators"],
  },
  // class-style
  PatternFamily {
    tokens: &["class", "toolkit", "inherits", "base class"],
    bundle: &["tool", "base"],
  },
  // function-style
  PatternFamily {
    tokens: &["function", "def ", "callable", "standalone"],
    bundle: &["processor", "validation"],
  },
  // error-style
  PatternFamily {
    tokens: &["error", "doesn't work", "currently doesn't", "fails"],
    bundle: &["test"],
  },
];

/// Code-snippet hints that point at specific modules.
const SNIPPET_HINTS: &[(&str, &[&str])] = &[
  ("@tool", &["tool"]),
  ("task.tools", &["task", "processor"]),
  ("decorators", &["tool"]),
  ("toolkit", &["tool", "base"]),
];

/// Title words longer than this many characters become keywords.
const MIN_TITLE_WORD_LEN: usize = 2;

/// Extract the lowercase keyword set for an issue. Never fails; an absent body
/// contributes nothing.
pub fn extract_keywords(issue: &Issue) -> KeywordSet {
  let mut keywords = KeywordSet::new();

  for word in issue.title.to_lowercase().split_whitespace() {
    if word.chars().count() > MIN_TITLE_WORD_LEN {
      keywords.insert(word.to_string());
    }
  }

  for name in issue.label_names() {
    keywords.insert(name.to_lowercase());
  }

  let body = issue.body_text().to_lowercase();
  if body.is_empty() {
    return keywords;
  }

  for group in triggers::detect(&body) {
    extend(&mut keywords, group.keywords());
  }

  for family in PATTERN_FAMILIES {
    if family.tokens.iter().any(|t| body.contains(t)) {
      extend(&mut keywords, family.bundle);
    }
  }

  for (hint, bundle) in SNIPPET_HINTS {
    if body.contains(hint) {
      extend(&mut keywords, bundle);
    }
  }

  keywords
}

fn extend(keywords: &mut KeywordSet, words: &[&str]) {
  keywords.extend(words.iter().map(|w| w.to_string()));
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_support::issue;

  fn set(words: &[&str]) -> KeywordSet {
    words.iter().map(|w| w.to_string()).collect()
  }

  #[test]
  fn title_words_and_labels_only_when_body_empty() {
    let with_empty = issue("Fix the Login flow", Some(""), &["Bug", "ui"]);
    let without = issue("Fix the Login flow", None, &["Bug", "ui"]);
    let expected = set(&["fix", "the", "login", "flow", "bug", "ui"]);
    assert_eq!(extract_keywords(&with_empty), expected);
    assert_eq!(extract_keywords(&without), expected);
  }

  #[test]
  fn short_title_words_are_dropped() {
    let kw = extract_keywords(&issue("Go to it now", None, &[]));
    assert_eq!(kw, set(&["now"]));
  }

  #[test]
  fn hang_body_adds_async_bundle() {
    let kw = extract_keywords(&issue(
      "App hangs forever in FastAPI",
      Some("calling agent.do() inside an async endpoint causes it to hang forever"),
      &[],
    ));
    for w in ["async", "fastapi", "sync", "blocking", "do_async", "hangs", "forever", "app"] {
      assert!(kw.contains(w), "missing {w}");
    }
    assert!(!kw.contains("in"));
  }

  #[test]
  fn async_body_adds_async_bundle() {
    let kw = extract_keywords(&issue(
      "Endpoint stalls",
      Some("agent.do() blocks inside my async endpoint"),
      &[],
    ));
    for w in ["async", "fastapi", "sync", "blocking", "do_async"] {
      assert!(kw.contains(w), "missing {w}");
    }
  }

  #[test]
  fn security_body_adds_security_bundle() {
    let kw = extract_keywords(&issue("Report", Some("A Vulnerability in pickle handling"), &[]));
    for w in ["security", "policy", "safety", "vulnerability", "rce", "pickle", "deserialization"] {
      assert!(kw.contains(w), "missing {w}");
    }
  }

  #[test]
  fn import_path_trigger_adds_tool_bundle() {
    let kw = extract_keywords(&issue(
      "Broken import",
      Some("from upsonic.tools.decorators import tool fails"),
      &[],
    ));
    for w in ["tool", "__init__", "decorators", "standalone", "toolkit", "processor", "test"] {
      assert!(kw.contains(w), "missing {w}");
    }
  }

  #[test]
  fn pattern_families_add_their_bundles() {
    let kw = extract_keywords(&issue("x", Some("this callable inherits from a base class"), &[]));
    assert!(kw.is_superset(&set(&["tool", "base", "processor", "validation"])));
    assert!(!kw.contains("test"));
  }

  #[test]
  fn snippet_hints_add_task_keywords() {
    let kw = extract_keywords(&issue("x", Some("passing it via task.tools"), &[]));
    assert!(kw.contains("task"));
    assert!(kw.contains("processor"));
  }

  #[test]
  fn adding_a_trigger_never_removes_keywords() {
    let base = extract_keywords(&issue("Server crash", Some("it breaks"), &["p1"]));
    let more = extract_keywords(&issue(
      "Server crash",
      Some("it breaks when the process termination runs"),
      &["p1"],
    ));
    assert!(more.is_superset(&base));
    assert!(more.contains("servermanager"));
  }

  #[test]
  fn extraction_is_deterministic() {
    let i = issue("Dynamic pricing", Some("pricing should be dynamic via the api"), &["feature"]);
    assert_eq!(extract_keywords(&i), extract_keywords(&i));
  }
}

//! Trigger phrase groups: fixed substrings in an issue body that activate a
//! known topic. Shared by keyword extraction and PRD file suggestions.

/// Topic groups detected from an issue body, in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TriggerGroup {
  ImportPath,
  StandaloneTool,
  Pricing,
  Security,
  Contribution,
  AsyncHang,
  ProcessTermination,
  ServerApi,
  Deserialization,
}

impl TriggerGroup {
  pub const ALL: [TriggerGroup; 9] = [
    Self::ImportPath,
    Self::StandaloneTool,
    Self::Pricing,
    Self::Security,
    Self::Contribution,
    Self::AsyncHang,
    Self::ProcessTermination,
    Self::ServerApi,
    Self::Deserialization,
  ];

  pub fn name(self) -> &'static str {
    match self {
      Self::ImportPath => "import_path",
      Self::StandaloneTool => "standalone_tool",
      Self::Pricing => "pricing",
      Self::Security => "security",
      Self::Contribution => "contribution",
      Self::AsyncHang => "async_hang",
      Self::ProcessTermination => "process_termination",
      Self::ServerApi => "server_api",
      Self::Deserialization => "deserialization",
    }
  }

  /// Lowercase phrases; any one of them activates the group.
  pub fn phrases(self) -> &'static [&'static str] {
    match self {
      Self::ImportPath => &["from upsonic.tools.decorators import tool"],
      Self::StandaloneTool => &["standalone", "toolkit"],
      Self::Pricing => &["pricing", "dynamic"],
      Self::Security => &["security", "vulnerabilit"],
      Self::Contribution => &["contributing", "code_of_conduct"],
      Self::AsyncHang => &["hang", "forever", "fastapi", "async"],
      Self::ProcessTermination => &["process", "termination", "servermanager"],
      Self::ServerApi => &["server", "api"],
      Self::Deserialization => &["pickle", "deserialization", "rce"],
    }
  }

  /// Keywords added when the group fires.
  pub fn keywords(self) -> &'static [&'static str] {
    match self {
      Self::ImportPath => &[
        "tool",
        "__init__",
        "decorators",
        "standalone",
        "toolkit",
        "processor",
      ],
      Self::StandaloneTool => &["tool", "processor", "validation", "standalone", "toolkit"],
      Self::Pricing => &["pricing", "api", "model", "dynamic", "cache", "openrouter"],
      Self::Security => &[
        "security",
        "policy",
        "safety",
        "vulnerability",
        "rce",
        "pickle",
        "deserialization",
      ],
      Self::Contribution => &["contributing", "docs", "community", "guidelines"],
      Self::AsyncHang => &["async", "fastapi", "sync", "blocking", "do_async"],
      Self::ProcessTermination => &["process", "termination", "servermanager", "child", "cleanup"],
      Self::ServerApi => &["server", "endpoint", "fastapi", "uvicorn"],
      // Only drives file suggestions; the security bundle already covers its words.
      Self::Deserialization => &[],
    }
  }

  /// `body_lower` must already be lowercased.
  pub fn matches(self, body_lower: &str) -> bool {
    self.phrases().iter().any(|p| body_lower.contains(p))
  }
}

/// Groups whose phrases appear in the body (case-insensitive), in table order.
pub fn detect(body: &str) -> Vec<TriggerGroup> {
  let body_lower = body.to_lowercase();
  TriggerGroup::ALL
    .into_iter()
    .filter(|g| g.matches(&body_lower))
    .collect()
}

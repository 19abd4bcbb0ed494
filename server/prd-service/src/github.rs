//! GitHub issue fetcher: locator parsing and the REST client.

use std::sync::OnceLock;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use issue_analyzer::types::{Comment, GitHubUser, IssueState};
use issue_analyzer::{Issue, Label};
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::GitHubConfig;

const USER_AGENT: &str = concat!("prd-service/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum FetchError {
  #[error("invalid GitHub issue URL: {0}")]
  InvalidLocator(String),

  #[error("{0}")]
  Upstream(String),
}

impl FetchError {
  pub fn upstream(msg: impl Into<String>) -> Self {
    Self::Upstream(msg.into())
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueLocator {
  pub owner: String,
  pub repo: String,
  pub number: u64,
}

fn locator_regex() -> Option<&'static Regex> {
  static RE: OnceLock<Option<Regex>> = OnceLock::new();
  RE.get_or_init(|| Regex::new(r"^https://[^/]+/([^/]+)/([^/]+)/issues/(\d+)").ok())
    .as_ref()
}

/// `https://<host>/<owner>/<repo>/issues/<number>`, number > 0.
pub fn parse_issue_url(url: &str) -> Result<IssueLocator, FetchError> {
  let caps = locator_regex()
    .and_then(|re| re.captures(url.trim()))
    .ok_or_else(|| FetchError::InvalidLocator(url.to_string()))?;
  let number: u64 = caps[3]
    .parse()
    .map_err(|_| FetchError::InvalidLocator(url.to_string()))?;
  if number == 0 {
    return Err(FetchError::InvalidLocator(url.to_string()));
  }
  Ok(IssueLocator {
    owner: caps[1].to_string(),
    repo: caps[2].to_string(),
    number,
  })
}

/// Remote issue source. One attempt per call; no retry, no cache.
#[async_trait]
pub trait IssueFetcher: Send + Sync {
  async fn fetch_issue(&self, url: &str) -> Result<Issue, FetchError>;

  /// Whether requests carry credentials.
  fn is_authenticated(&self) -> bool;
}

// ---------------------------------------------------------------------------
// Wire types (GitHub REST; `comments` on an issue is a count, not a list)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct WireUser {
  login: String,
  id: u64,
  #[serde(default)]
  avatar_url: String,
  #[serde(default)]
  html_url: String,
}

impl From<WireUser> for GitHubUser {
  fn from(u: WireUser) -> Self {
    GitHubUser {
      login: u.login,
      id: u.id,
      avatar_url: u.avatar_url,
      html_url: u.html_url,
    }
  }
}

#[derive(Debug, Deserialize)]
struct WireLabel {
  name: String,
  #[serde(default)]
  color: String,
  #[serde(default)]
  description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireIssue {
  id: u64,
  number: u64,
  title: String,
  #[serde(default)]
  body: Option<String>,
  user: WireUser,
  #[serde(default)]
  labels: Vec<WireLabel>,
  state: IssueState,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
  html_url: String,
}

#[derive(Debug, Deserialize)]
struct WireComment {
  id: u64,
  user: WireUser,
  #[serde(default)]
  body: Option<String>,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

fn into_issue(wire: WireIssue, comments: Vec<WireComment>) -> Issue {
  Issue {
    id: wire.id,
    number: wire.number,
    title: wire.title,
    body: wire.body,
    user: wire.user.into(),
    labels: wire
      .labels
      .into_iter()
      .map(|l| Label {
        name: l.name,
        color: l.color,
        description: l.description,
      })
      .collect(),
    state: wire.state,
    created_at: wire.created_at,
    updated_at: wire.updated_at,
    html_url: wire.html_url,
    comments: comments
      .into_iter()
      .map(|c| Comment {
        id: c.id,
        user: c.user.into(),
        body: c.body.unwrap_or_default(),
        created_at: c.created_at,
        updated_at: c.updated_at,
      })
      .collect(),
  }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

pub struct GitHubClient {
  client: reqwest::Client,
  api_url: String,
  token: Option<String>,
}

impl GitHubClient {
  pub fn new(config: &GitHubConfig) -> Result<Self, FetchError> {
    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(30))
      .user_agent(USER_AGENT)
      .build()
      .map_err(|e| FetchError::upstream(format!("failed to create HTTP client: {e}")))?;
    Ok(Self {
      client,
      api_url: config.api_url.trim_end_matches('/').to_string(),
      token: config.token.clone(),
    })
  }

  async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
    let url = format!("{}{}", self.api_url, path);
    let mut req = self
      .client
      .get(&url)
      .header("Accept", "application/vnd.github+json")
      .header("X-GitHub-Api-Version", "2022-11-28");
    if let Some(token) = &self.token {
      req = req.bearer_auth(token);
    }

    let resp = req
      .send()
      .await
      .map_err(|e| FetchError::upstream(format!("request to {url} failed: {e}")))?;
    let status = resp.status();
    if !status.is_success() {
      return Err(FetchError::upstream(format!("GitHub API returned {status} for {path}")));
    }
    resp
      .json::<T>()
      .await
      .map_err(|e| FetchError::upstream(format!("invalid JSON from {path}: {e}")))
  }
}

#[async_trait]
impl IssueFetcher for GitHubClient {
  async fn fetch_issue(&self, url: &str) -> Result<Issue, FetchError> {
    let loc = parse_issue_url(url)?;
    let base = format!("/repos/{}/{}/issues/{}", loc.owner, loc.repo, loc.number);

    let wire: WireIssue = self.get_json(&base).await?;
    let comments: Vec<WireComment> = self.get_json(&format!("{base}/comments")).await?;
    debug!(comments = comments.len(), "fetched issue comments");
    info!(owner = %loc.owner, repo = %loc.repo, number = loc.number, "fetched GitHub issue");

    Ok(into_issue(wire, comments))
  }

  fn is_authenticated(&self) -> bool {
    self.token.is_some()
  }
}

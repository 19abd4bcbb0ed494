//! Issue builders shared by unit tests.

use chrono::{TimeZone, Utc};

use crate::types::{GitHubUser, Issue, IssueState, Label};

pub(crate) fn issue(title: &str, body: Option<&str>, labels: &[&str]) -> Issue {
  let ts = Utc.with_ymd_and_hms(2025, 1, 15, 10, 30, 0).unwrap();
  Issue {
    id: 1,
    number: 42,
    title: title.to_string(),
    body: body.map(str::to_string),
    user: GitHubUser {
      login: "octocat".into(),
      id: 1,
      avatar_url: String::new(),
      html_url: String::new(),
    },
    labels: labels
      .iter()
      .map(|name| Label {
        name: name.to_string(),
        color: "ededed".into(),
        description: None,
      })
      .collect(),
    state: IssueState::Open,
    created_at: ts,
    updated_at: ts,
    html_url: "https://github.com/acme/widgets/issues/42".into(),
    comments: Vec::new(),
  }
}

//! A small team with three pull requests in January 2024, served from a fixture file.
//!
//! - web #1 by alice-ac: merged; reviewed by the Copilot bot, bob-ac and outsider zed
//! - api #4 by bob-ac: open; review requested from alice-ac
//! - web #2 by alice-ac: closed without merge; reviewed by bob-ac

use std::path::PathBuf;

use serde_json::{json, Map, Value};

pub const BIN: &str = "review-matrix";
pub const NOW: &str = "2024-01-16T09:00:00+09:00";
pub const SEARCH_URL: &str = "https://api.github.com/search/issues?q=type:pr+org:acme+author:alice-ac+author:bob-ac+created:2024-01-01..2024-01-31&sort=created&order=desc&per_page=100";

const WEB: &str = "https://api.github.com/repos/acme/web";
const API: &str = "https://api.github.com/repos/acme/api";

pub fn settings() -> Value {
  json!({
    "organization": "acme",
    "authors": ["alice-ac", "bob-ac"],
    "label_suffixes": ["-ac"]
  })
}

fn item(repo_api: &str, repo_web: &str, n: u64, author: &str, state: &str, created: &str, updated: &str) -> Value {
  json!({
    "html_url": format!("{repo_web}/pull/{n}"),
    "repository_url": repo_api,
    "number": n,
    "title": "search title",
    "state": state,
    "user": {"login": author},
    "created_at": created,
    "closed_at": null,
    "updated_at": updated
  })
}

pub fn search_page() -> Value {
  json!({
    "total_count": 3,
    "incomplete_results": false,
    "items": [
      item(WEB, "https://github.com/acme/web", 2, "alice-ac", "closed", "2024-01-12T00:00:00Z", "2024-01-12T02:00:00Z"),
      item(API, "https://github.com/acme/api", 4, "bob-ac", "open", "2024-01-11T01:15:00Z", "2024-01-11T01:15:00Z"),
      item(WEB, "https://github.com/acme/web", 1, "alice-ac", "closed", "2024-01-09T00:00:00Z", "2024-01-10T03:30:00Z")
    ]
  })
}

fn review(login: &str, at: &str) -> Value {
  json!({"user": {"login": login}, "submitted_at": at, "state": "COMMENTED"})
}

fn detail(title: &str, created: &str, closed: Option<&str>, merged: bool, comments: u64, review_comments: u64) -> Value {
  json!({
    "title": title,
    "created_at": created,
    "closed_at": closed,
    "merged": merged,
    "comments": comments,
    "review_comments": review_comments
  })
}

/// Every response the scenario needs, keyed by URL.
pub fn responses() -> Value {
  let mut map = Map::new();
  map.insert(SEARCH_URL.into(), search_page());

  map.insert(format!("{WEB}/pulls/1/requested_reviewers"), json!({"users": []}));
  map.insert(
    format!("{WEB}/pulls/1/reviews?per_page=100"),
    json!([
      review("copilot-pull-request-reviewer[bot]", "2024-01-09T01:00:00Z"),
      review("bob-ac", "2024-01-09T06:00:00Z"),
      review("zed", "2024-01-09T07:00:00Z")
    ]),
  );
  map.insert(
    format!("{WEB}/pulls/1"),
    detail("Add search", "2024-01-09T00:00:00Z", Some("2024-01-10T03:30:00Z"), true, 2, 3),
  );

  map.insert(
    format!("{API}/pulls/4/requested_reviewers"),
    json!({"users": [{"login": "alice-ac"}]}),
  );
  map.insert(format!("{API}/pulls/4/reviews?per_page=100"), json!([]));
  map.insert(
    format!("{API}/pulls/4"),
    detail("Rate limit API", "2024-01-11T01:15:00Z", None, false, 0, 0),
  );

  map.insert(format!("{WEB}/pulls/2/requested_reviewers"), json!({"users": []}));
  map.insert(
    format!("{WEB}/pulls/2/reviews?per_page=100"),
    json!([review("bob-ac", "2024-01-12T01:00:00Z")]),
  );
  map.insert(
    format!("{WEB}/pulls/2"),
    detail("Spike: new router", "2024-01-12T00:00:00Z", Some("2024-01-12T02:00:00Z"), false, 1, 0),
  );

  Value::Object(map)
}

/// `responses()` with one URL answered by an HTTP error status instead.
pub fn responses_with_status(url: &str, status: u16) -> Value {
  let mut v = responses();
  v[url] = json!({"$status": status});
  v
}

/// Only the search response; any detail fetch would be a 404.
pub fn search_only() -> Value {
  json!({ SEARCH_URL: search_page() })
}

pub fn detail_url(repo: &str, n: u64) -> String {
  let base = if repo == "api" { API } else { WEB };
  format!("{base}/pulls/{n}")
}

/// A temp working directory holding the settings file and an API fixture.
pub struct Workspace {
  pub dir: tempfile::TempDir,
  pub fixture: PathBuf,
}

impl Workspace {
  pub fn new(responses: &Value) -> Self {
    let dir = test_support::tempdir();
    test_support::write_json(dir.path(), "review-matrix.json", &settings());
    let fixture = test_support::write_json(dir.path(), "api.json", responses);
    Self { dir, fixture }
  }

  pub fn path(&self, name: &str) -> PathBuf {
    self.dir.path().join(name)
  }

  pub fn set_responses(&self, responses: &Value) {
    test_support::write_json(self.dir.path(), "api.json", responses);
  }

  /// The binary running inside the workspace against the fixture, January 2024.
  pub fn cmd(&self) -> assert_cmd::Command {
    let mut cmd = test_support::cmd_bin(BIN);
    cmd
      .current_dir(self.dir.path())
      .env("RVM_TEST_API_FIXTURE", &self.fixture)
      .args(["2024-01-01", "2024-01-31", "--now-override", NOW]);
    cmd
  }

  pub fn run_ok(&self) -> Value {
    let out = self.cmd().output().unwrap();
    assert!(
      out.status.success(),
      "run failed: {}",
      String::from_utf8_lossy(&out.stderr)
    );
    serde_json::from_slice(&out.stdout).unwrap()
  }
}

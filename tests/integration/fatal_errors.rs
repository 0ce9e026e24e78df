use predicates::prelude::*;
use serde_json::json;

use crate::scenario::{self, Workspace};

#[test]
fn transport_failure_aborts_without_writing_caches() {
  let ws = Workspace::new(&scenario::responses_with_status(&scenario::detail_url("api", 4), 502));
  ws.cmd()
    .assert()
    .failure()
    .stdout(predicate::str::is_empty())
    .stderr(predicate::str::contains("with status 502"));

  assert!(!ws.path("search_api_cache.json").exists());
  assert!(!ws.path("pulls_api_cache.json").exists());
}

#[test]
fn existing_caches_survive_a_failed_run() {
  let ws = Workspace::new(&scenario::responses());
  ws.run_ok();
  let before = std::fs::read_to_string(ws.path("pulls_api_cache.json")).unwrap();

  // A changed pull request forces a refetch, which now fails.
  let mut page = scenario::search_page();
  page["items"][2]["updated_at"] = json!("2024-01-20T00:00:00Z");
  ws.set_responses(&json!({ scenario::SEARCH_URL: page }));

  ws.cmd().assert().failure().stderr(predicate::str::contains("404"));
  let after = std::fs::read_to_string(ws.path("pulls_api_cache.json")).unwrap();
  assert_eq!(before, after);
}

#[test]
fn search_overflow_is_fatal() {
  let mut page = scenario::search_page();
  page["total_count"] = json!(250);
  let ws = Workspace::new(&json!({ scenario::SEARCH_URL: page }));

  ws.cmd()
    .assert()
    .failure()
    .stderr(predicate::str::contains("search returned 3 of 250"));
  assert!(!ws.path("search_api_cache.json").exists());
}

#[test]
fn malformed_timestamp_is_fatal() {
  let mut responses = scenario::responses();
  responses[scenario::detail_url("web", 1)]["created_at"] = json!("2024-01-09 00:00:00");
  let ws = Workspace::new(&responses);

  ws.cmd()
    .assert()
    .failure()
    .stderr(predicate::str::contains("invalid timestamp \"2024-01-09 00:00:00\""));
}

#[test]
fn missing_settings_file_is_reported() {
  let ws = Workspace::new(&scenario::responses());
  ws.cmd()
    .args(["--config", "absent.json"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("loading settings absent.json"));
}

#[test]
fn missing_token_without_fixture_is_a_config_error() {
  let ws = Workspace::new(&scenario::responses());
  test_support::cmd_bin(scenario::BIN)
    .current_dir(ws.dir.path())
    // No `gh` on PATH either.
    .env("PATH", "")
    .args(["2024-01-01", "2024-01-31"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("no GitHub token found"));
}

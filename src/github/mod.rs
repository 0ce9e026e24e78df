// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: GitHub transport seam (GET JSON with bearer auth), token discovery and backend selection
// role: github/transport
// inputs: env GITHUB_TOKEN / GH_TOKEN; optional `gh` CLI; env RVM_TEST_API_FIXTURE for file-backed responses
// outputs: serde_json::Value payloads or ReportError::Transport
// side_effects: Network calls to the configured API base; spawns `gh` subprocess when needed
// invariants:
// - Any non-success status is an error; nothing is retried here
// - Token discovery prefers GITHUB_TOKEN, then GH_TOKEN, then `gh auth token`
// - The fixture backend serves only the URLs it was given; anything else is a 404
// errors: Transport with status when the server answered, without status when the request never completed
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

pub mod search;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use crate::error::{ReportError, Result};

pub const FIXTURE_ENV: &str = "RVM_TEST_API_FIXTURE";

// --- Trait seam for the GitHub REST API ---
pub trait GithubApi {
  fn get_json(&self, url: &str) -> Result<serde_json::Value>;
}

/// Discover a GitHub token: env vars first, then `gh auth token` if available.
pub fn get_github_token() -> Option<String> {
  for var in ["GITHUB_TOKEN", "GH_TOKEN"] {
    if let Ok(t) = std::env::var(var) {
      if !t.trim().is_empty() {
        return Some(t.trim().to_string());
      }
    }
  }

  if let Ok(output) = std::process::Command::new("gh").args(["auth", "token"]).output() {
    if output.status.success() {
      let t = String::from_utf8_lossy(&output.stdout).trim().to_string();

      if !t.is_empty() {
        return Some(t);
      }
    }
  }

  None
}

pub struct GithubHttpApi {
  agent: ureq::Agent,
  token: String,
}

impl GithubHttpApi {
  pub fn new(token: String) -> Self {
    let agent = ureq::AgentBuilder::new()
      .timeout(Duration::from_secs(30))
      .user_agent(concat!("review-matrix/", env!("CARGO_PKG_VERSION")))
      .build();
    Self { agent, token }
  }
}

impl GithubApi for GithubHttpApi {
  fn get_json(&self, url: &str) -> Result<serde_json::Value> {
    let resp = self
      .agent
      .get(url)
      .set("Accept", "application/vnd.github+json")
      .set("X-GitHub-Api-Version", "2022-11-28")
      .set("Authorization", &format!("Bearer {}", self.token))
      .call();

    match resp {
      Ok(r) => r.into_json::<serde_json::Value>().map_err(|e| ReportError::Transport {
        url: url.to_string(),
        status: None,
        message: format!("reading JSON body: {e}"),
      }),
      Err(ureq::Error::Status(code, r)) => {
        let reason = r.status_text().to_string();
        let body = r.into_string().unwrap_or_default();
        Err(ReportError::Transport {
          url: url.to_string(),
          status: Some(code),
          message: if body.is_empty() { reason } else { format!("{reason}: {}", body.trim()) },
        })
      }
      Err(ureq::Error::Transport(t)) => Err(ReportError::Transport {
        url: url.to_string(),
        status: None,
        message: t.to_string(),
      }),
    }
  }
}

/// Serves canned responses keyed by URL and records every request.
///
/// A response of the form `{"$status": 500}` is answered as that HTTP status.
#[derive(Default)]
pub struct FixtureApi {
  responses: BTreeMap<String, serde_json::Value>,
  calls: RefCell<Vec<String>>,
}

impl FixtureApi {
  #[cfg(test)]
  pub fn new() -> Self {
    Self::default()
  }

  pub fn from_file(path: &Path) -> Result<Self> {
    let bytes = std::fs::read(path).map_err(|e| ReportError::io(path, e))?;
    let responses = serde_json::from_slice(&bytes)
      .map_err(|e| ReportError::data(path.display().to_string(), e.to_string()))?;
    Ok(Self {
      responses,
      calls: RefCell::new(Vec::new()),
    })
  }

  #[cfg(test)]
  pub fn with(mut self, url: &str, payload: serde_json::Value) -> Self {
    self.responses.insert(url.to_string(), payload);
    self
  }

  #[cfg(test)]
  pub fn calls(&self) -> Vec<String> {
    self.calls.borrow().clone()
  }
}

impl GithubApi for FixtureApi {
  fn get_json(&self, url: &str) -> Result<serde_json::Value> {
    self.calls.borrow_mut().push(url.to_string());

    let Some(payload) = self.responses.get(url) else {
      return Err(ReportError::Transport {
        url: url.to_string(),
        status: Some(404),
        message: "Not Found".into(),
      });
    };

    if let Some(code) = payload.get("$status").and_then(|s| s.as_u64()) {
      return Err(ReportError::Transport {
        url: url.to_string(),
        status: Some(code as u16),
        message: "fixture status".into(),
      });
    }

    Ok(payload.clone())
  }
}

/// Pick the backend: the fixture file when RVM_TEST_API_FIXTURE is set, otherwise HTTP.
///
/// `token` is only consulted for the HTTP backend.
pub fn build_api(token: impl FnOnce() -> Option<String>) -> Result<Box<dyn GithubApi>> {
  if let Ok(path) = std::env::var(FIXTURE_ENV) {
    tracing::info!(path = %path, "serving API responses from fixture file");
    return Ok(Box::new(FixtureApi::from_file(Path::new(&path))?));
  }

  match token() {
    Some(t) => Ok(Box::new(GithubHttpApi::new(t))),
    None => Err(ReportError::Config(
      "no GitHub token found; set GITHUB_TOKEN (or GH_TOKEN) or log in with `gh auth login`".into(),
    )),
  }
}

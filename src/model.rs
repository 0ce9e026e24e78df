// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Typed shapes of the GitHub REST payloads consumed by the aggregation core
// role: model/types
// outputs: Deserializable structs for search results, requested reviewers, reviews and pull details
// invariants: Only fields the core reads are modeled; unknown fields are ignored; missing required fields surface as DataConsistency errors
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use serde::de::DeserializeOwned;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct UserRef {
  pub login: String,
}

/// One page of `GET /search/issues`.
#[derive(Debug, Deserialize, Clone)]
pub struct SearchPage {
  pub total_count: u64,
  pub incomplete_results: bool,
  pub items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchItem {
  pub html_url: String,
  /// `https://api.github.com/repos/<owner>/<repo>`
  pub repository_url: String,
  pub number: u64,
  pub title: String,
  pub state: String,
  pub user: UserRef,
  pub created_at: String,
  #[serde(default)]
  pub closed_at: Option<String>,
  pub updated_at: String,
}

impl SearchItem {
  pub fn pull_ref(&self) -> PullRef {
    PullRef {
      repository_url: self.repository_url.trim_end_matches('/').to_string(),
      number: self.number,
    }
  }
}

/// Identifies one pull request by its repository API URL and number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PullRef {
  pub repository_url: String,
  pub number: u64,
}

impl PullRef {
  pub fn repo_name(&self) -> &str {
    self.repository_url.rsplit('/').next().unwrap_or_default()
  }
}

impl std::fmt::Display for PullRef {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{} #{}", self.repo_name(), self.number)
  }
}

/// Reviews are read from a single page of this size.
pub const REVIEWS_PAGE_SIZE: usize = 100;

/// Sub-resources of a pull request kept in the detail cache.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Endpoint {
  PullDetail,
  RequestedReviewers,
  Reviews,
}

impl Endpoint {
  pub fn url(self, pull: &PullRef) -> String {
    let base = format!("{}/pulls/{}", pull.repository_url, pull.number);
    match self {
      Endpoint::PullDetail => base,
      Endpoint::RequestedReviewers => format!("{base}/requested_reviewers"),
      Endpoint::Reviews => format!("{base}/reviews?per_page={REVIEWS_PAGE_SIZE}"),
    }
  }
}

/// Binds a payload shape to the endpoint that serves it.
pub trait EndpointPayload: DeserializeOwned {
  const ENDPOINT: Endpoint;
}

/// `GET /repos/{owner}/{repo}/pulls/{n}/requested_reviewers`
#[derive(Debug, Deserialize, Clone, Default)]
pub struct RequestedReviewers {
  pub users: Vec<UserRef>,
}

impl EndpointPayload for RequestedReviewers {
  const ENDPOINT: Endpoint = Endpoint::RequestedReviewers;
}

#[derive(Debug, Deserialize, Clone)]
pub struct Review {
  /// Null for reviews left by deleted accounts.
  #[serde(default)]
  pub user: Option<UserRef>,
  #[serde(default)]
  pub submitted_at: Option<String>,
}

/// `GET /repos/{owner}/{repo}/pulls/{n}/reviews`, in submission order.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(transparent)]
pub struct Reviews(pub Vec<Review>);

impl EndpointPayload for Reviews {
  const ENDPOINT: Endpoint = Endpoint::Reviews;
}

/// `GET /repos/{owner}/{repo}/pulls/{n}`
#[derive(Debug, Deserialize, Clone)]
pub struct PullDetail {
  pub title: String,
  pub created_at: String,
  #[serde(default)]
  pub closed_at: Option<String>,
  #[serde(default)]
  pub merged: bool,
  #[serde(default)]
  pub comments: u64,
  #[serde(default)]
  pub review_comments: u64,
}

impl EndpointPayload for PullDetail {
  const ENDPOINT: Endpoint = Endpoint::PullDetail;
}

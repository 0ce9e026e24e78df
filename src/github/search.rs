// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Single-page pull request search for a set of authors within a creation-date range
// role: github/search
// inputs: Organization, author logins, FROM/TO dates, API base URL, a GithubApi transport
// outputs: Search items in result order (created desc)
// invariants:
// - Exactly one request of PAGE_SIZE items; no pagination
// - total_count above the returned item count, or incomplete_results, is a SearchOverflow error
// errors: Transport errors bubble unchanged; undecodable pages become DataConsistency
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use chrono::NaiveDate;

use crate::cache::decode;
use crate::error::{ReportError, Result};
use crate::github::GithubApi;
use crate::model::{SearchItem, SearchPage};

pub const PAGE_SIZE: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
  pub organization: String,
  pub authors: Vec<String>,
  pub from: NaiveDate,
  pub to: NaiveDate,
}

impl SearchQuery {
  fn terms(&self) -> Vec<String> {
    let mut terms = vec!["type:pr".to_string(), format!("org:{}", self.organization)];
    terms.extend(self.authors.iter().map(|a| format!("author:{a}")));
    terms.push(format!(
      "created:{}..{}",
      self.from.format("%Y-%m-%d"),
      self.to.format("%Y-%m-%d")
    ));
    terms
  }

  /// The query as typed into the web UI search box.
  pub fn display(&self) -> String {
    self.terms().join(" ")
  }

  pub fn url(&self, api_base: &str) -> String {
    format!(
      "{}/search/issues?q={}&sort=created&order=desc&per_page={}",
      api_base.trim_end_matches('/'),
      self.terms().join("+"),
      PAGE_SIZE
    )
  }
}

/// Run the search and return its items in result order.
///
/// More matches than fit in one page is an error rather than a reason to paginate.
pub fn search_pull_requests(
  api: &dyn GithubApi,
  api_base: &str,
  query: &SearchQuery,
) -> Result<Vec<SearchItem>> {
  tracing::info!(query = %query.display(), "searching pull requests");

  let url = query.url(api_base);
  let raw = api.get_json(&url)?;
  let page: SearchPage = decode(&url, &raw)?;

  if (page.items.len() as u64) < page.total_count || page.incomplete_results {
    return Err(ReportError::SearchOverflow {
      returned: page.items.len(),
      total: page.total_count,
      incomplete: page.incomplete_results,
    });
  }

  tracing::info!(count = page.total_count, "searched pull requests");
  Ok(page.items)
}

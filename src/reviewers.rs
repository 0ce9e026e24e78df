// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Derive requested/completed reviewer lists and the first qualifying review for one pull request
// role: review/resolution
// inputs: Requested-reviewers payload, reviews payload (submission order), PR author, automated reviewer logins
// outputs: ResolvedReviewers { requested, completed, first_review }
// invariants:
// - requested and completed are disjoint
// - the author never appears in completed
// - completed is recomputed from the current requested list on every evaluation
// - completed keeps first-seen order of distinct reviewers
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::HashSet;

use crate::model::{RequestedReviewers, Reviews};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedReviewers {
  pub requested: Vec<String>,
  pub completed: Vec<String>,
  /// Raw API timestamp of the first qualifying review.
  pub first_review: Option<String>,
}

/// Everyone currently listed as a requested reviewer, in API order.
pub fn resolve_requested(payload: &RequestedReviewers) -> Vec<String> {
  payload.users.iter().map(|u| u.login.clone()).collect()
}

/// Distinct reviewers who submitted any review, minus the author and minus
/// anyone whose review is requested again.
pub fn resolve_completed(reviews: &Reviews, author: &str, requested: &[String]) -> Vec<String> {
  let mut seen: HashSet<&str> = HashSet::new();

  reviews
    .0
    .iter()
    .filter_map(|r| r.user.as_ref().map(|u| u.login.as_str()))
    .filter(|login| seen.insert(*login))
    .filter(|login| *login != author)
    .filter(|login| !requested.iter().any(|r| r.as_str() == *login))
    .map(str::to_string)
    .collect()
}

/// Timestamp of the first submitted review not written by the author or a bot identity.
pub fn first_review_at<'a>(reviews: &'a Reviews, author: &str, automated: &[String]) -> Option<&'a str> {
  reviews.0.iter().find_map(|r| {
    let login = r.user.as_ref()?.login.as_str();
    if login == author || automated.iter().any(|a| a == login) {
      return None;
    }
    r.submitted_at.as_deref()
  })
}

pub fn resolve(
  requested_payload: &RequestedReviewers,
  reviews: &Reviews,
  author: &str,
  automated: &[String],
) -> ResolvedReviewers {
  let requested = resolve_requested(requested_payload);
  let completed = resolve_completed(reviews, author, &requested);
  let first_review = first_review_at(reviews, author, automated).map(str::to_string);

  ResolvedReviewers {
    requested,
    completed,
    first_review,
  }
}

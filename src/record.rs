// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Build the PullRequest entity and the per-PR output record (status, reviewers, business-day timings)
// role: assembly/record
// inputs: Search item, pull detail payload, resolved reviewers, "now", holiday calendar, target zone
// outputs: Option<PrRecord>; None for pull requests closed without merge
// invariants:
// - Open pull requests measure lifetime up to "now"; missing first review measures up to "now"
// - An end instant before the creation instant is a DataConsistency error, never passed to the calculator
// - Timestamps are rendered RFC3339 in the target zone
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use chrono::DateTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::business_days::{business_elapsed, BusinessElapsed};
use crate::error::{ReportError, Result};
use crate::holidays::HolidayCalendar;
use crate::model::{PullDetail, SearchItem};
use crate::reviewers::ResolvedReviewers;
use crate::timestamp;

#[derive(Debug, Clone, PartialEq)]
pub struct PullRequest {
  pub title: String,
  pub created: DateTime<Tz>,
  pub first_review: Option<DateTime<Tz>>,
  pub closed: Option<DateTime<Tz>>,
  pub is_merged: bool,
  pub num_comments: u64,
}

impl PullRequest {
  pub fn from_detail(detail: &PullDetail, first_review: Option<&str>, zone: Tz) -> Result<Self> {
    Ok(Self {
      title: detail.title.clone(),
      created: timestamp::normalize(&detail.created_at, zone)?,
      first_review: timestamp::normalize_opt(first_review, zone)?,
      closed: timestamp::normalize_opt(detail.closed_at.as_deref(), zone)?,
      is_merged: detail.merged,
      num_comments: detail.comments + detail.review_comments,
    })
  }

  /// Closed without merge.
  pub fn is_abandoned(&self) -> bool {
    self.closed.is_some() && !self.is_merged
  }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PrRecord {
  pub author: String,
  pub title: String,
  pub html_url: String,
  pub status: String,
  pub merged: bool,
  pub created_day: String,
  pub closed_day: Option<String>,
  pub first_review_day: Option<String>,
  pub requested: Vec<String>,
  pub completed: Vec<String>,
  pub num_comments: u64,
  pub lifetime_day: i64,
  pub lifetime_hour: i64,
  /// Whole business days folded in (`days * 24 + hours`).
  pub first_review_hour: i64,
  pub first_review_min: i64,
}

/// Compose the output record for one pull request, or `None` when it was abandoned.
pub fn assemble(
  item: &SearchItem,
  pr: &PullRequest,
  reviewers: &ResolvedReviewers,
  now: &DateTime<Tz>,
  calendar: &dyn HolidayCalendar,
) -> Result<Option<PrRecord>> {
  if pr.is_abandoned() {
    return Ok(None);
  }

  let context = item.pull_ref().to_string();
  let lifetime = elapsed(&pr.created, pr.closed.as_ref().unwrap_or(now), calendar, &context)?;
  let first_review = elapsed(
    &pr.created,
    pr.first_review.as_ref().unwrap_or(now),
    calendar,
    &context,
  )?;

  Ok(Some(PrRecord {
    author: item.user.login.clone(),
    title: pr.title.clone(),
    html_url: item.html_url.clone(),
    status: item.state.clone(),
    merged: pr.is_merged,
    created_day: timestamp::to_rfc3339(&pr.created),
    closed_day: pr.closed.as_ref().map(timestamp::to_rfc3339),
    first_review_day: pr.first_review.as_ref().map(timestamp::to_rfc3339),
    requested: reviewers.requested.clone(),
    completed: reviewers.completed.clone(),
    num_comments: pr.num_comments,
    lifetime_day: lifetime.days,
    lifetime_hour: lifetime.hours(),
    first_review_hour: first_review.total_hours(),
    first_review_min: first_review.minutes(),
  }))
}

fn elapsed(
  start: &DateTime<Tz>,
  end: &DateTime<Tz>,
  calendar: &dyn HolidayCalendar,
  context: &str,
) -> Result<BusinessElapsed> {
  if end < start {
    return Err(ReportError::data(
      context,
      format!(
        "{} precedes creation time {}",
        timestamp::to_rfc3339(end),
        timestamp::to_rfc3339(start)
      ),
    ));
  }
  Ok(business_elapsed(start, end, calendar))
}

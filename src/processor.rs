// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Orchestrate one run: search, per-PR cache-gated fetches, reviewer resolution, matrix and record assembly, flush, report
// role: processing/orchestrator
// inputs: EffectiveConfig; settings file; GitHub API backend; cache files
// outputs: Report JSON on stdout or --out; refreshed cache files
// side_effects: Network (or fixture) reads; writes both cache files and the report file
// invariants:
// - Pull requests are processed sequentially in search-result order
// - One staleness decision per pull request is passed to all three detail fetches
// - Matrix and authored counts change at most once per included pull request
// - Caches are flushed only after every pull request processed successfully
// - A full page of reviews (REVIEWS_PAGE_SIZE) is a ReviewsOverflow error
// errors: Any ReportError aborts the run; nothing is persisted on failure
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::{Context, Result};
use chrono::DateTime;
use chrono_tz::Tz;

use crate::cache::{DetailCache, SearchCache};
use crate::cli::EffectiveConfig;
use crate::config::Settings;
use crate::error::ReportError;
use crate::github::search::{search_pull_requests, SearchQuery};
use crate::github::{self, GithubApi};
use crate::holidays::HolidayCalendar;
use crate::matrix::{AuthorIndex, InteractionMatrix, COMPLETED, REQUESTED};
use crate::model::{PullDetail, RequestedReviewers, Reviews, SearchItem, REVIEWS_PAGE_SIZE};
use crate::record::{assemble, PrRecord, PullRequest};
use crate::report::{write_report, Report};
use crate::{reviewers, timestamp, util};

/// Inputs shared by every pull request in one run.
pub struct RunContext<'a> {
  pub authors: &'a AuthorIndex,
  pub automated_reviewers: &'a [String],
  pub zone: Tz,
  pub now: DateTime<Tz>,
  pub calendar: &'a dyn HolidayCalendar,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
  pub authored: Vec<u64>,
  pub matrix: InteractionMatrix,
  pub records: Vec<PrRecord>,
}

pub fn process_pull_requests(
  api: &dyn GithubApi,
  items: &[SearchItem],
  search_cache: &mut SearchCache,
  detail_cache: &mut DetailCache,
  ctx: &RunContext<'_>,
) -> Result<Aggregation, ReportError> {
  let mut authored = vec![0u64; ctx.authors.len()];
  let mut matrix = InteractionMatrix::new(ctx.authors.len());
  let mut records = Vec::new();

  for item in items {
    let pull = item.pull_ref();
    let context = pull.to_string();
    let force = search_cache.is_stale(item);
    tracing::debug!(pr = %context, stale = force, "processing");

    let requested: RequestedReviewers = detail_cache.fetch(api, &pull, force)?;
    let reviews: Reviews = detail_cache.fetch(api, &pull, force)?;
    if reviews.0.len() >= REVIEWS_PAGE_SIZE {
      return Err(ReportError::ReviewsOverflow {
        pull: context,
        limit: REVIEWS_PAGE_SIZE,
      });
    }
    let detail: PullDetail = detail_cache.fetch(api, &pull, force)?;

    let author = item.user.login.as_str();
    let resolved = reviewers::resolve(&requested, &reviews, author, ctx.automated_reviewers);
    let pr = PullRequest::from_detail(&detail, resolved.first_review.as_deref(), ctx.zone)?;

    let Some(record) = assemble(item, &pr, &resolved, &ctx.now, ctx.calendar)? else {
      tracing::debug!(pr = %context, "closed without merge; skipped");
      continue;
    };

    let author_idx = matrix.record(ctx.authors, author, &resolved.requested, &resolved.completed, &context)?;
    authored[author_idx] += 1;
    records.push(record);
  }

  Ok(Aggregation {
    authored,
    matrix,
    records,
  })
}

fn log_summary(labels: &[String], agg: &Aggregation) {
  let requested = agg.matrix.reviewer_totals(REQUESTED);
  let completed = agg.matrix.reviewer_totals(COMPLETED);
  for (i, label) in labels.iter().enumerate() {
    tracing::info!("{label}: {}, {}, {}", agg.authored[i], requested[i], completed[i]);
  }
}

pub fn run(cfg: &EffectiveConfig) -> Result<()> {
  let settings = Settings::load(&cfg.config).with_context(|| format!("loading settings {}", cfg.config.display()))?;
  let zone = settings.zone()?;
  let calendar = settings.calendar();
  let authors = AuthorIndex::new(&settings.authors)?;

  let now_utc = util::effective_now(util::parse_now_override(cfg.now_override.as_deref())?);
  let now = timestamp::in_zone(now_utc, zone);

  let api = github::build_api(github::get_github_token)?;

  let mut search_cache = SearchCache::load(&cfg.search_cache)?;
  let mut detail_cache = DetailCache::load(&cfg.detail_cache)?;
  tracing::info!(
    search_entries = search_cache.len(),
    detail_entries = detail_cache.len(),
    "loaded caches"
  );

  let query = SearchQuery {
    organization: settings.organization.clone(),
    authors: settings.authors.clone(),
    from: cfg.from,
    to: cfg.to,
  };
  let items = search_pull_requests(api.as_ref(), &settings.api_base, &query)?;
  tracing::info!(
    pull_requests = items.len(),
    max_api_calls = items.len() * 3,
    "fetching review details"
  );

  let ctx = RunContext {
    authors: &authors,
    automated_reviewers: &settings.automated_reviewers,
    zone,
    now,
    calendar: &calendar,
  };
  let agg = process_pull_requests(api.as_ref(), &items, &mut search_cache, &mut detail_cache, &ctx)?;

  let stats = detail_cache.stats();
  tracing::info!(hits = stats.hits, fetches = stats.fetches, "detail cache");

  search_cache.flush(&cfg.search_cache)?;
  detail_cache.flush(&cfg.detail_cache)?;
  tracing::info!(
    search = %cfg.search_cache.display(),
    detail = %cfg.detail_cache.display(),
    "caches flushed"
  );

  let labels = settings.labels();
  log_summary(&labels, &agg);

  let report = Report::new(cfg.from, cfg.to, labels, agg.authored, agg.matrix, agg.records);
  write_report(&cfg.out, &report)?;
  Ok(())
}

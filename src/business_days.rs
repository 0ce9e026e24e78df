// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Elapsed time between two instants measured in business days plus an intra-day remainder
// role: time/business-days
// inputs: start/end instants in the target zone; a HolidayCalendar
// outputs: BusinessElapsed { days, remainder_seconds }
// invariants:
// - Caller guarantees end >= start (checked in debug builds only)
// - days = max(B - 1, 0) where B counts business days in [start.date, end.date]
// - remainder is the sub-day part of the wall-clock difference end - start, whatever B is
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use chrono::{DateTime, TimeZone};

use crate::holidays::HolidayCalendar;

const SECONDS_PER_DAY: i64 = 86_400;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct BusinessElapsed {
  pub days: i64,
  /// Seconds left over after removing whole days from the raw difference.
  pub remainder_seconds: i64,
}

impl BusinessElapsed {
  pub fn hours(&self) -> i64 {
    self.remainder_seconds / 3600
  }

  pub fn minutes(&self) -> i64 {
    self.remainder_seconds % 3600 / 60
  }

  /// Business days folded into hours (`days * 24 + hours`).
  pub fn total_hours(&self) -> i64 {
    self.days * 24 + self.hours()
  }
}

/// Count business days between the dates of `start` and `end`, inclusive.
pub fn count_business_days<Tz: TimeZone>(
  start: &DateTime<Tz>,
  end: &DateTime<Tz>,
  calendar: &dyn HolidayCalendar,
) -> i64 {
  let last = end.date_naive();
  start
    .date_naive()
    .iter_days()
    .take_while(|d| *d <= last)
    .filter(|d| calendar.is_business_day(*d))
    .count() as i64
}

/// Business-day elapsed time from `start` to `end`.
///
/// The start day is not counted as elapsed time, hence `B - 1`. The rule is
/// applied the same way for lifetime and first-review latency.
pub fn business_elapsed<Tz: TimeZone>(
  start: &DateTime<Tz>,
  end: &DateTime<Tz>,
  calendar: &dyn HolidayCalendar,
) -> BusinessElapsed {
  debug_assert!(end >= start, "business_elapsed called with end before start");

  let business_days = count_business_days(start, end, calendar);
  let raw = end.clone().signed_duration_since(start.clone()).num_seconds();
  BusinessElapsed {
    days: (business_days - 1).max(0),
    remainder_seconds: raw.rem_euclid(SECONDS_PER_DAY),
  }
}

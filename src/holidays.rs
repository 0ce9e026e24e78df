// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Regional business-day calendar (weekends, national holidays, configured extra days off)
// role: time/calendar
// inputs: Region selector and extra dates from settings
// outputs: HolidayCalendar implementations answering is_business_day(date)
// invariants:
// - Saturdays and Sundays are never business days
// - Japanese rules cover fixed, Happy Monday, equinox, substitute and citizen's holidays (valid 2000..=2099)
// - Extra dates are non-business days regardless of region
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::BTreeSet;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Seam consulted once per calendar day by the business-day calculator.
pub trait HolidayCalendar {
  fn is_business_day(&self, date: NaiveDate) -> bool;
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
  #[default]
  Jp,
  /// Weekends only.
  None,
}

#[derive(Clone, Debug)]
pub struct RegionalCalendar {
  region: Region,
  extra: BTreeSet<NaiveDate>,
}

impl RegionalCalendar {
  pub fn new(region: Region, extra: impl IntoIterator<Item = NaiveDate>) -> Self {
    Self {
      region,
      extra: extra.into_iter().collect(),
    }
  }

  pub fn holiday_name(&self, date: NaiveDate) -> Option<&'static str> {
    if self.extra.contains(&date) {
      return Some("Company holiday");
    }
    match self.region {
      Region::Jp => japanese_holiday(date),
      Region::None => None,
    }
  }
}

impl HolidayCalendar for RegionalCalendar {
  fn is_business_day(&self, date: NaiveDate) -> bool {
    !is_weekend(date) && self.holiday_name(date).is_none()
  }
}

pub fn is_weekend(date: NaiveDate) -> bool {
  matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Name of the Japanese national holiday on `date`, if any.
pub fn japanese_holiday(date: NaiveDate) -> Option<&'static str> {
  if let Some(name) = statutory_holiday(date) {
    return Some(name);
  }
  if is_substitute_holiday(date) {
    return Some("Substitute Holiday");
  }
  // A weekday sandwiched between two holidays becomes one as well.
  if date.weekday() != Weekday::Sun
    && statutory_holiday(date - Duration::days(1)).is_some()
    && statutory_holiday(date + Duration::days(1)).is_some()
  {
    return Some("Citizens' Holiday");
  }
  None
}

// A Sunday holiday moves to the next day that is not itself a holiday.
fn is_substitute_holiday(date: NaiveDate) -> bool {
  let mut cur = date - Duration::days(1);
  while statutory_holiday(cur).is_some() {
    if cur.weekday() == Weekday::Sun {
      return true;
    }
    cur -= Duration::days(1);
  }
  false
}

fn statutory_holiday(date: NaiveDate) -> Option<&'static str> {
  let y = date.year();
  let m = date.month();
  let d = date.day();

  let special = match (y, m, d) {
    (2019, 4, 30) | (2019, 5, 2) => Some("Citizens' Holiday"),
    (2019, 5, 1) => Some("Enthronement Day"),
    (2019, 10, 22) => Some("Enthronement Ceremony Day"),
    _ => None,
  };
  if special.is_some() {
    return special;
  }

  match m {
    1 if d == 1 => Some("New Year's Day"),
    1 if d == nth_monday(y, 1, 2) => Some("Coming of Age Day"),
    2 if d == 11 => Some("National Foundation Day"),
    2 if d == 23 && y >= 2020 => Some("Emperor's Birthday"),
    3 if d == vernal_equinox_day(y) => Some("Vernal Equinox Day"),
    4 if d == 29 => Some("Showa Day"),
    5 if d == 3 => Some("Constitution Memorial Day"),
    5 if d == 4 => Some("Greenery Day"),
    5 if d == 5 => Some("Children's Day"),
    7 if d == marine_day(y) => Some("Marine Day"),
    8 if d == 11 && y >= 2016 && y != 2020 && y != 2021 => Some("Mountain Day"),
    8 if (y, d) == (2020, 10) || (y, d) == (2021, 8) => Some("Mountain Day"),
    9 if d == nth_monday(y, 9, 3) => Some("Respect for the Aged Day"),
    9 if d == autumnal_equinox_day(y) => Some("Autumnal Equinox Day"),
    7 if (y, d) == (2020, 24) || (y, d) == (2021, 23) => Some("Sports Day"),
    10 if d == nth_monday(y, 10, 2) && y != 2020 && y != 2021 => Some("Sports Day"),
    11 if d == 3 => Some("Culture Day"),
    11 if d == 23 => Some("Labor Thanksgiving Day"),
    12 if d == 23 && (1989..=2018).contains(&y) => Some("Emperor's Birthday"),
    _ => None,
  }
}

fn marine_day(y: i32) -> u32 {
  match y {
    2020 => 23,
    2021 => 22,
    _ => nth_monday(y, 7, 3),
  }
}

fn nth_monday(y: i32, month: u32, n: u8) -> u32 {
  NaiveDate::from_weekday_of_month_opt(y, month, Weekday::Mon, n)
    .map(|d| d.day())
    .unwrap_or(0)
}

// Astronomical approximation published for 1980..=2099.
fn vernal_equinox_day(y: i32) -> u32 {
  equinox(20.8431, y)
}

fn autumnal_equinox_day(y: i32) -> u32 {
  equinox(23.2488, y)
}

fn equinox(base: f64, y: i32) -> u32 {
  let offset = f64::from(y - 1980);
  (base + 0.242194 * offset - ((y - 1980) / 4) as f64).floor() as u32
}

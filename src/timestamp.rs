// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Convert GitHub API timestamps (UTC, `Z` suffix) into instants in the report's target zone
// role: time/normalization
// inputs: API timestamp strings (optional); IANA zone names from settings
// outputs: DateTime<Tz> values; RFC3339 renderings in the target zone
// invariants: Parsing is strict; anything but `%Y-%m-%dT%H:%M:%SZ` is a Format error; absent input stays absent
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use chrono::{DateTime, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{ReportError, Result};

const API_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

pub fn parse_target_zone(name: &str) -> Result<Tz> {
  name
    .parse::<Tz>()
    .map_err(|_| ReportError::Config(format!("unknown timezone {name:?}")))
}

/// Parse an API timestamp and express it in `zone`.
pub fn normalize(raw: &str, zone: Tz) -> Result<DateTime<Tz>> {
  let naive = NaiveDateTime::parse_from_str(raw, API_FORMAT).map_err(|_| ReportError::Format {
    value: raw.to_string(),
  })?;
  Ok(zone.from_utc_datetime(&naive))
}

pub fn normalize_opt(raw: Option<&str>, zone: Tz) -> Result<Option<DateTime<Tz>>> {
  raw.map(|r| normalize(r, zone)).transpose()
}

/// Re-express an arbitrary UTC instant (e.g. "now") in `zone`.
pub fn in_zone(instant: DateTime<Utc>, zone: Tz) -> DateTime<Tz> {
  instant.with_timezone(&zone)
}

pub fn to_rfc3339(dt: &DateTime<Tz>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}

// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Load and validate the settings file (organization, tracked authors, reviewer bots, zone, holidays)
// role: config/settings
// inputs: JSON settings file path
// outputs: Settings plus derived values (report labels, target zone, holiday calendar)
// invariants: organization non-empty; authors non-empty; unknown keys rejected
// errors: Io for unreadable files; Config for invalid content
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::Path;

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{ReportError, Result};
use crate::holidays::{Region, RegionalCalendar};
use crate::timestamp;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
  pub organization: String,
  /// Tracked members; their order fixes the matrix index.
  pub authors: Vec<String>,
  /// Review identities that never count as a first review.
  #[serde(default = "default_automated_reviewers")]
  pub automated_reviewers: Vec<String>,
  /// Suffixes stripped from logins to form report labels (e.g. "-corp").
  #[serde(default)]
  pub label_suffixes: Vec<String>,
  #[serde(default = "default_timezone")]
  pub timezone: String,
  #[serde(default)]
  pub holidays: HolidaySettings,
  #[serde(default = "default_api_base")]
  pub api_base: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HolidaySettings {
  #[serde(default)]
  pub region: Region,
  /// Additional non-business days.
  #[serde(default)]
  pub extra: Vec<NaiveDate>,
}

fn default_automated_reviewers() -> Vec<String> {
  vec!["copilot-pull-request-reviewer[bot]".to_string()]
}

fn default_timezone() -> String {
  "Asia/Tokyo".to_string()
}

fn default_api_base() -> String {
  "https://api.github.com".to_string()
}

impl Settings {
  pub fn load(path: &Path) -> Result<Self> {
    let bytes = std::fs::read(path).map_err(|e| ReportError::io(path, e))?;
    let settings: Settings = serde_json::from_slice(&bytes)
      .map_err(|e| ReportError::Config(format!("{}: {e}", path.display())))?;
    settings.validate()?;
    Ok(settings)
  }

  pub fn validate(&self) -> Result<()> {
    if self.organization.trim().is_empty() {
      return Err(ReportError::Config("organization must not be empty".into()));
    }
    if self.authors.is_empty() {
      return Err(ReportError::Config("authors must list at least one login".into()));
    }
    self.zone()?;
    Ok(())
  }

  pub fn zone(&self) -> Result<Tz> {
    timestamp::parse_target_zone(&self.timezone)
  }

  pub fn calendar(&self) -> RegionalCalendar {
    RegionalCalendar::new(self.holidays.region, self.holidays.extra.iter().copied())
  }

  /// Author logins with the first matching label suffix removed.
  pub fn labels(&self) -> Vec<String> {
    self
      .authors
      .iter()
      .map(|login| {
        self
          .label_suffixes
          .iter()
          .find_map(|suffix| login.strip_suffix(suffix.as_str()))
          .unwrap_or(login)
          .to_string()
      })
      .collect()
  }
}

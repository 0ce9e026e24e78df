// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Utilities for "now" resolution, atomic JSON persistence, and man page rendering
// role: utilities/helpers
// inputs: Optional RFC3339 override; paths and serializable values; clap CommandFactory
// outputs: Effective "now", files written in place, man page text
// side_effects: write_json_atomic creates a sibling temp file and renames it over the target
// invariants:
// - write_json_atomic never leaves a half-written target; the previous content survives a failed write
// - effective_now is the single place that reads the wall clock
// errors: Io with the offending path; override parse failures bubble as anyhow with the raw value
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::CommandFactory;
use serde::Serialize;

use crate::error::{ReportError, Result};

/// Returns the effective "now" given an optional override.
///
/// When `override_now` is `Some`, that instant is returned; otherwise the
/// current wall clock is used. Open pull requests are measured up to this
/// instant, so tests pin it through `--now-override`.
pub fn effective_now(override_now: Option<DateTime<Utc>>) -> DateTime<Utc> {
  override_now.unwrap_or_else(Utc::now)
}

pub fn parse_now_override(raw: Option<&str>) -> anyhow::Result<Option<DateTime<Utc>>> {
  raw
    .map(|s| {
      DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("invalid --now-override {s:?} (expected RFC3339)"))
    })
    .transpose()
}

fn temp_sibling(path: &Path) -> PathBuf {
  let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
  name.push(format!(".{}.tmp", std::process::id()));
  path.with_file_name(name)
}

/// Serialize `value` as pretty JSON and move it into place with a rename.
pub fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
  let tmp = temp_sibling(path);
  let body = serde_json::to_vec_pretty(value)
    .map_err(|e| ReportError::data(path.display().to_string(), e.to_string()))?;

  let written = std::fs::File::create(&tmp).and_then(|mut f| {
    f.write_all(&body)?;
    f.write_all(b"\n")?;
    f.sync_all()
  });
  if let Err(e) = written {
    let _ = std::fs::remove_file(&tmp);
    return Err(ReportError::io(&tmp, e));
  }

  std::fs::rename(&tmp, path).map_err(|e| {
    let _ = std::fs::remove_file(&tmp);
    ReportError::io(path, e)
  })
}

/// Render a section-1 man page for a clap `CommandFactory` implementor.
/// Returns the troff content as a UTF-8 string.
pub fn render_man_page<T: CommandFactory>() -> anyhow::Result<String> {
  let cmd = T::command();
  let man = clap_mangen::Man::new(cmd);
  let mut buf: Vec<u8> = Vec::new();

  man.render(&mut buf)?;

  Ok(String::from_utf8_lossy(&buf).to_string())
}

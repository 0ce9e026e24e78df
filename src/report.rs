// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Shape and emit the final JSON report (period, labels, three count series, matrix, per-PR records)
// role: output/report
// inputs: Period, report labels, authored counts, InteractionMatrix, PrRecord list
// outputs: Pretty JSON on stdout or in a file
// invariants:
// - datasets are always Author, Review Requested, Review Completed in that order
// - every series has one entry per tracked author, in author-list order
// errors: Io for file targets; stdout write failures are Io with path "-"
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{ReportError, Result};
use crate::matrix::{InteractionMatrix, COMPLETED, REQUESTED};
use crate::record::PrRecord;
use crate::util;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Dataset {
  pub label: String,
  pub data: Vec<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
  pub period: [String; 2],
  pub labels: Vec<String>,
  pub datasets: Vec<Dataset>,
  pub matrix: InteractionMatrix,
  pub pr_details: Vec<PrRecord>,
}

impl Report {
  pub fn new(
    from: NaiveDate,
    to: NaiveDate,
    labels: Vec<String>,
    authored: Vec<u64>,
    matrix: InteractionMatrix,
    pr_details: Vec<PrRecord>,
  ) -> Self {
    let datasets = vec![
      Dataset {
        label: "Author".into(),
        data: authored,
      },
      Dataset {
        label: "Review Requested".into(),
        data: matrix.reviewer_totals(REQUESTED),
      },
      Dataset {
        label: "Review Completed".into(),
        data: matrix.reviewer_totals(COMPLETED),
      },
    ];

    Self {
      period: [from.format("%Y-%m-%d").to_string(), to.format("%Y-%m-%d").to_string()],
      labels,
      datasets,
      matrix,
      pr_details,
    }
  }
}

/// Write the report to `out`; "-" means stdout.
pub fn write_report(out: &str, report: &Report) -> Result<()> {
  if out == "-" {
    let body = serde_json::to_string_pretty(report).map_err(|e| ReportError::data("report", e.to_string()))?;
    let mut stdout = std::io::stdout().lock();
    return writeln!(stdout, "{body}").map_err(|e| ReportError::io("-", e));
  }

  util::write_json_atomic(Path::new(out), report)?;
  tracing::info!(path = out, "wrote report");
  Ok(())
}

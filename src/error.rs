// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Error taxonomy for the aggregation core (timestamps, transport, search, cached payloads)
// role: errors/types
// outputs: ReportError enum and Result alias
// invariants: Every variant is fatal to the run; the recoverable "unknown reviewer" case is a log event, not an error
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
  /// An API timestamp did not match `YYYY-MM-DDTHH:MM:SSZ`.
  #[error("invalid timestamp {value:?}: expected YYYY-MM-DDTHH:MM:SSZ")]
  Format { value: String },

  /// Non-success response, or the request never completed.
  #[error("GET {url} failed{}: {message}", status_suffix(.status))]
  Transport {
    url: String,
    status: Option<u16>,
    message: String,
  },

  #[error("search returned {returned} of {total} pull requests (incomplete: {incomplete}); narrow the date range to stay within one page of 100")]
  SearchOverflow {
    returned: usize,
    total: u64,
    incomplete: bool,
  },

  #[error("{pull} returned a full page of {limit} reviews; later reviews would be dropped")]
  ReviewsOverflow { pull: String, limit: usize },

  #[error("unexpected payload for {context}: {message}")]
  DataConsistency { context: String, message: String },

  #[error("invalid configuration: {0}")]
  Config(String),

  #[error("{path}: {source}")]
  Io {
    path: String,
    #[source]
    source: std::io::Error,
  },
}

impl ReportError {
  pub fn data(context: impl Into<String>, message: impl Into<String>) -> Self {
    ReportError::DataConsistency {
      context: context.into(),
      message: message.into(),
    }
  }

  pub fn io(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
    ReportError::Io {
      path: path.as_ref().display().to_string(),
      source,
    }
  }
}

fn status_suffix(status: &Option<u16>) -> String {
  status.map(|s| format!(" with status {s}")).unwrap_or_default()
}

pub type Result<T> = std::result::Result<T, ReportError>;

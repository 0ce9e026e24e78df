use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::PathBuf;

use crate::util;

static DATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("static regex"));

#[derive(Parser, Debug)]
#[command(
    name = "review-matrix",
    version,
    about = "Aggregate pull request review activity into an author x reviewer matrix (JSON)",
    long_about = None
)]
pub struct Cli {
  /// First creation date to include, YYYY-MM-DD
  #[arg(required_unless_present = "gen_man")]
  pub from: Option<String>,

  /// Last creation date to include (inclusive), YYYY-MM-DD
  #[arg(required_unless_present = "gen_man")]
  pub to: Option<String>,

  /// Settings file (organization, authors, reviewer bots, holidays)
  #[arg(long, default_value = "review-matrix.json")]
  pub config: PathBuf,

  /// Report destination; "-" writes to stdout
  #[arg(long, default_value = "-")]
  pub out: String,

  /// Search cache file (pull request URL -> last seen update time)
  #[arg(long, default_value = "search_api_cache.json")]
  pub search_cache: PathBuf,

  /// Detail cache file (endpoint URL -> raw response)
  #[arg(long, default_value = "pulls_api_cache.json")]
  pub detail_cache: PathBuf,

  /// Emit a troff man page to stdout (internal; for packaging)
  #[arg(long, hide = true)]
  pub gen_man: bool,

  /// Override the "now" instant used for open pull requests (hidden; tests only)
  #[arg(long = "now-override", hide = true)]
  pub now_override: Option<String>,
}

#[derive(Debug)]
pub struct EffectiveConfig {
  pub from: NaiveDate,
  pub to: NaiveDate,
  pub config: PathBuf,
  pub out: String,
  pub search_cache: PathBuf,
  pub detail_cache: PathBuf,
  pub now_override: Option<String>,
}

fn parse_day(label: &str, raw: Option<&str>) -> Result<NaiveDate> {
  let Some(raw) = raw else {
    bail!("missing {label} date (YYYY-MM-DD)");
  };
  if !DATE_RE.is_match(raw) {
    bail!("invalid {label} date {raw:?}: expected YYYY-MM-DD");
  }
  NaiveDate::parse_from_str(raw, "%Y-%m-%d").with_context(|| format!("invalid {label} date {raw:?}"))
}

pub fn normalize(cli: Cli) -> Result<EffectiveConfig> {
  let from = parse_day("FROM", cli.from.as_deref())?;
  let to = parse_day("TO", cli.to.as_deref())?;
  if from > to {
    bail!("FROM {from} is after TO {to}");
  }

  // Fail fast on a bad override rather than after the API calls.
  util::parse_now_override(cli.now_override.as_deref())?;

  Ok(EffectiveConfig {
    from,
    to,
    config: cli.config,
    out: cli.out,
    search_cache: cli.search_cache,
    detail_cache: cli.detail_cache,
    now_override: cli.now_override,
  })
}

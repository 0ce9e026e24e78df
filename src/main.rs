use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod business_days;
mod cache;
mod cli;
mod config;
mod error;
mod github;
mod holidays;
mod matrix;
mod model;
mod processor;
mod record;
mod report;
mod reviewers;
mod timestamp;
mod util;

use crate::cli::{normalize, Cli};

fn init_tracing() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("review_matrix=info"));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_ansi(std::io::stderr().is_terminal())
    .with_target(false)
    .init();
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  if cli.gen_man {
    let page = util::render_man_page::<Cli>()?;
    print!("{}", page);
    return Ok(());
  }

  dotenvy::dotenv().ok();
  init_tracing();

  // Phase 1: normalize CLI
  let cfg = normalize(cli)?;

  // Phase 2: search, aggregate, persist
  processor::run(&cfg)
}

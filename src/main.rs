//! # filecense
//!
//! Prepends license header comments to source files and writes the full
//! license text at the project root.

mod cli;
mod config;
mod diff;
mod error;
mod ignore;
mod license_detection;
mod licenses;
mod logging;
mod output;
mod processor;
mod report;
mod templates;
mod workspace;

use anyhow::Result;

use crate::cli::{Cli, run_add};

fn main() -> Result<()> {
  let cli = Cli::parse_args();
  run_add(cli.add_args)
}

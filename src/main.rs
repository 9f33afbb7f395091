//! # crcheck
//!
//! Binary entry point: parse arguments and hand off to the driver.

use anyhow::Result;

use crcheck::cli::{self, Cli};

fn main() -> Result<()> {
  let args = Cli::parse_args();
  cli::run(args)
}

//! # CLI Module
//!
//! This module contains the command-line driver: argument parsing with clap
//! and the wiring of scanner, report writer and header editor. All policy
//! lives in the core modules; the driver only translates flags into
//! constructor arguments.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use clap::builder::styling::{AnsiColor, Color, Style, Styles};

use crate::editor::{FailurePolicy, HeaderWriter, LargeFileStrategy};
use crate::file_filter::{CandidateFilter, SPECIAL_FILE_NAMES};
use crate::header::CanonicalHeader;
use crate::logging::{LogLevel, Logger, init_tracing};
use crate::report::ReportWriter;
use crate::scanner::Scanner;
use crate::validator::{Classification, HeaderValidator};

const CUSTOM_STYLES: Styles = Styles::styled()
  .header(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .usage(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))).bold())
  .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
  .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold())
  .valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
  .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))));

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(
  version,
  long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), " ", env!("GIT_DATE"), ")"),
  about,
  styles = CUSTOM_STYLES,
  after_help = "Examples:
  # Check all Java files under the current directory and its subdirectories
  crcheck

  # Check one file
  crcheck src/main/java/Example.java

  # Check a directory without recursing
  crcheck src/ --no-recursive

  # Check and insert the canonical header into files where it is missing
  crcheck src/ --fix

  # Run silently; findings still land in the report and exception log files
  crcheck src/ --fix --log-level silent

  # Also check .properties files
  crcheck conf/ --ext properties
",
  help_template = "{before-help}{name} v{version}
{about-section}
{usage-heading} {usage}

{all-args}{after-help}
"
)]
pub struct Cli {
  /// File or directory to check (directories are scanned recursively by
  /// default)
  #[arg(default_value = ".")]
  pub path: PathBuf,

  /// Do not recurse into subdirectories
  #[arg(long)]
  pub no_recursive: bool,

  /// Insert the canonical header into files where it is missing (malformed
  /// headers are reported but never auto-corrected)
  #[arg(long)]
  pub fix: bool,

  /// Console verbosity
  #[arg(long, value_enum, default_value_t = LogLevel::Log, value_name = "LEVEL")]
  pub log_level: LogLevel,

  /// Additional candidate file extensions (repeatable, case-insensitive,
  /// without the leading dot)
  #[arg(long = "ext", value_name = "EXT")]
  pub extensions: Vec<String>,

  /// Directory where result report files are written
  #[arg(long, value_name = "DIR", default_value = ".")]
  pub report_dir: PathBuf,

  /// Append-only flat log file receiving every exception message
  #[arg(long, value_name = "FILE", default_value = "crcheck_exceptions.log")]
  pub exception_log: PathBuf,

  /// Shift oversized files in place instead of rejecting them (bounded
  /// memory, but not crash-safe)
  #[arg(long)]
  pub shift_in_place: bool,

  /// Abort the fix batch at the first failed edit instead of continuing
  #[arg(long)]
  pub abort_on_error: bool,
}

impl Cli {
  /// Parse CLI arguments and return the Cli struct
  pub fn parse_args() -> Self {
    Self::parse()
  }
}

/// Runs a scan (and optionally the fix pass) with the given arguments.
pub fn run(cli: Cli) -> Result<()> {
  init_tracing(cli.log_level);
  let logger = Logger::new(cli.log_level, Some(cli.exception_log.clone()));

  let mut extensions = vec!["java".to_string()];
  extensions.extend(cli.extensions.iter().cloned());
  let filter = CandidateFilter::new(extensions, SPECIAL_FILE_NAMES.iter().map(|n| (*n).to_string()).collect());

  let scanner = Scanner::new(HeaderValidator::new(), &filter, &logger);
  let result = scanner.scan(&cli.path, !cli.no_recursive);

  logger.info(format!(
    "Checked {} files: {} ok, {} missing, {} malformed, {} failed.",
    result.total(),
    result.ok().len(),
    result.missing().len(),
    result.malformed().len(),
    result.paths(Classification::Failed).len(),
  ));

  ReportWriter::new(&cli.report_dir).write(&result, &cli.path, &logger)?;

  if cli.fix && !result.missing().is_empty() {
    let strategy = if cli.shift_in_place {
      LargeFileStrategy::ShiftInPlace
    } else {
      LargeFileStrategy::Reject
    };
    let policy = if cli.abort_on_error {
      FailurePolicy::Abort
    } else {
      FailurePolicy::Continue
    };

    let writer = HeaderWriter::new(CanonicalHeader::new(), &logger)
      .with_large_file_strategy(strategy)
      .with_failure_policy(policy);

    let failures = writer.edit_all(result.missing());
    if failures > 0 {
      logger.info(format!(
        "Header insertion finished with {failures} failure(s); see the exception log."
      ));
    } else {
      logger.info(format!(
        "Inserted the canonical header into {} file(s).",
        result.missing().len()
      ));
    }
  }

  // Findings are communicated through reports and logs, not the exit code
  Ok(())
}

//! # Logging Module
//!
//! This module provides the logging collaborator for the crcheck tool:
//! - A four-level console verbosity setting ([`LogLevel`])
//! - A [`Logger`] value that is injected into the scanner, editor and report
//!   writer at construction (no process-global log level)
//! - An append-only flat exception log that records exception messages
//!   regardless of the console verbosity
//!
//! Internal diagnostics (timings, skip decisions) go through `tracing` and are
//! controlled separately via [`init_tracing`] and `RUST_LOG`.

use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::PathBuf;

use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};
use tracing_subscriber::EnvFilter;

/// Console verbosity levels, ordered from quietest to noisiest.
///
/// Each level includes everything the levels below it print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum LogLevel {
  /// No console output at all
  Silent,
  /// Only exception messages
  Exception,
  /// Notifications and exceptions
  Info,
  /// Log entries, notifications and exceptions
  Log,
}

/// Logging collaborator with an injected verbosity level.
///
/// Log entries and notifications go to stdout, exceptions to stderr.
/// Exception messages are additionally appended to a flat log file (when one
/// is configured) no matter what the console level is, so that a silent run
/// still leaves an audit trail of failures.
#[derive(Debug, Clone)]
pub struct Logger {
  level: LogLevel,
  exception_log: Option<PathBuf>,
}

impl Logger {
  /// Creates a logger with the given console level and optional exception log
  /// file path.
  pub const fn new(level: LogLevel, exception_log: Option<PathBuf>) -> Self {
    Self { level, exception_log }
  }

  /// Creates a console-only logger, useful in tests.
  pub const fn console_only(level: LogLevel) -> Self {
    Self::new(level, None)
  }

  /// The configured console level.
  pub const fn level(&self) -> LogLevel {
    self.level
  }

  /// Writes a `[LOG]`-prefixed entry (shown at the `log` level only).
  pub fn log(&self, message: impl AsRef<str>) {
    if self.level >= LogLevel::Log {
      println!("[LOG] {}", message.as_ref());
    }
  }

  /// Writes a notification (shown at `info` and above).
  pub fn info(&self, message: impl AsRef<str>) {
    if self.level >= LogLevel::Info {
      println!(
        "{}",
        message.as_ref().if_supports_color(Stream::Stdout, |m| m.yellow())
      );
    }
  }

  /// Writes an exception message (shown at `exception` and above) and appends
  /// it to the exception log file regardless of the console level.
  pub fn exception(&self, message: impl AsRef<str>) {
    let message = message.as_ref();
    if self.level >= LogLevel::Exception {
      eprintln!(
        "{} {}",
        "[EXCEPTION]".if_supports_color(Stream::Stderr, |m| m.red()),
        message
      );
    }
    self.append_to_exception_log(message);
  }

  fn append_to_exception_log(&self, message: &str) {
    let Some(ref path) = self.exception_log else {
      return;
    };
    // The exception log is the last resort; a failure to append cannot be
    // reported anywhere else, so it is dropped.
    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
      let _ = writeln!(file, "[EXCEPTION] {message}");
    }
  }
}

/// Initializes the `tracing` subscriber for internal diagnostics.
///
/// The console [`LogLevel`] picks a default filter; `RUST_LOG` overrides it.
/// Diagnostics go to stderr so they never mix with report-style stdout output.
pub fn init_tracing(level: LogLevel) {
  let default_filter = match level {
    LogLevel::Log => "crcheck=debug",
    LogLevel::Info => "crcheck=info",
    LogLevel::Exception | LogLevel::Silent => "crcheck=error",
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

  // try_init so repeated initialization (e.g. in tests) is harmless
  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .try_init();
}

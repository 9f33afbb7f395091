//! # Header Validator Module
//!
//! This module contains the core header-validation engine. It inspects the
//! first lines of a file and decides whether the mandated two-line copyright
//! block is present, absent, or present but malformed.
//!
//! The strict check is a two-line pattern match: line 1 carries the copyright
//! statement with a year or year range and the fixed organization text, line 2
//! the rights-reserved statement. When the strict line-1 match fails, a
//! keyword heuristic distinguishes "the author attempted a header but got the
//! format wrong" (malformed) from "no header at all" (missing).

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use chrono::Datelike;
use regex::Regex;

/// Strict pattern for the first line of the copyright block.
///
/// Accepts a single year or a `from-to` range; year-range sanity is checked
/// separately so an out-of-order range can be reported as malformed rather
/// than missing.
static FIRST_LINE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(
    r"\s*Copyright\s*\(c\)\s*(?:([0-9]{4})\s*-\s*([0-9]{4})|[0-9]{4})\s*Oracle\s*Corporation,\s*Redwood\s*Shores,\s*CA,\s*USA",
  )
  .expect("first line pattern must compile")
});

/// Strict pattern for the second line of the copyright block.
static SECOND_LINE_PATTERN: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?i)all\s*rights\s*reserved").expect("second line pattern must compile"));

/// How many of [`START_LINE_KEYWORDS`] must appear in a line (after stripping
/// whitespace and lowercasing) for it to count as a malformed header attempt.
pub const KEYWORD_MATCH_THRESHOLD: usize = 2;

/// Organization-name fragments used by the fallback heuristic.
const START_LINE_KEYWORDS: [&str; 5] = ["copyright", "oracle", "corporation", "redwood", "shores"];

/// Outcome bucket assigned to a scanned file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
  /// The canonical two-line header is present and valid
  Ok,
  /// No header (and no recognizable attempt at one) was found
  Missing,
  /// A header was attempted but does not match the canonical format
  Malformed,
  /// The file could not be read
  Failed,
}

impl Classification {
  /// Human-readable error-category description, used in report banners.
  pub const fn describe(self) -> &'static str {
    match self {
      Classification::Ok => "Copyright header present",
      Classification::Missing => "Copyright does not present",
      Classification::Malformed => "Copyright wrong format",
      Classification::Failed => "Copyright check failed",
    }
  }

  /// Short lowercase slug, used to derive deterministic report file names.
  pub const fn slug(self) -> &'static str {
    match self {
      Classification::Ok => "ok",
      Classification::Missing => "missing",
      Classification::Malformed => "malformed",
      Classification::Failed => "failed",
    }
  }
}

impl std::fmt::Display for Classification {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.slug())
  }
}

/// Accumulated scan outcome: one ordered path list per classification.
///
/// Paths are appended in discovery order and a path lands in exactly one
/// bucket. The result is built by the scanner and consumed read-only by the
/// report writer and the header editor.
#[derive(Debug, Default)]
pub struct ScanResult {
  ok: Vec<PathBuf>,
  missing: Vec<PathBuf>,
  malformed: Vec<PathBuf>,
  failed: Vec<PathBuf>,
}

impl ScanResult {
  /// Appends a path to the bucket for `classification`.
  pub fn record(&mut self, classification: Classification, path: PathBuf) {
    match classification {
      Classification::Ok => self.ok.push(path),
      Classification::Missing => self.missing.push(path),
      Classification::Malformed => self.malformed.push(path),
      Classification::Failed => self.failed.push(path),
    }
  }

  /// The paths recorded for a classification, in discovery order.
  pub fn paths(&self, classification: Classification) -> &[PathBuf] {
    match classification {
      Classification::Ok => &self.ok,
      Classification::Missing => &self.missing,
      Classification::Malformed => &self.malformed,
      Classification::Failed => &self.failed,
    }
  }

  /// Files with no header; the only bucket the editor may mutate.
  pub fn missing(&self) -> &[PathBuf] {
    &self.missing
  }

  /// Files with a malformed header. Never auto-edited.
  pub fn malformed(&self) -> &[PathBuf] {
    &self.malformed
  }

  /// Files that could not be read. Never auto-edited.
  pub fn failed(&self) -> &[PathBuf] {
    &self.failed
  }

  /// Files whose header is present and valid.
  pub fn ok(&self) -> &[PathBuf] {
    &self.ok
  }

  /// Whether every checked file classified `Ok`.
  pub fn is_clean(&self) -> bool {
    self.missing.is_empty() && self.malformed.is_empty() && self.failed.is_empty()
  }

  /// Total number of files checked.
  pub fn total(&self) -> usize {
    self.ok.len() + self.missing.len() + self.malformed.len() + self.failed.len()
  }
}

/// Outcome of checking a single line against the strict line-1 pattern.
enum StartLineCheck {
  /// Strict match with a valid year (range)
  Valid,
  /// Strict match with a bad year range, or a keyword-heuristic hit
  WrongFormat,
  /// Neither a match nor a recognizable attempt
  NotPresent,
}

/// Validator for the mandated two-line copyright block.
///
/// Classification is a pure, single forward pass over the line stream; the
/// validator holds no per-file state and can be reused across files.
#[derive(Debug, Clone)]
pub struct HeaderValidator {
  current_year: i32,
}

impl HeaderValidator {
  /// Creates a validator anchored to the current calendar year.
  pub fn new() -> Self {
    Self::with_current_year(chrono::Local::now().year())
  }

  /// Creates a validator anchored to an explicit year (deterministic tests).
  pub const fn with_current_year(current_year: i32) -> Self {
    Self { current_year }
  }

  /// Opens and classifies the file at `path`.
  ///
  /// An `Err` means the file could not be read; the caller records it as
  /// [`Classification::Failed`].
  pub fn classify_file(&self, path: &Path) -> io::Result<Classification> {
    let file = File::open(path)?;
    self.classify(BufReader::new(file))
  }

  /// Classifies a line stream.
  ///
  /// Lines are read as raw bytes and decoded lossily, so non-UTF-8 content is
  /// classified rather than rejected; only genuine I/O errors surface as
  /// `Err`.
  pub fn classify<R: BufRead>(&self, mut reader: R) -> io::Result<Classification> {
    let mut buf = Vec::new();
    loop {
      buf.clear();
      if reader.read_until(b'\n', &mut buf)? == 0 {
        // End of file without a match or a heuristic trigger
        return Ok(Classification::Missing);
      }
      let line = String::from_utf8_lossy(&buf);

      match self.check_start_line(&line) {
        StartLineCheck::NotPresent => {
          // The header need not be the very first line (comment wrappers);
          // keep scanning.
        }
        StartLineCheck::WrongFormat => return Ok(Classification::Malformed),
        StartLineCheck::Valid => {
          buf.clear();
          if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(Classification::Malformed);
          }
          let next = String::from_utf8_lossy(&buf);
          return Ok(if SECOND_LINE_PATTERN.is_match(&next) {
            Classification::Ok
          } else {
            Classification::Malformed
          });
        }
      }
    }
  }

  /// Checks one line against the strict line-1 pattern, falling back to the
  /// keyword heuristic when the strict match fails.
  fn check_start_line(&self, line: &str) -> StartLineCheck {
    if let Some(caps) = FIRST_LINE_PATTERN.captures(line) {
      // Groups 1 and 2 are only populated for the year-range form; a single
      // year is always valid.
      if let (Some(from), Some(to)) = (caps.get(1), caps.get(2)) {
        match (from.as_str().parse::<i32>(), to.as_str().parse::<i32>()) {
          (Ok(from_year), Ok(to_year)) => {
            if from_year >= to_year || to_year > self.current_year {
              return StartLineCheck::WrongFormat;
            }
          }
          _ => return StartLineCheck::WrongFormat,
        }
      }
      return StartLineCheck::Valid;
    }

    // Heuristic fallback: strip all whitespace, lowercase, and count how many
    // organization-name fragments appear as substrings.
    let squashed = line.split_whitespace().collect::<String>().to_lowercase();
    let hits = START_LINE_KEYWORDS
      .iter()
      .filter(|keyword| squashed.contains(*keyword))
      .count();
    if hits >= KEYWORD_MATCH_THRESHOLD {
      StartLineCheck::WrongFormat
    } else {
      StartLineCheck::NotPresent
    }
  }
}

impl Default for HeaderValidator {
  fn default() -> Self {
    Self::new()
  }
}

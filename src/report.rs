//! # Report Module
//!
//! This module persists scan results as flat report files, one per non-empty
//! error bucket, with deterministic names derived from the classification.
//! Stale report files from a previous run are deleted before new ones are
//! written, so the set of files present always reflects the latest scan.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;

use crate::logging::Logger;
use crate::validator::{Classification, ScanResult};

/// Prefix shared by all result report file names.
pub const RESULT_FILE_NAME_PREFIX: &str = "crcheck_result_";

/// The classifications that produce a report file. `Ok` never does.
const REPORTED_CLASSIFICATIONS: [Classification; 3] =
  [Classification::Missing, Classification::Malformed, Classification::Failed];

/// Writer for flat per-classification result reports.
pub struct ReportWriter {
  output_dir: PathBuf,
}

impl ReportWriter {
  /// Creates a writer that places report files in `output_dir`.
  pub fn new(output_dir: impl Into<PathBuf>) -> Self {
    Self {
      output_dir: output_dir.into(),
    }
  }

  /// The deterministic report file path for a classification, or `None` for
  /// `Ok` which is never reported.
  pub fn report_path(&self, classification: Classification) -> Option<PathBuf> {
    if classification == Classification::Ok {
      return None;
    }
    Some(
      self
        .output_dir
        .join(format!("{RESULT_FILE_NAME_PREFIX}{}.txt", classification.slug())),
    )
  }

  /// Deletes stale reports and writes one report file per non-empty error
  /// bucket. A clean result writes nothing and notifies via the logger.
  pub fn write(&self, result: &ScanResult, path_checked: &Path, logger: &Logger) -> Result<()> {
    self.delete_stale_reports()?;

    if result.is_clean() {
      logger.info(format!("File/Path checked: {}", path_checked.display()));
      logger.info("No error found.");
      return Ok(());
    }

    let completed_time = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    for classification in REPORTED_CLASSIFICATIONS {
      let paths = result.paths(classification);
      if paths.is_empty() {
        continue;
      }
      self.write_report(classification, paths, path_checked, &completed_time)?;
    }

    Ok(())
  }

  fn delete_stale_reports(&self) -> Result<()> {
    for classification in REPORTED_CLASSIFICATIONS {
      let Some(path) = self.report_path(classification) else {
        continue;
      };
      if path.exists() {
        fs::remove_file(&path).with_context(|| format!("Failed to delete stale report {}", path.display()))?;
      }
    }
    Ok(())
  }

  fn write_report(
    &self,
    classification: Classification,
    paths: &[PathBuf],
    path_checked: &Path,
    completed_time: &str,
  ) -> Result<()> {
    // report_path is Some for every reported classification
    let Some(report_path) = self.report_path(classification) else {
      return Ok(());
    };

    let mut content = String::new();
    content.push_str(&format!("File/Path checked: {}\n", path_checked.display()));
    content.push_str(&format!("Check completed at {completed_time}.\n\n"));
    content.push_str(&format!(
      "*************************** Error : {} ***************************\n",
      classification.describe()
    ));
    for path in paths {
      content.push_str(&format!("{}\n", path.display()));
    }

    fs::write(&report_path, content)
      .with_context(|| format!("Failed to write report to {}", report_path.display()))
  }
}

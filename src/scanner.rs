//! # Scanner Module
//!
//! This module walks a file tree, runs every candidate file through the
//! header validator and accumulates the classified path lists. Traversal is
//! sequential and resilient: unreadable entries or unresolvable directories
//! are logged and skipped, never fatal to the scan.

use std::path::Path;

use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::file_filter::{FileFilter, is_hidden_name};
use crate::logging::Logger;
use crate::validator::{Classification, HeaderValidator, ScanResult};

/// Tree scanner feeding candidate files to the [`HeaderValidator`].
pub struct Scanner<'a> {
  validator: HeaderValidator,
  filter: &'a dyn FileFilter,
  logger: &'a Logger,
}

impl<'a> Scanner<'a> {
  /// Creates a scanner over the given validator, candidate filter and logger.
  pub const fn new(validator: HeaderValidator, filter: &'a dyn FileFilter, logger: &'a Logger) -> Self {
    Self {
      validator,
      filter,
      logger,
    }
  }

  /// Scans `root` (a file or a directory) and returns the classified buckets.
  ///
  /// Hidden entries are skipped at any depth. With `recursive` off, only the
  /// directory's immediate children are considered. A root that cannot be
  /// canonicalized is reported and yields an empty result.
  pub fn scan(&self, root: &Path, recursive: bool) -> ScanResult {
    let mut result = ScanResult::default();

    let root = match root.canonicalize() {
      Ok(path) => path,
      Err(e) => {
        self
          .logger
          .exception(format!("File or path {} cannot be resolved: {e}", root.display()));
        return result;
      }
    };

    if root.is_file() {
      // A single explicit file bypasses the candidate filter
      self.check_file(&root, &mut result);
      return result;
    }

    self.logger.log(format!("Begin to check directory: {} ......", root.display()));
    let start_time = std::time::Instant::now();

    let mut walker = WalkDir::new(&root).sort_by_file_name();
    if !recursive {
      walker = walker.max_depth(1);
    }

    // The root itself is exempt from hidden-name filtering so that scanning
    // from inside a hidden directory still works
    let entries = walker.into_iter().filter_entry(|entry| {
      entry.depth() == 0 || entry.file_name().to_str().is_none_or(|name| !is_hidden_name(name))
    });

    for entry in entries {
      let entry = match entry {
        Ok(entry) => entry,
        Err(e) => {
          self.logger.exception(format!("Cannot traverse entry: {e}"));
          continue;
        }
      };

      if !entry.file_type().is_file() {
        continue;
      }

      let path = entry.path();
      let filter_result = self.filter.should_check(path);
      if !filter_result.should_check {
        trace!(
          "Skipping: {} ({})",
          path.display(),
          filter_result.reason.as_deref().unwrap_or("not a candidate")
        );
        continue;
      }

      self.check_file(path, &mut result);
    }

    debug!(
      "Checked {} files in {}ms",
      result.total(),
      start_time.elapsed().as_millis()
    );
    self.logger.log(format!("End checking directory: {}", root.display()));

    result
  }

  /// Classifies one file and records it; read failures land in the failed
  /// bucket and are excluded from both missing and malformed.
  fn check_file(&self, path: &Path, result: &mut ScanResult) {
    self.logger.log(format!("Checking file: {} ......", path.display()));
    match self.validator.classify_file(path) {
      Ok(classification) => result.record(classification, path.to_path_buf()),
      Err(e) => {
        self
          .logger
          .exception(format!("Cannot read file {}: {e}", path.display()));
        result.record(Classification::Failed, path.to_path_buf());
      }
    }
  }
}

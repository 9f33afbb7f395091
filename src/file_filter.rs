//! # File Filter Module
//!
//! This module contains the candidate-filter collaborator: given a file path,
//! it decides whether the file should be checked at all. Candidacy is a fixed
//! extension match plus a small allow-list of specially named files that must
//! be checked regardless of extension. Hidden entries are never candidates.

use std::path::Path;

/// Result of a candidacy check.
pub struct FilterResult {
  /// Whether the file should be checked
  pub should_check: bool,
  /// Reason why the file is skipped (if it is)
  pub reason: Option<String>,
}

impl FilterResult {
  /// A result indicating the file should be checked.
  pub const fn check() -> Self {
    Self {
      should_check: true,
      reason: None,
    }
  }

  /// A result indicating the file should be skipped.
  pub fn skip(reason: impl Into<String>) -> Self {
    Self {
      should_check: false,
      reason: Some(reason.into()),
    }
  }
}

/// Trait for components that decide which files are checked.
pub trait FileFilter {
  /// Determines whether the file at `path` is a candidate for checking.
  fn should_check(&self, path: &Path) -> FilterResult;
}

/// Specially named files that are always candidates, whatever the configured
/// extensions are.
pub const SPECIAL_FILE_NAMES: [&str; 2] = ["apm-wldf-INTERNAL-RELEASE.properties", "apm-wldf-FUTURE.properties"];

/// Candidate filter matching by extension plus the fixed allow-list.
pub struct CandidateFilter {
  extensions: Vec<String>,
  special_names: Vec<String>,
}

impl CandidateFilter {
  /// Creates a filter for the given extensions (without the leading dot,
  /// case-insensitive) and specially named files.
  pub fn new(extensions: Vec<String>, special_names: Vec<String>) -> Self {
    Self {
      extensions: extensions.into_iter().map(|e| e.to_lowercase()).collect(),
      special_names: special_names.into_iter().map(|n| n.to_lowercase()).collect(),
    }
  }

  /// The default filter: `.java` files plus the fixed allow-list.
  pub fn java_defaults() -> Self {
    Self::new(
      vec!["java".to_string()],
      SPECIAL_FILE_NAMES.iter().map(|n| (*n).to_string()).collect(),
    )
  }
}

impl FileFilter for CandidateFilter {
  fn should_check(&self, path: &Path) -> FilterResult {
    let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
      return FilterResult::skip("Unrepresentable file name");
    };

    if is_hidden_name(file_name) {
      return FilterResult::skip("Hidden entry");
    }

    let lowered = file_name.to_lowercase();
    if self.special_names.iter().any(|name| *name == lowered) {
      return FilterResult::check();
    }

    let extension = path.extension().and_then(|e| e.to_str()).map(str::to_lowercase);
    match extension {
      Some(ext) if self.extensions.contains(&ext) => FilterResult::check(),
      _ => FilterResult::skip("Extension not under check"),
    }
  }
}

/// Whether a file or directory name counts as hidden.
pub fn is_hidden_name(name: &str) -> bool {
  name.starts_with('.')
}

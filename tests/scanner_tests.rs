//! # Scanner tests
//!
//! End-to-end scanning over real directory trees: bucket accumulation,
//! candidate filtering, hidden-entry skipping, recursion control and
//! resilience to unreadable entries.

mod common;

use std::path::{Path, PathBuf};

use anyhow::Result;
use crcheck::file_filter::CandidateFilter;
use crcheck::logging::{LogLevel, Logger};
use crcheck::report::ReportWriter;
use crcheck::scanner::Scanner;
use crcheck::validator::{Classification, HeaderValidator};
use tempfile::tempdir;

fn silent_logger() -> Logger {
  Logger::console_only(LogLevel::Silent)
}

fn scan(root: &Path, recursive: bool) -> crcheck::validator::ScanResult {
  let logger = silent_logger();
  let filter = CandidateFilter::java_defaults();
  let scanner = Scanner::new(HeaderValidator::with_current_year(2025), &filter, &logger);
  scanner.scan(root, recursive)
}

#[test]
fn test_tree_scan_buckets_files() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();

  common::write_file(root, "Good.java", &common::valid_java("class Good {}"))?;
  common::write_file(root, "Bad.java", &common::malformed_java("class Bad {}"))?;
  common::write_file(root, "nested/deep/None.java", &common::missing_java("class None {}"))?;
  // Not a candidate under the default filter
  common::write_file(root, "notes.txt", "no header anywhere")?;

  let result = scan(root, true);

  assert_eq!(result.total(), 3);
  assert_eq!(result.ok().len(), 1);
  assert_eq!(result.malformed().len(), 1);
  assert_eq!(result.missing().len(), 1);
  assert!(result.missing()[0].ends_with("nested/deep/None.java"));
  Ok(())
}

#[test]
fn test_hidden_entries_are_skipped() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();

  common::write_file(root, "Visible.java", &common::missing_java("class V {}"))?;
  common::write_file(root, ".Hidden.java", &common::missing_java("class H {}"))?;
  common::write_file(root, ".git/Config.java", &common::missing_java("class C {}"))?;

  let result = scan(root, true);

  assert_eq!(result.total(), 1);
  assert!(result.missing()[0].ends_with("Visible.java"));
  Ok(())
}

#[test]
fn test_non_recursive_scan_stops_at_depth_one() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();

  common::write_file(root, "Top.java", &common::missing_java("class T {}"))?;
  common::write_file(root, "sub/Below.java", &common::missing_java("class B {}"))?;

  let result = scan(root, false);

  assert_eq!(result.total(), 1);
  assert!(result.missing()[0].ends_with("Top.java"));
  Ok(())
}

#[test]
fn test_special_file_names_are_checked_without_java_extension() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();

  common::write_file(root, "apm-wldf-INTERNAL-RELEASE.properties", "key=value\n")?;
  common::write_file(root, "ordinary.properties", "key=value\n")?;

  let result = scan(root, true);

  // Only the specially named file is a candidate; it has no header
  assert_eq!(result.total(), 1);
  assert!(result.missing()[0].ends_with("apm-wldf-INTERNAL-RELEASE.properties"));
  Ok(())
}

#[test]
fn test_single_file_root_bypasses_the_filter() -> Result<()> {
  let temp_dir = tempdir()?;
  let path = common::write_file(temp_dir.path(), "standalone.txt", "no header\n")?;

  let result = scan(&path, true);

  assert_eq!(result.total(), 1);
  assert_eq!(result.missing().len(), 1);
  Ok(())
}

#[test]
fn test_unresolvable_root_yields_empty_result() {
  let result = scan(Path::new("/definitely/not/a/real/path"), true);
  assert_eq!(result.total(), 0);
  assert!(result.is_clean());
}

#[test]
fn test_discovery_order_is_stable() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();

  common::write_file(root, "Zeta.java", &common::missing_java("class Z {}"))?;
  common::write_file(root, "Alpha.java", &common::missing_java("class A {}"))?;
  common::write_file(root, "Mid.java", &common::missing_java("class M {}"))?;

  let result = scan(root, true);

  let names: Vec<_> = result
    .missing()
    .iter()
    .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
    .collect();
  assert_eq!(names, ["Alpha.java", "Mid.java", "Zeta.java"]);
  Ok(())
}

#[test]
fn test_unreadable_file_classifies_as_failed() {
  // Opening a directory succeeds on Linux but reading it fails, which is the
  // validator's I/O failure path
  let temp_dir = tempdir().unwrap();
  let validator = HeaderValidator::with_current_year(2025);
  assert!(validator.classify_file(temp_dir.path()).is_err());
}

#[test]
fn test_scan_then_report_round_trip() -> Result<()> {
  let temp_dir = tempdir()?;
  let src = temp_dir.path().join("src");
  let out = temp_dir.path().join("out");
  std::fs::create_dir_all(&out)?;

  common::write_file(&src, "Good.java", &common::valid_java("class Good {}"))?;
  common::write_file(&src, "None.java", &common::missing_java("class None {}"))?;

  let result = scan(&src, true);
  let writer = ReportWriter::new(&out);
  writer.write(&result, &src, &silent_logger())?;

  let missing_report = writer.report_path(Classification::Missing).unwrap();
  let content = std::fs::read_to_string(missing_report)?;
  assert!(content.contains("Error : Copyright does not present"));
  assert!(content.lines().any(|line| line.ends_with("None.java")));
  assert!(!content.contains("Good.java"));

  // The clean bucket produced no files
  assert_eq!(writer.report_path(Classification::Malformed).map(|p| p.exists()), Some(false));
  Ok(())
}

#[test]
fn test_paths_in_buckets_are_absolute() -> Result<()> {
  let temp_dir = tempdir()?;
  common::write_file(temp_dir.path(), "A.java", &common::missing_java("class A {}"))?;

  let result = scan(temp_dir.path(), true);
  assert!(result.missing().iter().all(|p: &PathBuf| p.is_absolute()));
  Ok(())
}

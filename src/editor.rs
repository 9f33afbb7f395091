//! # Header Editor Module
//!
//! This module contains the file-mutation side of the tool: inserting the
//! canonical header block at the start of files classified as missing.
//!
//! Files up to a size ceiling are rewritten through a sibling temp file that
//! is renamed over the original, so a failed edit leaves the original bytes
//! untouched. Files above the ceiling are rejected with an explicit error by
//! default; an opt-in in-place strategy shifts the content backward block by
//! block with bounded extra memory, at the cost of a corrupt intermediate
//! state if interrupted mid-shift.

use std::fs::{self, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::header::CanonicalHeader;
use crate::logging::Logger;

/// Ceiling for the buffered whole-file rewrite. 32 MiB.
pub const MAX_BUFFERED_FILE_SIZE: u64 = 32 * 1024 * 1024;

/// Block buffer size for the in-place shift strategy. 4 MiB.
pub const SHIFT_BLOCK_SIZE: usize = 4 * 1024 * 1024;

/// Error performing a header insertion on one file.
#[derive(Debug, thiserror::Error)]
pub enum EditError {
  /// The file exceeds the buffered rewrite ceiling and the in-place strategy
  /// is not enabled. Never silently truncated or partially edited.
  #[error("file too large: {path} is {len} bytes; the maximum allowable file size is {max} bytes")]
  FileTooLarge { path: PathBuf, len: u64, max: u64 },

  /// The file type has no canonical header template.
  #[error("no canonical header template for {path}")]
  UnsupportedFile { path: PathBuf },

  /// An I/O operation failed; the original file is left in its pre-edit
  /// state when the buffered strategy was in use.
  #[error("failed to {action} {path}: {source}")]
  Io {
    action: &'static str,
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

impl EditError {
  fn io(action: &'static str, path: &Path, source: io::Error) -> Self {
    Self::Io {
      action,
      path: path.to_path_buf(),
      source,
    }
  }
}

/// What to do with files above the buffered rewrite ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LargeFileStrategy {
  /// Reject with [`EditError::FileTooLarge`]
  #[default]
  Reject,
  /// Shift the content backward in place, block by block, from the tail
  /// toward the head. Bounded extra memory (one block buffer) but not atomic:
  /// an interruption mid-shift corrupts the file. Only for environments where
  /// duplicate storage for a temp copy is unavailable.
  ShiftInPlace,
}

/// What to do when one file in a batch fails to edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
  /// Log the failure and continue with the next file
  #[default]
  Continue,
  /// Stop the batch at the first failure (legacy behavior)
  Abort,
}

/// Editor that prepends the canonical header block to files.
///
/// Only files classified as missing are ever handed to this type; malformed
/// and failed files are reported but never mutated.
pub struct HeaderWriter<'a> {
  header: CanonicalHeader,
  logger: &'a Logger,
  max_buffered_size: u64,
  large_file_strategy: LargeFileStrategy,
  failure_policy: FailurePolicy,
  shift_block_size: usize,
}

impl<'a> HeaderWriter<'a> {
  /// Creates a writer with the default ceiling, reject-on-oversize strategy
  /// and continue-on-error batch policy.
  pub const fn new(header: CanonicalHeader, logger: &'a Logger) -> Self {
    Self {
      header,
      logger,
      max_buffered_size: MAX_BUFFERED_FILE_SIZE,
      large_file_strategy: LargeFileStrategy::Reject,
      failure_policy: FailurePolicy::Continue,
      shift_block_size: SHIFT_BLOCK_SIZE,
    }
  }

  /// Overrides the buffered rewrite ceiling.
  pub const fn with_max_buffered_size(mut self, max: u64) -> Self {
    self.max_buffered_size = max;
    self
  }

  /// Selects the strategy for files above the ceiling.
  pub const fn with_large_file_strategy(mut self, strategy: LargeFileStrategy) -> Self {
    self.large_file_strategy = strategy;
    self
  }

  /// Selects the batch failure policy.
  pub const fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
    self.failure_policy = policy;
    self
  }

  /// Overrides the block buffer size for the in-place shift strategy.
  pub const fn with_shift_block_size(mut self, block_size: usize) -> Self {
    self.shift_block_size = block_size;
    self
  }

  /// The header templates this writer inserts.
  pub const fn header(&self) -> &CanonicalHeader {
    &self.header
  }

  /// Inserts the canonical header block at the start of the file at `path`.
  ///
  /// The template is chosen by file extension. On any error the file keeps
  /// its original content, except for an interrupted in-place shift.
  pub fn insert_header(&self, path: &Path) -> Result<(), EditError> {
    let block = self.header.for_path(path).ok_or_else(|| EditError::UnsupportedFile {
      path: path.to_path_buf(),
    })?;

    self.logger.log(format!(
      "Begin to insert copyright block into file: {}",
      path.display()
    ));

    let metadata = fs::metadata(path).map_err(|e| EditError::io("stat", path, e))?;
    let file_len = metadata.len();

    if file_len <= self.max_buffered_size {
      self.insert_buffered(block.as_bytes(), path, metadata.permissions())?;
    } else {
      match self.large_file_strategy {
        LargeFileStrategy::Reject => {
          return Err(EditError::FileTooLarge {
            path: path.to_path_buf(),
            len: file_len,
            max: self.max_buffered_size,
          });
        }
        LargeFileStrategy::ShiftInPlace => self.insert_shifted(block.as_bytes(), path, file_len)?,
      }
    }

    self.logger.log(format!(
      "End inserting copyright block in file: {}",
      path.display()
    ));
    Ok(())
  }

  /// Buffered whole-file rewrite: header plus original bytes are written to a
  /// sibling temp file which then replaces the original atomically.
  fn insert_buffered(&self, block: &[u8], path: &Path, permissions: fs::Permissions) -> Result<(), EditError> {
    let content = fs::read(path).map_err(|e| EditError::io("read", path, e))?;

    let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    let mut temp = tempfile::Builder::new()
      .prefix(".crcheck-")
      .tempfile_in(dir)
      .map_err(|e| EditError::io("create temp file beside", path, e))?;

    temp
      .write_all(block)
      .and_then(|()| temp.write_all(&content))
      .and_then(|()| temp.flush())
      .map_err(|e| EditError::io("write temp file for", path, e))?;

    temp
      .persist(path)
      .map_err(|e| EditError::io("rename temp file over", path, e.error))?;

    // The rename installs the temp file's mode; restore the original's
    fs::set_permissions(path, permissions).map_err(|e| EditError::io("restore permissions on", path, e))?;

    debug!("Rewrote {} ({} bytes + {} byte header)", path.display(), content.len(), block.len());
    Ok(())
  }

  /// In-place insertion with bounded extra memory: the content is moved
  /// backward one block at a time, starting from the tail so no unread data
  /// is overwritten, and the header is written at offset 0 last.
  fn insert_shifted(&self, block: &[u8], path: &Path, file_len: u64) -> Result<(), EditError> {
    let head_len = block.len() as u64;
    let block_size = self.shift_block_size as u64;

    let mut file = OpenOptions::new()
      .read(true)
      .write(true)
      .open(path)
      .map_err(|e| EditError::io("open", path, e))?;

    file
      .set_len(file_len + head_len)
      .map_err(|e| EditError::io("extend", path, e))?;

    let mut buffer = vec![0u8; self.shift_block_size];
    let mut read_ptr = file_len;
    loop {
      let to_read = if read_ptr >= block_size {
        read_ptr -= block_size;
        self.shift_block_size
      } else {
        // The remaining head part is smaller than one block
        let n = read_ptr as usize;
        read_ptr = 0;
        n
      };

      if to_read > 0 {
        file
          .seek(SeekFrom::Start(read_ptr))
          .and_then(|_| file.read_exact(&mut buffer[..to_read]))
          .map_err(|e| EditError::io("read block from", path, e))?;
        file
          .seek(SeekFrom::Start(read_ptr + head_len))
          .and_then(|_| file.write_all(&buffer[..to_read]))
          .map_err(|e| EditError::io("write shifted block to", path, e))?;
      }

      if read_ptr == 0 {
        file
          .seek(SeekFrom::Start(0))
          .and_then(|_| file.write_all(block))
          .and_then(|_| file.flush())
          .map_err(|e| EditError::io("write header to", path, e))?;
        break;
      }
    }

    debug!("Shifted {} in place by {} bytes", path.display(), head_len);
    Ok(())
  }

  /// Edits every file in `missing_paths`, returning the number of failures.
  ///
  /// Files without a canonical template are skipped with a log entry. Under
  /// the default [`FailurePolicy::Continue`] a failed edit is logged and the
  /// batch moves on; [`FailurePolicy::Abort`] stops at the first failure.
  pub fn edit_all(&self, missing_paths: &[PathBuf]) -> usize {
    let mut failures = 0;
    for path in missing_paths {
      if self.header.for_path(path).is_none() {
        self.logger.log(format!(
          "No canonical header template for {}; skipped",
          path.display()
        ));
        continue;
      }

      if let Err(e) = self.insert_header(path) {
        failures += 1;
        self.logger.exception(format!("Exception in edition: {e}"));
        if self.failure_policy == FailurePolicy::Abort {
          break;
        }
      }
    }
    failures
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::logging::LogLevel;

  static LOGGER: Logger = Logger::console_only(LogLevel::Silent);

  fn writer(header: CanonicalHeader) -> HeaderWriter<'static> {
    HeaderWriter::new(header, &LOGGER)
  }

  #[test]
  fn test_insert_preserves_original_bytes() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("Sample.java");
    let original = "package com.example;\n\npublic class Sample {}\n";
    fs::write(&path, original).unwrap();

    let header = CanonicalHeader::with_year(2025);
    let block = header.java_block().to_string();
    writer(header).insert_header(&path).unwrap();

    let edited = fs::read_to_string(&path).unwrap();
    assert!(edited.starts_with(&block));
    assert_eq!(&edited[block.len()..], original);
  }

  #[test]
  fn test_insert_into_empty_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("Empty.java");
    fs::write(&path, "").unwrap();

    let header = CanonicalHeader::with_year(2025);
    let block = header.java_block().to_string();
    writer(header).insert_header(&path).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), block);
  }

  #[test]
  fn test_oversized_file_is_rejected() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("Big.java");
    fs::write(&path, vec![b'x'; 64]).unwrap();

    let header = CanonicalHeader::with_year(2025);
    let result = writer(header).with_max_buffered_size(16).insert_header(&path);

    assert!(matches!(result, Err(EditError::FileTooLarge { len: 64, max: 16, .. })));
    // Rejection must leave the file untouched
    assert_eq!(fs::read(&path).unwrap(), vec![b'x'; 64]);
  }

  #[test]
  fn test_unsupported_extension_is_an_error() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("notes.txt");
    fs::write(&path, "text\n").unwrap();

    let header = CanonicalHeader::with_year(2025);
    let result = writer(header).insert_header(&path);
    assert!(matches!(result, Err(EditError::UnsupportedFile { .. })));
  }

  #[test]
  fn test_shift_in_place_matches_buffered_result() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("Shifted.java");
    // Payload larger than the block size so multiple shift iterations run,
    // with a final partial block
    let original: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();
    fs::write(&path, &original).unwrap();

    let header = CanonicalHeader::with_year(2025);
    let block = header.java_block().as_bytes().to_vec();
    writer(header)
      .with_max_buffered_size(0)
      .with_large_file_strategy(LargeFileStrategy::ShiftInPlace)
      .with_shift_block_size(4096)
      .insert_header(&path)
      .unwrap();

    let edited = fs::read(&path).unwrap();
    assert_eq!(&edited[..block.len()], &block[..]);
    assert_eq!(&edited[block.len()..], &original[..]);
  }

  #[test]
  fn test_edit_all_continues_after_failure() {
    let temp_dir = tempfile::tempdir().unwrap();
    let good_before = temp_dir.path().join("A.java");
    let gone = temp_dir.path().join("Gone.java");
    let good_after = temp_dir.path().join("B.java");
    fs::write(&good_before, "class A {}\n").unwrap();
    fs::write(&good_after, "class B {}\n").unwrap();

    let header = CanonicalHeader::with_year(2025);
    let w = writer(header);
    let failures = w.edit_all(&[good_before.clone(), gone, good_after.clone()]);

    assert_eq!(failures, 1);
    assert!(fs::read_to_string(&good_before).unwrap().starts_with("/*"));
    assert!(fs::read_to_string(&good_after).unwrap().starts_with("/*"));
  }

  #[test]
  fn test_edit_all_abort_policy_stops_the_batch() {
    let temp_dir = tempfile::tempdir().unwrap();
    let gone = temp_dir.path().join("Gone.java");
    let untouched = temp_dir.path().join("C.java");
    fs::write(&untouched, "class C {}\n").unwrap();

    let header = CanonicalHeader::with_year(2025);
    let w = writer(header).with_failure_policy(FailurePolicy::Abort);
    let failures = w.edit_all(&[gone, untouched.clone()]);

    assert_eq!(failures, 1);
    assert_eq!(fs::read_to_string(&untouched).unwrap(), "class C {}\n");
  }

  #[test]
  fn test_edit_all_skips_files_without_a_template() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("readme.md");
    fs::write(&path, "# readme\n").unwrap();

    let header = CanonicalHeader::with_year(2025);
    let failures = writer(header).edit_all(std::slice::from_ref(&path));

    assert_eq!(failures, 0);
    assert_eq!(fs::read_to_string(&path).unwrap(), "# readme\n");
  }
}

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;

/// A canonical two-line header as it appears in a Java line comment.
pub const VALID_HEADER: &str =
  "// Copyright (c) 2016 Oracle Corporation, Redwood Shores, CA, USA\n// All rights reserved.\n";

/// A header attempt that fails the strict pattern but trips the keyword
/// heuristic (missing "(c)", "Corporation" misspelled).
pub const MALFORMED_HEADER: &str = "// Copyright 2016 Oracle Corp, Redwood Shores\n// All rights reserved.\n";

/// Java file content with a valid header.
pub fn valid_java(body: &str) -> String {
  format!("{VALID_HEADER}\n{body}")
}

/// Java file content with a malformed header.
pub fn malformed_java(body: &str) -> String {
  format!("{MALFORMED_HEADER}\n{body}")
}

/// Java file content with no header and nothing resembling one.
pub fn missing_java(body: &str) -> String {
  format!("package com.example;\n\n{body}")
}

/// Writes `content` to `dir/name` and returns the full path.
pub fn write_file(dir: &Path, name: &str, content: &str) -> Result<PathBuf> {
  let path = dir.join(name);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent)?;
  }
  fs::write(&path, content)?;
  Ok(path)
}

//! # crcheck
//!
//! A tool that audits a source tree for the mandated copyright header block
//! at the top of each source file, classifies deviations (missing vs.
//! malformed vs. unreadable), writes flat result reports per error category
//! and can insert the canonical year-stamped header into files where it is
//! absent.
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use crcheck::file_filter::CandidateFilter;
//! use crcheck::logging::{LogLevel, Logger};
//! use crcheck::scanner::Scanner;
//! use crcheck::validator::HeaderValidator;
//!
//! let logger = Logger::console_only(LogLevel::Info);
//! let filter = CandidateFilter::java_defaults();
//! let scanner = Scanner::new(HeaderValidator::new(), &filter, &logger);
//!
//! let result = scanner.scan(Path::new("src"), true);
//! for path in result.missing() {
//!   println!("missing header: {}", path.display());
//! }
//! ```
//!
//! ## Modules
//!
//! * [`validator`] - Header classification engine (the core)
//! * [`editor`] - Header insertion with atomic rewrite and batch editing
//! * [`scanner`] - Resilient tree walking and result accumulation
//! * [`header`] - The canonical year-stamped header templates
//! * [`report`] - Flat per-classification result reports
//! * [`file_filter`] - Candidate selection by extension and allow-list
//! * [`logging`] - Injected four-level logger and exception log file

pub mod cli;
pub mod editor;
pub mod file_filter;
pub mod header;
pub mod logging;
pub mod report;
pub mod scanner;
pub mod validator;

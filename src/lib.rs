//! Statement Tools Library
//!
//! A cross-platform library for organizing monthly bank-statement PDFs.
//! This library provides functionality to:
//! - Extract statement dates from the `"Chase <Month> <Day>.pdf"` convention
//! - Rename statements with chronological 2-digit ordinal prefixes
//! - Merge prefixed statements into a single document, in ordinal order
//! - Extract tabular data from a statement into an xlsx workbook
//!
//! # Example
//!
//! ```no_run
//! use statement_tools::pdf::{build_manifest, merge_statements, MergeOptions};
//! use std::path::Path;
//!
//! let manifest = build_manifest(Path::new(".")).expect("no statements found");
//! let report = merge_statements(&manifest, &MergeOptions::default())
//!     .expect("failed to merge");
//! println!("{} pages merged", report.output_pages);
//! ```

pub mod date;
pub mod error;
pub mod pdf;
pub mod rename;
pub mod statement;

// Re-export commonly used items
pub use error::{Error, Result};

//! Error types for the statement tools library

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the statement tools library
#[derive(Error, Debug)]
pub enum Error {
    /// PDF processing error
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Spreadsheet output error
    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// File not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Invalid glob pattern
    #[error("Invalid glob pattern: {0}")]
    InvalidGlob(String),

    /// No files matched pattern
    #[error("No statement PDFs found matching pattern: {0}")]
    NoFilesMatched(String),

    /// Invalid PDF (no pages)
    #[error("PDF has no pages: {}", .0.display())]
    EmptyPdf(PathBuf),

    /// A rename destination already exists on disk
    #[error("Rename destination already exists: {}", .0.display())]
    DestinationExists(PathBuf),

    /// Two files in one rename plan map to the same destination
    #[error("Duplicate rename destination: {}", .0.display())]
    DuplicateDestination(PathBuf),

    /// Every candidate file failed during merge
    #[error("No files were successfully processed, cannot create merged PDF")]
    NothingMerged,

    /// General error
    #[error("{0}")]
    General(String),
}

//! Error types for the pdf-titles library

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the pdf-titles library
#[derive(Error, Debug)]
pub enum Error {
    /// PDF processing error
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Manifest could not be parsed
    #[error("Invalid manifest: {0}")]
    Json(#[from] serde_json::Error),

    /// File not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Invalid PDF (no pages)
    #[error("PDF has no pages: {}", .0.display())]
    EmptyPdf(PathBuf),

    /// The document structure is missing something we need (catalog, page tree)
    #[error("Malformed PDF: {0}")]
    MalformedPdf(String),

    /// Patch requested for an entry without a title
    #[error("No title configured for {}", .0.display())]
    MissingTitle(PathBuf),

    /// A `PATH=TITLE` argument that could not be split
    #[error("Invalid entry '{0}': expected PATH=TITLE")]
    InvalidEntry(String),

    /// Invalid glob pattern
    #[error("Invalid glob pattern: {0}")]
    InvalidGlob(String),

    /// No files matched pattern
    #[error("No PDF files found matching pattern: {0}")]
    NoFilesMatched(String),

    /// The written file did not read back with the pages we wrote
    #[error("Written PDF has {written} pages, expected {expected}")]
    PageCountMismatch { expected: usize, written: usize },
}

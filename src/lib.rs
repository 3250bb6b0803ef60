//! PDF Titles Library
//!
//! Inspect and rewrite the title metadata of a batch of PDF files.
//! This library provides functionality to:
//! - Load a PDF and read its Title/Author/Subject metadata
//! - Render a short metadata report
//! - Rewrite the Title and turn on the `DisplayDocTitle` viewer preference
//! - Replace the file on disk atomically
//! - Drive a batch of files, isolating per-file failures
//!
//! # Example
//!
//! ```no_run
//! use pdf_titles::batch::{run_patch, BatchEntry};
//!
//! let entries = vec![BatchEntry::with_title("public/pdf/flyer.pdf", "Flyer for educators")];
//! let summary = run_patch(&entries, &mut std::io::stdout().lock())?;
//! assert!(summary.all_succeeded());
//! # Ok::<(), std::io::Error>(())
//! ```

pub mod batch;
pub mod error;
pub mod manifest;
pub mod pdf;

// Re-export commonly used items
pub use error::{Error, Result};

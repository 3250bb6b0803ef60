//! Batch driver: run the reporter or patcher over a list of files
//!
//! Every entry is processed on its own. A failure is printed and counted,
//! and the batch moves on to the next entry.

use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use log::warn;
use serde::Deserialize;
use crate::error::Error;
use crate::pdf::{patch_document, report, MetadataPatch, PdfDocument};

/// One file to process, with the title to give it in patch mode
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BatchEntry {
    /// PDF file path
    pub path: PathBuf,
    /// New title (patch mode only)
    #[serde(default)]
    pub title: Option<String>,
}

impl BatchEntry {
    /// An entry for report mode
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), title: None }
    }

    /// An entry for patch mode
    pub fn with_title(path: impl Into<PathBuf>, title: impl Into<String>) -> Self {
        Self { path: path.into(), title: Some(title.into()) }
    }
}

/// Where an entry failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Opening and parsing the file
    Load,
    /// Copying pages, setting metadata or writing the file
    Patch,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Load => write!(f, "load"),
            Stage::Patch => write!(f, "patch"),
        }
    }
}

/// A failed entry
#[derive(Debug)]
pub struct Failure {
    /// Path of the entry that failed
    pub path: PathBuf,
    /// Step the entry was at when it failed
    pub stage: Stage,
    /// Why it failed
    pub error: Error,
}

/// Outcome tally of a batch run
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// Entries that went through
    pub succeeded: usize,
    /// Entries that failed, in list order
    pub failures: Vec<Failure>,
}

impl BatchSummary {
    /// Total number of entries processed
    pub fn total(&self) -> usize {
        self.succeeded + self.failures.len()
    }

    /// True when no entry failed
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }

    fn fail(&mut self, path: &Path, stage: Stage, error: Error) {
        warn!("{} failed at {} stage: {}", path.display(), stage, error);
        self.failures.push(Failure { path: path.to_path_buf(), stage, error });
    }
}

/// Print the Title/Author/Subject of every entry
///
/// Output per entry is a blank line, `<path>:` and the three indented
/// report lines, or `Error reading <path>: <reason>`.
pub fn run_report<W: Write>(entries: &[BatchEntry], out: &mut W) -> io::Result<BatchSummary> {
    let mut summary = BatchSummary::default();

    for entry in entries {
        match PdfDocument::open(&entry.path) {
            Ok(pdf) => {
                writeln!(out, "\n{}:", entry.path.display())?;
                write!(out, "{}", report(&pdf))?;
                summary.succeeded += 1;
            }
            Err(e) => {
                writeln!(out, "Error reading {}: {}", entry.path.display(), e)?;
                summary.fail(&entry.path, Stage::Load, e);
            }
        }
    }

    if !summary.all_succeeded() {
        writeln!(out, "\n{} of {} PDF files could not be read.", summary.failures.len(), summary.total())?;
    }

    Ok(summary)
}

/// Set the title and `DisplayDocTitle` on every entry, replacing each file
///
/// Prints `Updated <path> with title '<title>' and DisplayDocTitle=True` or
/// `Error updating <path>: <reason>` per entry, then a summary line.
pub fn run_patch<W: Write>(entries: &[BatchEntry], out: &mut W) -> io::Result<BatchSummary> {
    let mut summary = BatchSummary::default();

    for entry in entries {
        let Some(title) = entry.title.as_deref() else {
            let error = Error::MissingTitle(entry.path.clone());
            writeln!(out, "Error updating {}: {}", entry.path.display(), error)?;
            summary.fail(&entry.path, Stage::Patch, error);
            continue;
        };

        let pdf = match PdfDocument::open(&entry.path) {
            Ok(pdf) => pdf,
            Err(e) => {
                writeln!(out, "Error updating {}: {}", entry.path.display(), e)?;
                summary.fail(&entry.path, Stage::Load, e);
                continue;
            }
        };

        match patch_document(&pdf, &MetadataPatch::new(title)) {
            Ok(()) => {
                writeln!(
                    out,
                    "Updated {} with title '{}' and DisplayDocTitle=True",
                    entry.path.display(),
                    title
                )?;
                summary.succeeded += 1;
            }
            Err(e) => {
                writeln!(out, "Error updating {}: {}", entry.path.display(), e)?;
                summary.fail(&entry.path, Stage::Patch, e);
            }
        }
    }

    if summary.all_succeeded() {
        writeln!(out, "\nAll PDF display settings have been updated!")?;
    } else {
        writeln!(
            out,
            "\n{} of {} PDF files updated; {} failed.",
            summary.succeeded,
            summary.total(),
            summary.failures.len()
        )?;
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::fixtures::write_sample;
    use tempfile::TempDir;

    fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_report_prints_fields_and_fallbacks() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("flyer.pdf");
        write_sample(&path, 1, &[("Title", "Flyer"), ("Author", "Vivian")]);

        let mut buf = Vec::new();
        let summary = run_report(&[BatchEntry::new(&path)], &mut buf).unwrap();

        assert!(summary.all_succeeded());
        let expected = format!(
            "\n{}:\n  Title: Flyer\n  Author: Vivian\n  Subject: No subject\n",
            path.display()
        );
        assert_eq!(output(buf), expected);
    }

    #[test]
    fn test_report_continues_after_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let good = temp_dir.path().join("good.pdf");
        let missing = temp_dir.path().join("missing.pdf");
        write_sample(&good, 1, &[]);

        let entries = vec![BatchEntry::new(&missing), BatchEntry::new(&good)];
        let mut buf = Vec::new();
        let summary = run_report(&entries, &mut buf).unwrap();

        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].stage, Stage::Load);

        let text = output(buf);
        assert!(text.starts_with(&format!("Error reading {}: ", missing.display())));
        assert!(text.contains(&format!("{}:\n  Title: No title", good.display())));
        assert!(text.ends_with("1 of 2 PDF files could not be read.\n"));
    }

    #[test]
    fn test_patch_entry_without_title_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("untitled.pdf");
        write_sample(&path, 1, &[]);
        let before = std::fs::read(&path).unwrap();

        let mut buf = Vec::new();
        let summary = run_patch(&[BatchEntry::new(&path)], &mut buf).unwrap();

        assert!(!summary.all_succeeded());
        assert!(matches!(summary.failures[0].error, Error::MissingTitle(_)));
        assert_eq!(std::fs::read(&path).unwrap(), before);
        assert!(output(buf).contains("0 of 1 PDF files updated; 1 failed."));
    }

    #[test]
    fn test_patch_garbage_file_fails_at_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.pdf");
        std::fs::write(&path, b"%PDF-1.4 not really").unwrap();

        let mut buf = Vec::new();
        let summary = run_patch(&[BatchEntry::with_title(&path, "Broken")], &mut buf).unwrap();

        assert_eq!(summary.failures[0].stage, Stage::Load);
        assert!(output(buf).starts_with(&format!("Error updating {}: ", path.display())));
    }

    #[test]
    fn test_patch_success_summary() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("flyer.pdf");
        write_sample(&path, 2, &[]);

        let mut buf = Vec::new();
        let summary = run_patch(&[BatchEntry::with_title(&path, "先生向けご案内チラシ")], &mut buf).unwrap();

        assert_eq!(summary.succeeded, 1);
        let expected = format!(
            "Updated {} with title '先生向けご案内チラシ' and DisplayDocTitle=True\n\nAll PDF display settings have been updated!\n",
            path.display()
        );
        assert_eq!(output(buf), expected);
    }
}

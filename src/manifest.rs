//! Batch configuration: JSON manifests, `PATH=TITLE` pairs and glob patterns

use std::fs;
use std::path::{Path, PathBuf};
use glob::glob;
use log::{debug, warn};
use serde::Deserialize;
use crate::batch::BatchEntry;
use crate::error::{Error, Result};

/// Manifest used when no files are named on the command line
pub const DEFAULT_MANIFEST: &str = "pdf-titles.json";

#[derive(Deserialize)]
#[serde(untagged)]
enum Manifest {
    Table { entries: Vec<BatchEntry> },
    List(Vec<BatchEntry>),
}

/// Parse a manifest from JSON text
///
/// Accepts either `{ "entries": [...] }` or a bare array of entries, where
/// each entry is `{ "path": "...", "title": "..." }` and `title` is optional.
pub fn parse_manifest(text: &str) -> Result<Vec<BatchEntry>> {
    let entries = match serde_json::from_str(text)? {
        Manifest::Table { entries } => entries,
        Manifest::List(entries) => entries,
    };
    Ok(entries)
}

/// Load a manifest file
///
/// Relative entry paths are kept as written and resolve against the working directory.
pub fn load_manifest(path: &Path) -> Result<Vec<BatchEntry>> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let entries = parse_manifest(&fs::read_to_string(path)?)?;
    debug!("loaded {} entries from {}", entries.len(), path.display());
    Ok(entries)
}

/// Parse a `PATH=TITLE` argument, splitting on the first `=`
pub fn parse_entry(arg: &str) -> Result<BatchEntry> {
    match arg.split_once('=') {
        Some((path, title)) if !path.is_empty() && !title.is_empty() => {
            Ok(BatchEntry::with_title(path, title))
        }
        _ => Err(Error::InvalidEntry(arg.to_string())),
    }
}

/// Expand glob patterns in input paths
///
/// Literal paths pass through untouched. Matches of one pattern are sorted;
/// the order of the patterns themselves is kept.
pub fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for pattern in patterns {
        if !pattern.contains(|c: char| matches!(c, '*' | '?' | '[')) {
            paths.push(PathBuf::from(pattern));
            continue;
        }

        let entries = glob(pattern).map_err(|e| Error::InvalidGlob(format!("{}: {}", pattern, e)))?;
        let mut matched: Vec<PathBuf> = Vec::new();
        for entry in entries {
            match entry {
                Ok(path) => matched.push(path),
                Err(e) => warn!("glob error for {}: {}", pattern, e),
            }
        }
        if matched.is_empty() {
            return Err(Error::NoFilesMatched(pattern.clone()));
        }

        matched.sort();
        paths.extend(matched);
    }

    Ok(paths)
}

//! Atomic in-place replacement of a PDF file

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;
use lopdf::Document;
use log::debug;
use tempfile::NamedTempFile;
use crate::error::{Error, Result};
use crate::pdf::document::PdfDocument;

/// Write `doc` over `path` without ever leaving a half-written file behind
///
/// The document is written to a temporary file next to `path`, synced,
/// loaded back to check it parses with the expected number of pages, and
/// only then renamed over the original. On any error the temporary file is
/// removed and `path` keeps its previous contents.
pub fn save_in_place(doc: &mut Document, path: &Path) -> Result<()> {
    let expected_pages = doc.get_pages().len();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        doc.save_to(&mut writer)?;
        writer.flush()?;
    }
    temp.as_file().sync_all()?;
    debug!("wrote {} to {}", path.display(), temp.path().display());

    let written = PdfDocument::from_document(temp.path(), Document::load(temp.path())?)?;
    if written.page_count() != expected_pages {
        return Err(Error::PageCountMismatch {
            expected: expected_pages,
            written: written.page_count(),
        });
    }

    // NamedTempFile is created 0600; keep whatever mode the original had
    if let Ok(original) = fs::metadata(path) {
        fs::set_permissions(temp.path(), original.permissions())?;
    }

    temp.persist(path).map_err(|e| Error::Io(e.error))?;
    Ok(())
}

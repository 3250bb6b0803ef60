//! Loading a PDF into a read-only handle

use std::path::{Path, PathBuf};
use lopdf::{Document, Object, ObjectId};
use log::{debug, warn};
use crate::error::{Error, Result};
use crate::pdf::metadata::{self, DocumentInfo};

/// A decoded PDF together with the path it was loaded from
#[derive(Debug)]
pub struct PdfDocument {
    path: PathBuf,
    doc: Document,
}

impl PdfDocument {
    /// Load and validate a PDF file
    ///
    /// Fails when the path does not exist, the file cannot be parsed, or the
    /// document has no usable catalog / page tree.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }

        let doc = Document::load(path)?;
        debug!("loaded {} (PDF {}, {} objects)", path.display(), doc.version, doc.objects.len());

        Self::from_document(path, doc)
    }

    /// Wrap an already decoded document, applying the same checks as [`PdfDocument::open`]
    pub fn from_document(path: impl Into<PathBuf>, doc: Document) -> Result<Self> {
        let path = path.into();
        let declared = declared_page_count(&doc)?;
        let actual = doc.get_pages().len();

        if actual == 0 {
            return Err(Error::EmptyPdf(path));
        }
        if declared != actual {
            warn!(
                "{}: page tree declares {} pages but {} were found",
                path.display(), declared, actual
            );
        }

        Ok(Self { path, doc })
    }

    /// Path the document was loaded from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of pages reachable from the page tree
    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Page object ids in page order
    pub fn page_ids(&self) -> Vec<ObjectId> {
        self.doc.get_pages().into_values().collect()
    }

    /// Title/Author/Subject from the document-info dictionary
    pub fn info(&self) -> DocumentInfo {
        DocumentInfo::read(&self.doc)
    }

    /// The `/ViewerPreferences /DisplayDocTitle` flag, if set
    pub fn display_doc_title(&self) -> Option<bool> {
        metadata::display_doc_title(&self.doc)
    }

    /// Borrow the underlying lopdf document
    pub fn document(&self) -> &Document {
        &self.doc
    }
}

/// Read the Count field from the root Pages dictionary
fn declared_page_count(doc: &Document) -> Result<usize> {
    let catalog = metadata::catalog(doc)?;

    let pages_ref = catalog.get(b"Pages")
        .map_err(|_| Error::MalformedPdf("No Pages in catalog".to_string()))?;

    let pages_dict = match metadata::resolve(doc, pages_ref)? {
        Object::Dictionary(dict) => dict,
        _ => return Err(Error::MalformedPdf("Pages is not a dictionary".to_string())),
    };

    match pages_dict.get(b"Count") {
        Ok(Object::Integer(n)) if *n >= 0 => Ok(*n as usize),
        Ok(_) => Err(Error::MalformedPdf("Count is not a non-negative integer".to_string())),
        Err(_) => Err(Error::MalformedPdf("No Count in Pages".to_string())),
    }
}

//! Document-info metadata and viewer preferences

use lopdf::{Dictionary, Document, Object};
use crate::error::{Error, Result};

/// Title, Author and Subject from the document-info dictionary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentInfo {
    /// Document title (if present)
    pub title: Option<String>,
    /// Document author (if present)
    pub author: Option<String>,
    /// Document subject (if present)
    pub subject: Option<String>,
}

impl DocumentInfo {
    /// Extract the three fields from a document's `/Info` dictionary
    ///
    /// A missing dictionary, a missing key or a non-string value all read as `None`.
    pub fn read(doc: &Document) -> Self {
        let Some(info) = info_dict(doc) else {
            return Self::default();
        };

        Self {
            title: text_entry(doc, info, b"Title"),
            author: text_entry(doc, info, b"Author"),
            subject: text_entry(doc, info, b"Subject"),
        }
    }
}

/// Follow a reference to the object it points at; direct objects are returned as is
pub(crate) fn resolve<'a>(doc: &'a Document, object: &'a Object) -> Result<&'a Object> {
    match object {
        Object::Reference(id) => Ok(doc.get_object(*id)?),
        other => Ok(other),
    }
}

/// The document catalog referenced by the trailer's `/Root`
pub(crate) fn catalog(doc: &Document) -> Result<&Dictionary> {
    let root = doc.trailer.get(b"Root")
        .map_err(|_| Error::MalformedPdf("No Root in trailer".to_string()))?;

    match resolve(doc, root)? {
        Object::Dictionary(dict) => Ok(dict),
        _ => Err(Error::MalformedPdf("Catalog is not a dictionary".to_string())),
    }
}

/// The trailer's `/Info` dictionary, either referenced or inline
pub(crate) fn info_dict(doc: &Document) -> Option<&Dictionary> {
    let info = doc.trailer.get(b"Info").ok()?;
    match resolve(doc, info).ok()? {
        Object::Dictionary(dict) => Some(dict),
        _ => None,
    }
}

/// Read `/ViewerPreferences /DisplayDocTitle` from the catalog
pub fn display_doc_title(doc: &Document) -> Option<bool> {
    let prefs = catalog(doc).ok()?.get(b"ViewerPreferences").ok()?;
    let prefs = match resolve(doc, prefs).ok()? {
        Object::Dictionary(dict) => dict,
        _ => return None,
    };
    let flag = prefs.get(b"DisplayDocTitle").ok()?;
    resolve(doc, flag).ok()?.as_bool().ok()
}

fn text_entry(doc: &Document, dict: &Dictionary, key: &[u8]) -> Option<String> {
    let value = resolve(doc, dict.get(key).ok()?).ok()?;
    match value {
        Object::String(..) => lopdf::decode_text_string(value).ok(),
        _ => None,
    }
}

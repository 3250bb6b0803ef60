//! Title and viewer-preference patching using lopdf
//!
//! Patching copies every page of the source into a fresh document with a
//! flat page tree, sets the Title and `DisplayDocTitle`, and replaces the
//! original file.

use std::path::Path;
use lopdf::{Dictionary, Document, Object, ObjectId};
use log::{debug, info};
use crate::error::{Error, Result};
use crate::pdf::document::PdfDocument;
use crate::pdf::metadata;
use crate::pdf::save::save_in_place;

/// Page attributes a page may inherit from its ancestors in the page tree
const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Ancestor chains deeper than this are treated as cyclic
const MAX_TREE_DEPTH: usize = 64;

/// Metadata changes applied to a document before it is written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataPatch {
    /// New value for `/Info /Title`
    pub title: String,
    /// Value for `/ViewerPreferences /DisplayDocTitle`
    pub display_doc_title: bool,
}

impl MetadataPatch {
    /// Set the title and ask viewers to display it
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            display_doc_title: true,
        }
    }
}

/// Load `path`, set its title and `DisplayDocTitle`, and write it back in place
///
/// # Example
///
/// ```no_run
/// use pdf_titles::pdf::patch_file;
/// use std::path::Path;
///
/// patch_file(Path::new("public/pdf/education_flyer.pdf"), "Flyer for educators")
///     .expect("Failed to patch");
/// ```
pub fn patch_file(path: &Path, title: &str) -> Result<()> {
    let source = PdfDocument::open(path)?;
    patch_document(&source, &MetadataPatch::new(title))
}

/// Apply `patch` to an already loaded document and replace the file it came from
pub fn patch_document(source: &PdfDocument, patch: &MetadataPatch) -> Result<()> {
    let mut doc = rebuild(source.document())?;
    apply_patch(&mut doc, patch)?;
    save_in_place(&mut doc, source.path())?;

    info!("patched {} ({} pages)", source.path().display(), source.page_count());
    Ok(())
}

/// Copy every page of `source` into a fresh document
///
/// The new document gets its own catalog and a flat Pages node listing the
/// pages in order. Attributes a page inherited from its old ancestors are
/// copied onto the page itself. Content streams are left exactly as they
/// are; nothing is recompressed. The document-info dictionary and the
/// viewer preferences of the source carry over.
pub fn rebuild(source: &Document) -> Result<Document> {
    let page_ids: Vec<ObjectId> = source.get_pages().into_values().collect();
    if page_ids.is_empty() {
        return Err(Error::MalformedPdf("No pages to copy".to_string()));
    }

    // Resolve inheritance against the old tree before it is replaced
    let inherited: Vec<Vec<(&[u8], Object)>> = page_ids
        .iter()
        .map(|&id| inherited_attributes(source, id))
        .collect();

    let viewer_preferences = metadata::catalog(source)?
        .get(b"ViewerPreferences")
        .ok()
        .and_then(|prefs| metadata::resolve(source, prefs).ok())
        .and_then(|prefs| prefs.as_dict().ok())
        .cloned();

    let mut doc = Document::with_version(source.version.clone());
    doc.objects = source.objects.clone();

    // Keep new ids above everything we just copied
    doc.max_id = source.max_id;

    let pages_id = doc.new_object_id();
    let catalog_id = doc.new_object_id();

    let kids: Vec<Object> = page_ids
        .iter()
        .map(|&id| Object::Reference(id))
        .collect();

    let mut pages_object = Dictionary::new();
    pages_object.set("Type", Object::Name(b"Pages".to_vec()));
    pages_object.set("Count", Object::Integer(page_ids.len() as i64));
    pages_object.set("Kids", Object::Array(kids));

    let mut catalog = Dictionary::new();
    catalog.set("Type", Object::Name(b"Catalog".to_vec()));
    catalog.set("Pages", Object::Reference(pages_id));
    if let Some(prefs) = viewer_preferences {
        catalog.set("ViewerPreferences", Object::Dictionary(prefs));
    }

    doc.objects.insert(pages_id, Object::Dictionary(pages_object));
    doc.objects.insert(catalog_id, Object::Dictionary(catalog));
    doc.trailer.set("Root", Object::Reference(catalog_id));

    if let Ok(info) = source.trailer.get(b"Info") {
        doc.trailer.set("Info", info.clone());
    }

    for (&page_id, attributes) in page_ids.iter().zip(inherited) {
        let page = doc.get_object_mut(page_id)?.as_dict_mut()?;
        page.set("Parent", Object::Reference(pages_id));
        for (key, value) in attributes {
            page.set(key, value);
        }
    }

    let pruned = doc.prune_objects();
    debug!("rebuilt {} pages, pruned {} unreachable objects", page_ids.len(), pruned.len());

    Ok(doc)
}

/// Set the title in `/Info` and `DisplayDocTitle` in `/ViewerPreferences`
///
/// Both dictionaries are created when missing. Other `/Info` entries such
/// as Author and Subject are left alone.
pub fn apply_patch(doc: &mut Document, patch: &MetadataPatch) -> Result<()> {
    info_dict_mut(doc)?.set("Title", lopdf::text_string(&patch.title));
    viewer_preferences_mut(doc)?.set("DisplayDocTitle", Object::Boolean(patch.display_doc_title));
    Ok(())
}

/// Inheritable attributes missing from the page, taken from its nearest ancestor that has them
fn inherited_attributes(doc: &Document, page_id: ObjectId) -> Vec<(&'static [u8], Object)> {
    let Ok(page) = doc.get_dictionary(page_id) else {
        return Vec::new();
    };

    let mut missing: Vec<&'static [u8]> = INHERITABLE
        .iter()
        .copied()
        .filter(|key| !page.has(key))
        .collect();
    let mut found = Vec::new();
    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();

    for _ in 0..MAX_TREE_DEPTH {
        if missing.is_empty() {
            break;
        }
        let Some(node) = parent.and_then(|id| doc.get_dictionary(id).ok()) else {
            break;
        };

        missing.retain(|key| match node.get(key) {
            Ok(value) => {
                found.push((*key, value.clone()));
                false
            }
            Err(_) => true,
        });
        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
    }

    found
}

/// The document-info dictionary, created and referenced from the trailer if needed
fn info_dict_mut(doc: &mut Document) -> Result<&mut Dictionary> {
    let current = doc.trailer.get(b"Info").ok().cloned();
    let info_id = match current {
        Some(Object::Reference(id)) if doc.get_dictionary(id).is_ok() => id,
        Some(Object::Dictionary(dict)) => doc.add_object(dict),
        _ => doc.add_object(Dictionary::new()),
    };
    doc.trailer.set("Info", Object::Reference(info_id));

    Ok(doc.get_object_mut(info_id)?.as_dict_mut()?)
}

/// The catalog's viewer preferences, stored inline on the catalog
fn viewer_preferences_mut(doc: &mut Document) -> Result<&mut Dictionary> {
    let catalog_id = doc.trailer.get(b"Root")
        .and_then(Object::as_reference)
        .map_err(|_| Error::MalformedPdf("Root is not a reference".to_string()))?;

    let current = doc.get_dictionary(catalog_id)?
        .get(b"ViewerPreferences")
        .ok()
        .cloned();
    let prefs = match current {
        Some(Object::Dictionary(dict)) => dict,
        Some(Object::Reference(id)) => doc.get_dictionary(id)
            .cloned()
            .unwrap_or_else(|_| Dictionary::new()),
        _ => Dictionary::new(),
    };

    let catalog = doc.get_object_mut(catalog_id)?.as_dict_mut()?;
    catalog.set("ViewerPreferences", Object::Dictionary(prefs));
    Ok(catalog.get_mut(b"ViewerPreferences")?.as_dict_mut()?)
}

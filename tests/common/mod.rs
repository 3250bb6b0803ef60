//! Generated PDFs shared by the unit and integration tests
//!
//! Page size and fonts sit on the Pages node, so every page inherits them.

#![allow(dead_code)]

use std::path::Path;
use lopdf::{Dictionary, Document, Object, Stream};

/// Build a document with `pages` pages and the given `/Info` entries
pub fn sample_document(pages: usize, info: &[(&str, &str)]) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut font = Dictionary::new();
    font.set("Type", Object::Name(b"Font".to_vec()));
    font.set("Subtype", Object::Name(b"Type1".to_vec()));
    font.set("BaseFont", Object::Name(b"Helvetica".to_vec()));
    let font_id = doc.add_object(font);

    let mut fonts = Dictionary::new();
    fonts.set("F1", Object::Reference(font_id));
    let mut resources = Dictionary::new();
    resources.set("Font", Object::Dictionary(fonts));

    let mut kids = Vec::new();
    for i in 0..pages {
        let content = format!("BT /F1 18 Tf 72 700 Td (Handout page {}) Tj ET", i + 1);
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        let mut page = Dictionary::new();
        page.set("Type", Object::Name(b"Page".to_vec()));
        page.set("Parent", Object::Reference(pages_id));
        page.set("Contents", Object::Reference(content_id));
        kids.push(Object::Reference(doc.add_object(page)));
    }

    let mut pages_dict = Dictionary::new();
    pages_dict.set("Type", Object::Name(b"Pages".to_vec()));
    pages_dict.set("Count", Object::Integer(pages as i64));
    pages_dict.set("Kids", Object::Array(kids));
    pages_dict.set("Resources", Object::Dictionary(resources));
    pages_dict.set("MediaBox", Object::Array(vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Integer(595),
        Object::Integer(842),
    ]));
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let mut catalog = Dictionary::new();
    catalog.set("Type", Object::Name(b"Catalog".to_vec()));
    catalog.set("Pages", Object::Reference(pages_id));
    let catalog_id = doc.add_object(catalog);
    doc.trailer.set("Root", Object::Reference(catalog_id));

    if !info.is_empty() {
        let mut info_dict = Dictionary::new();
        for (key, value) in info {
            info_dict.set(*key, Object::string_literal(*value));
        }
        let info_id = doc.add_object(info_dict);
        doc.trailer.set("Info", Object::Reference(info_id));
    }

    doc
}

/// Write a [`sample_document`] to `path`
pub fn write_sample(path: &Path, pages: usize, info: &[(&str, &str)]) {
    let mut doc = sample_document(pages, info);
    doc.save(path).expect("Failed to write test PDF");
}

/// Content of every page of the PDF at `path`, in page order
pub fn page_contents(path: &Path) -> Vec<Vec<u8>> {
    let doc = Document::load(path).expect("Failed to load PDF");
    doc.get_pages()
        .into_values()
        .map(|id| doc.get_page_content(id).expect("Failed to read page content"))
        .collect()
}

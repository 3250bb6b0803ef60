//! PDF loading, reporting and patching

pub mod document;
pub mod metadata;
pub mod patch;
pub mod report;
pub mod save;

#[cfg(test)]
#[path = "../../tests/common/mod.rs"]
pub(crate) mod fixtures;

// Re-export commonly used items
pub use document::PdfDocument;
pub use metadata::DocumentInfo;
pub use patch::{apply_patch, patch_document, patch_file, rebuild, MetadataPatch};
pub use report::{report, ReportLines};
pub use save::save_in_place;

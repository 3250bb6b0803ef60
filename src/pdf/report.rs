//! Plain-text metadata report

use std::fmt;
use crate::pdf::document::PdfDocument;
use crate::pdf::metadata::DocumentInfo;

/// The rendered Title, Author and Subject lines of one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLines {
    /// `Title: ...`
    pub title: String,
    /// `Author: ...`
    pub author: String,
    /// `Subject: ...`
    pub subject: String,
}

impl ReportLines {
    /// Render the lines for already extracted metadata
    pub fn from_info(info: &DocumentInfo) -> Self {
        Self {
            title: field_line("Title", info.title.as_deref(), "No title"),
            author: field_line("Author", info.author.as_deref(), "No author"),
            subject: field_line("Subject", info.subject.as_deref(), "No subject"),
        }
    }

    /// The three lines in display order
    pub fn lines(&self) -> [&str; 3] {
        [self.title.as_str(), self.author.as_str(), self.subject.as_str()]
    }
}

impl fmt::Display for ReportLines {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "  {}", line)?;
        }
        Ok(())
    }
}

/// Report the Title, Author and Subject of a loaded document
pub fn report(pdf: &PdfDocument) -> ReportLines {
    ReportLines::from_info(&pdf.info())
}

fn field_line(field: &str, value: Option<&str>, fallback: &str) -> String {
    format!("{}: {}", field, value.unwrap_or(fallback))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::fixtures::sample_document;

    #[test]
    fn test_missing_subject_uses_fallback() {
        let info = DocumentInfo {
            title: Some("Handout".to_string()),
            author: Some("Vivian".to_string()),
            subject: None,
        };
        let lines = ReportLines::from_info(&info);

        assert_eq!(lines.lines(), ["Title: Handout", "Author: Vivian", "Subject: No subject"]);
    }

    #[test]
    fn test_all_fields_missing() {
        let lines = ReportLines::from_info(&DocumentInfo::default());
        assert_eq!(lines.lines(), ["Title: No title", "Author: No author", "Subject: No subject"]);
    }

    #[test]
    fn test_display_indents_lines() {
        let info = DocumentInfo {
            title: Some("朗読ワーク資料".to_string()),
            ..Default::default()
        };
        let rendered = ReportLines::from_info(&info).to_string();
        assert_eq!(rendered, "  Title: 朗読ワーク資料\n  Author: No author\n  Subject: No subject\n");
    }

    #[test]
    fn test_report_reads_document() {
        let doc = sample_document(1, &[("Subject", "Reading")]);
        let pdf = PdfDocument::from_document("doc.pdf", doc).unwrap();

        assert_eq!(report(&pdf).subject, "Subject: Reading");
        assert_eq!(report(&pdf).title, "Title: No title");
    }
}

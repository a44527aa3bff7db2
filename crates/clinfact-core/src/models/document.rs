//! Source document representation.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// How the document text was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Text handed over directly or read from a text file.
    #[default]
    PlainText,
    /// Embedded text layer of a digital PDF.
    DigitalPdf,
    /// Output of the external OCR command.
    Ocr,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PlainText => "plain_text",
            Self::DigitalPdf => "digital_pdf",
            Self::Ocr => "ocr",
        }
    }
}

/// The full text of one clinical record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Decoded document text.
    pub text: String,
    /// File the text came from, if any.
    pub path: Option<PathBuf>,
    /// How the text was produced.
    pub kind: SourceKind,
}

impl Document {
    /// Wrap raw text that did not come from a file.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            path: None,
            kind: SourceKind::PlainText,
        }
    }

    /// Attach the originating file and extraction method.
    pub fn with_source(mut self, path: impl AsRef<Path>, kind: SourceKind) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self.kind = kind;
        self
    }

    /// True when the text holds nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Human-readable origin used in reports and logs.
    pub fn describe(&self) -> String {
        match &self.path {
            Some(path) => path.display().to_string(),
            None => "<text>".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_from_text() {
        let doc = Document::from_text("linea 1\r\nlinea 2");
        assert_eq!(doc.kind, SourceKind::PlainText);
        assert_eq!(doc.describe(), "<text>");

        let doc = doc.with_source("hc.pdf", SourceKind::Ocr);
        assert_eq!(doc.describe(), "hc.pdf");
        assert_eq!(doc.kind, SourceKind::Ocr);
    }

    #[test]
    fn test_blank_document() {
        assert!(Document::from_text(" \n\t ").is_blank());
        assert!(!Document::from_text("x").is_blank());
    }
}

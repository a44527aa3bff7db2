//! Turning input files into document text.
//!
//! Text files are read directly. PDFs use their embedded text layer when it
//! is long enough and fall back to the PDF OCR command otherwise. Images
//! always go through the image OCR command.

mod ocr;

pub use ocr::OcrCommand;

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::error::{Result, SourceError};
use crate::models::config::{ClinfactConfig, PdfConfig};
use crate::models::document::{Document, SourceKind};

/// Input file category, decided by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Text,
    Pdf,
    Image,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> std::result::Result<Self, SourceError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "txt" | "text" => Ok(Self::Text),
            "pdf" => Ok(Self::Pdf),
            "png" | "jpg" | "jpeg" | "tif" | "tiff" | "bmp" => Ok(Self::Image),
            _ => Err(SourceError::UnsupportedFormat(extension)),
        }
    }

    /// True for extensions this loader understands.
    pub fn is_supported(path: &Path) -> bool {
        Self::from_path(path).is_ok()
    }
}

/// Loads documents according to the PDF and OCR settings.
pub struct DocumentLoader {
    pdf: PdfConfig,
    ocr: Option<OcrCommand>,
    pdf_ocr: Option<OcrCommand>,
}

impl DocumentLoader {
    pub fn new(config: &ClinfactConfig) -> Self {
        Self {
            pdf: config.pdf.clone(),
            ocr: OcrCommand::from_config(&config.ocr),
            pdf_ocr: OcrCommand::pdf_from_config(&config.ocr),
        }
    }

    /// Disable the OCR fallback (text layers only).
    pub fn without_ocr(mut self) -> Self {
        self.ocr = None;
        self.pdf_ocr = None;
        self
    }

    /// Load one file as a document.
    pub fn load(&self, path: &Path) -> Result<Document> {
        let format = InputFormat::from_path(path)?;
        info!("Loading {:?} document from {}", format, path.display());

        let (text, kind) = match format {
            InputFormat::Text => (read_text_file(path)?, SourceKind::PlainText),
            InputFormat::Pdf => self.load_pdf(path)?,
            InputFormat::Image => (run_ocr(self.ocr.as_ref(), path)?, SourceKind::Ocr),
        };

        let document = Document::from_text(text).with_source(path, kind);
        if document.is_blank() {
            return Err(SourceError::EmptyText(path.to_path_buf()).into());
        }

        Ok(document)
    }

    #[cfg(feature = "pdf")]
    fn load_pdf(&self, path: &Path) -> Result<(String, SourceKind)> {
        use crate::pdf::{PdfExtractor, PdfProcessor, PdfType};

        if !self.pdf.prefer_embedded_text {
            return Ok((run_ocr(self.pdf_ocr.as_ref(), path)?, SourceKind::Ocr));
        }

        let data = fs::read(path)?;
        let mut extractor = PdfExtractor::new();
        let embedded = extractor
            .load(&data)
            .and_then(|_| extractor.extract_all(self.pdf.min_text_length));

        let fallback_text = match embedded {
            Ok(content) if content.pdf_type == PdfType::Text => {
                return Ok((content.text, SourceKind::DigitalPdf));
            }
            Ok(content) => {
                warn!(
                    "PDF text layer of {} is shorter than {} characters, falling back to OCR",
                    path.display(),
                    self.pdf.min_text_length
                );
                content.text
            }
            Err(e) => {
                warn!("PDF text extraction failed for {}: {}, falling back to OCR", path.display(), e);
                String::new()
            }
        };

        match run_ocr(self.pdf_ocr.as_ref(), path) {
            Ok(text) => Ok((text, SourceKind::Ocr)),
            // A short text layer still beats nothing when OCR is not possible
            Err(e) if !fallback_text.trim().is_empty() => {
                warn!("OCR unavailable ({}), using short PDF text layer", e);
                Ok((fallback_text, SourceKind::DigitalPdf))
            }
            Err(e) => Err(e),
        }
    }

    #[cfg(not(feature = "pdf"))]
    fn load_pdf(&self, path: &Path) -> Result<(String, SourceKind)> {
        Ok((run_ocr(self.pdf_ocr.as_ref(), path)?, SourceKind::Ocr))
    }
}

fn run_ocr(ocr: Option<&OcrCommand>, path: &Path) -> Result<String> {
    let ocr = ocr.ok_or_else(|| SourceError::OcrUnavailable(path.to_path_buf()))?;
    Ok(ocr.run(path)?)
}

fn read_text_file(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    String::from_utf8(bytes).map_err(|e| SourceError::Encoding(e.to_string()).into())
}

/// Load one file with the given configuration.
pub fn load_document(path: &Path, config: &ClinfactConfig) -> Result<Document> {
    DocumentLoader::new(config).load(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClinfactError;
    use pretty_assertions::assert_eq;

    fn no_ocr_config() -> ClinfactConfig {
        let mut config = ClinfactConfig::default();
        config.ocr.enabled = false;
        config
    }

    #[test]
    fn test_input_format() {
        assert_eq!(InputFormat::from_path(Path::new("a.TXT")).unwrap(), InputFormat::Text);
        assert_eq!(InputFormat::from_path(Path::new("a.pdf")).unwrap(), InputFormat::Pdf);
        assert_eq!(InputFormat::from_path(Path::new("a.jpeg")).unwrap(), InputFormat::Image);
        assert!(!InputFormat::is_supported(Path::new("a.docx")));
        assert!(!InputFormat::is_supported(Path::new("sin_extension")));
    }

    #[test]
    fn test_load_text_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hc.txt");
        fs::write(&path, "No. CC: 123456\n").unwrap();

        let doc = load_document(&path, &no_ocr_config()).unwrap();
        assert_eq!(doc.text, "No. CC: 123456\n");
        assert_eq!(doc.kind, SourceKind::PlainText);
        assert_eq!(doc.path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_empty_text_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vacio.txt");
        fs::write(&path, "  \n").unwrap();

        let result = load_document(&path, &no_ocr_config());
        assert!(matches!(result, Err(ClinfactError::Source(SourceError::EmptyText(_)))));
    }

    #[test]
    fn test_invalid_utf8_is_encoding_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.txt");
        fs::write(&path, [0x45, 0x64, 0x61, 0x64, 0xF1]).unwrap();

        let result = load_document(&path, &no_ocr_config());
        assert!(matches!(result, Err(ClinfactError::Source(SourceError::Encoding(_)))));
    }

    #[test]
    fn test_image_without_ocr() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.png");
        fs::write(&path, "x").unwrap();

        let result = DocumentLoader::new(&ClinfactConfig::default())
            .without_ocr()
            .load(&path);
        assert!(matches!(result, Err(ClinfactError::Source(SourceError::OcrUnavailable(_)))));
    }

    #[test]
    fn test_unsupported_format() {
        let result = load_document(Path::new("hc.docx"), &no_ocr_config());
        assert!(matches!(result, Err(ClinfactError::Source(SourceError::UnsupportedFormat(_)))));
    }

    #[cfg(unix)]
    #[test]
    fn test_image_goes_through_ocr() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.jpg");
        fs::write(&path, "Edad actual: 30 AÑOS").unwrap();

        let mut config = ClinfactConfig::default();
        config.ocr.command = vec!["cat".to_string(), "{input}".to_string()];
        config.ocr.pdf_command = vec!["false".to_string()];

        let doc = load_document(&path, &config).unwrap();
        assert_eq!(doc.kind, SourceKind::Ocr);
        assert_eq!(doc.text, "Edad actual: 30 AÑOS");
    }

    #[cfg(unix)]
    #[test]
    fn test_pdf_without_embedded_text_uses_pdf_command() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hc.pdf");
        fs::write(&path, "No. CC: 77").unwrap();

        let mut config = ClinfactConfig::default();
        config.pdf.prefer_embedded_text = false;
        config.ocr.command = vec!["false".to_string()];
        config.ocr.pdf_command = vec!["cat".to_string()];

        let doc = load_document(&path, &config).unwrap();
        assert_eq!(doc.kind, SourceKind::Ocr);
        assert_eq!(doc.text, "No. CC: 77");
    }

    #[cfg(all(unix, feature = "pdf"))]
    #[test]
    fn test_unreadable_pdf_falls_back_to_pdf_ocr() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("escaneado.pdf");
        fs::write(&path, "texto reconocido").unwrap();

        // The image command would fail; only the PDF command can succeed
        let mut config = ClinfactConfig::default();
        config.ocr.command = vec!["false".to_string()];
        config.ocr.pdf_command = vec!["cat".to_string(), "{input}".to_string()];

        let doc = load_document(&path, &config).unwrap();
        assert_eq!(doc.kind, SourceKind::Ocr);
        assert_eq!(doc.text, "texto reconocido");

        let no_ocr = load_document(&path, &no_ocr_config());
        assert!(matches!(no_ocr, Err(ClinfactError::Source(SourceError::OcrUnavailable(_)))));
    }
}

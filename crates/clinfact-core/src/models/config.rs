//! Configuration structures for document loading and extraction.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::clinical::rules::{ADMINISTRATION_KEYWORD, PROCEDURE_KEYWORDS, TRANSFUSION_KEYWORD};
use crate::error::ClinfactError;

/// Main configuration for the clinfact pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClinfactConfig {
    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// External OCR configuration.
    pub ocr: OcrConfig,

    /// Record extraction configuration.
    pub extraction: ExtractionConfig,

    /// Report export configuration.
    pub export: ExportConfig,
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Try to extract embedded text before falling back to OCR.
    pub prefer_embedded_text: bool,

    /// Minimum trimmed text length to accept embedded PDF text.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            prefer_embedded_text: true,
            min_text_length: 50,
        }
    }
}

/// External OCR command configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Allow falling back to OCR at all.
    pub enabled: bool,

    /// Program and arguments for images; `{input}` is replaced by the file
    /// path. The command must print the recognized text on stdout.
    pub command: Vec<String>,

    /// Program and arguments for scanned PDFs, same conventions as
    /// `command`. Image OCR tools such as tesseract cannot read PDF input.
    pub pdf_command: Vec<String>,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            command: vec![
                "tesseract".to_string(),
                "{input}".to_string(),
                "stdout".to_string(),
                "-l".to_string(),
                "spa".to_string(),
            ],
            pdf_command: [
                "ocrmypdf",
                "-l",
                "spa",
                "--force-ocr",
                "--output-type",
                "none",
                "--sidecar",
                "-",
                "{input}",
                "-",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

/// Record extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Billable procedure vocabulary, matched case-insensitively per line.
    pub procedure_keywords: Vec<String>,

    /// Nursing-note keyword classifying a line as a transfusion.
    pub transfusion_keyword: String,

    /// Nursing-note keyword classifying a line as an administration.
    pub administration_keyword: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            procedure_keywords: PROCEDURE_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            transfusion_keyword: TRANSFUSION_KEYWORD.to_string(),
            administration_keyword: ADMINISTRATION_KEYWORD.to_string(),
        }
    }
}

/// Report export configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Prefix for generated CSV file names.
    pub file_prefix: String,

    /// CSV field delimiter (single ASCII character).
    pub delimiter: char,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_prefix: "facturacion".to_string(),
            delimiter: ',',
        }
    }
}

impl ExportConfig {
    /// Delimiter as a byte for CSV writers.
    pub fn delimiter_byte(&self) -> Result<u8, ClinfactError> {
        if self.delimiter.is_ascii() {
            Ok(self.delimiter as u8)
        } else {
            Err(ClinfactError::Config(format!(
                "CSV delimiter must be ASCII, got {:?}",
                self.delimiter
            )))
        }
    }
}

impl ClinfactConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ClinfactError> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            ClinfactError::Config(format!("invalid config {}: {}", path.display(), e))
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), ClinfactError> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ClinfactError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: ClinfactConfig =
            serde_json::from_str(r#"{ "pdf": { "min_text_length": 120 } }"#).unwrap();

        assert_eq!(config.pdf.min_text_length, 120);
        assert!(config.pdf.prefer_embedded_text);
        assert_eq!(config.extraction.procedure_keywords.len(), PROCEDURE_KEYWORDS.len());
        assert_eq!(config.export.file_prefix, "facturacion");
        assert_eq!(config.ocr.command[0], "tesseract");
        assert_eq!(config.ocr.pdf_command[0], "ocrmypdf");
        assert!(config.ocr.pdf_command.contains(&"{input}".to_string()));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = ClinfactConfig::default();
        config.export.delimiter = ';';
        config.save(&path).unwrap();

        let loaded = ClinfactConfig::from_file(&path).unwrap();
        assert_eq!(loaded.export.delimiter, ';');
        assert_eq!(loaded.export.delimiter_byte().unwrap(), b';');
    }

    #[test]
    fn test_invalid_config_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            ClinfactConfig::from_file(&path),
            Err(ClinfactError::Config(_))
        ));
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        let export = ExportConfig {
            delimiter: '¦',
            ..Default::default()
        };
        assert!(export.delimiter_byte().is_err());
    }
}

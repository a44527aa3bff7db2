//! Error types for the clinfact-core library.
//!
//! The extraction engine itself never fails; these errors belong to the
//! collaborators that turn files into document text.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the clinfact library.
#[derive(Error, Debug)]
pub enum ClinfactError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Document source error.
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors raised while turning an input file into document text.
#[derive(Error, Debug)]
pub enum SourceError {
    /// File extension is not a supported document type.
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// The file needs OCR but no OCR command is configured or enabled.
    #[error("OCR is required for {0} but no OCR command is available")]
    OcrUnavailable(PathBuf),

    /// The OCR command could not be run or exited with an error.
    #[error("OCR command failed: {0}")]
    OcrFailed(String),

    /// The source produced no text at all.
    #[error("no text could be extracted from {0}")]
    EmptyText(PathBuf),

    /// The text is not valid UTF-8.
    #[error("text encoding error: {0}")]
    Encoding(String),
}

/// Result type for the clinfact library.
pub type Result<T> = std::result::Result<T, ClinfactError>;

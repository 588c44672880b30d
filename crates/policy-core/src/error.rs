//! Error types for the policy-core library.

use thiserror::Error;

/// Main error type for the policy library.
#[derive(Error, Debug)]
pub enum PolicyError {
    /// PDF text acquisition error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF text acquisition.
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

/// Errors related to coverage field extraction.
///
/// These never abort a record: the engine logs them and keeps the
/// field's default value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// Matched text could not be converted to the field's type.
    #[error("failed to parse {field}: {value:?}")]
    Parse { field: String, value: String },

    /// A rule referenced a capture group its pattern does not have.
    #[error("pattern for {field} has no capture group {group}")]
    MissingGroup { field: String, group: usize },
}

/// Result type for the policy library.
pub type Result<T> = std::result::Result<T, PolicyError>;

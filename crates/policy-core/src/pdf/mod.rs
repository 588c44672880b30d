//! PDF text acquisition module.

mod extractor;

pub use extractor::PdfExtractor;

use crate::error::PdfError;

/// Which backend produced the document text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextBackend {
    /// pdf-extract over the whole document.
    PdfExtract,
    /// lopdf per-page extraction.
    Lopdf,
}

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract text from the entire PDF.
    fn extract_text(&self) -> Result<String>;
}

//! PDF text extraction using pdf-extract with a lopdf fallback.

use lopdf::Document;
use tracing::{debug, warn};

use super::{PdfProcessor, Result, TextBackend};
use crate::error::PdfError;
use crate::models::config::PdfConfig;

/// PDF text extractor.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
    config: PdfConfig,
}

impl PdfExtractor {
    /// Create a new PDF extractor with default settings.
    pub fn new() -> Self {
        Self::with_config(PdfConfig::default())
    }

    /// Create a PDF extractor with the given settings.
    pub fn with_config(config: PdfConfig) -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
            config,
        }
    }

    /// Extract document text, reporting which backend produced it.
    ///
    /// pdf-extract runs first; when it fails or yields fewer than
    /// `min_text_length` non-whitespace characters, lopdf's per-page
    /// extraction is used instead and the longer of the two wins.
    pub fn extract_text_with_backend(&self) -> Result<(String, TextBackend)> {
        let doc = self.document()?;

        let primary = match pdf_extract::extract_text_from_mem(&self.raw_data) {
            Ok(text) => text,
            Err(e) => {
                warn!("pdf-extract failed, using lopdf: {}", e);
                String::new()
            }
        };

        let primary_len = content_length(&primary);
        if primary_len >= self.config.min_text_length {
            debug!("pdf-extract produced {} characters", primary_len);
            return Ok((primary, TextBackend::PdfExtract));
        }

        let pages: Vec<u32> = doc.get_pages().keys().copied().collect();
        let mut fallback = Vec::with_capacity(pages.len());
        for page in pages {
            match doc.extract_text(&[page]) {
                Ok(text) => fallback.push(text),
                Err(e) => debug!("lopdf could not read page {}: {}", page, e),
            }
        }
        let fallback = fallback.join(&self.config.page_separator);
        let fallback_len = content_length(&fallback);

        debug!(
            "pdf-extract produced {} characters, lopdf {}",
            primary_len, fallback_len
        );

        if fallback_len == 0 && primary_len == 0 {
            return Err(PdfError::TextExtraction(
                "no text layer found".to_string(),
            ));
        }

        if fallback_len > primary_len {
            Ok((fallback, TextBackend::Lopdf))
        } else {
            Ok((primary, TextBackend::PdfExtract))
        }
    }

    fn document(&self) -> Result<&Document> {
        self.document
            .as_ref()
            .ok_or(PdfError::Parse("No document loaded".to_string()))
    }
}

fn content_length(text: &str) -> usize {
    text.chars().filter(|c| !c.is_whitespace()).count()
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // pdf-extract reads the decrypted copy
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_text(&self) -> Result<String> {
        self.extract_text_with_backend().map(|(text, _)| text)
    }
}

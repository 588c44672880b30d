//! Configuration structures for the extraction pipeline.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{PolicyError, Result};

/// Main configuration for the policy pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Coverage extraction configuration.
    pub extraction: ExtractionConfig,

    /// PDF text acquisition configuration.
    pub pdf: PdfConfig,
}

/// Coverage extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Policy sum insured used by rules that lack a document-specific one
    /// (ambulance, convalescence and home nursing).
    pub reference_sum_insured: Decimal,

    /// Flat catalog reference used for the critical illness and daily cash
    /// percentage fields.
    pub flat_reference_amount: Decimal,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            reference_sum_insured: Decimal::from(500_000),
            flat_reference_amount: Decimal::from(500_000),
        }
    }
}

/// PDF text acquisition configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Minimum non-whitespace characters before the primary text backend
    /// is trusted; shorter output triggers the fallback backend.
    pub min_text_length: usize,

    /// Separator placed between pages by the fallback backend.
    pub page_separator: String,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            min_text_length: 100,
            page_separator: "\n".to_string(),
        }
    }
}

impl PolicyConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject reference sums that could never produce a derived field.
    pub fn validate(&self) -> Result<()> {
        if self.extraction.reference_sum_insured.is_sign_negative() {
            return Err(PolicyError::Config(format!(
                "reference_sum_insured must not be negative, got {}",
                self.extraction.reference_sum_insured
            )));
        }
        if self.extraction.flat_reference_amount.is_sign_negative() {
            return Err(PolicyError::Config(format!(
                "flat_reference_amount must not be negative, got {}",
                self.extraction.flat_reference_amount
            )));
        }
        Ok(())
    }
}

//! Core library for insurance policy coverage extraction.
//!
//! This crate provides:
//! - PDF text acquisition (pdf-extract with a lopdf fallback)
//! - Endorsement block segmentation and category detection
//! - A declarative field rule catalog for addon coverages
//!   (ambulance, convalescence, critical illness, daily cash, home nursing)
//! - Keyword-based addon presence detection
//! - Tabular record models ready for report rendering

pub mod error;
pub mod models;
pub mod pdf;
pub mod extraction;

pub use error::{PolicyError, Result};
pub use models::config::PolicyConfig;
pub use models::record::{CategoryResult, CoverageMap, FeatureRecord, FieldValue, Presence, Record};
pub use models::report::PolicyReport;
pub use pdf::{PdfExtractor, PdfProcessor, TextBackend};
pub use extraction::{detect_features, AddonCoverageParser, CoverageParser, ExtractionResult};

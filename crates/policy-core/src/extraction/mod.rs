//! Coverage extraction from policy text.

mod assembler;
pub mod detect;
pub mod features;
pub mod rules;
pub mod segment;

pub use assembler::AddonCoverageParser;
pub use detect::{detect_categories, PresenceMap};
pub use features::{detect_features, AddonSignal, ADDON_SIGNALS};
pub use segment::{scan_endorsements, scan_special_conditions, segment, Block, Marker};

use std::time::Instant;

use tracing::info;

use crate::models::report::PolicyReport;

/// Result of coverage extraction.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Extracted report.
    pub report: PolicyReport,
    /// Field-level issues met during extraction.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Trait for coverage parsing.
pub trait CoverageParser {
    /// Parse coverages from document text.
    fn parse(&self, text: &str) -> ExtractionResult;
}

impl CoverageParser for AddonCoverageParser {
    fn parse(&self, text: &str) -> ExtractionResult {
        let start = Instant::now();

        info!("Parsing policy from {} characters of text", text.len());

        let presence = detect_categories(text, self.catalog());
        let (addon_coverages, issues) = self.assemble(text, &presence);
        let addon_covers = detect_features(text);
        let endorsements = scan_endorsements(text);
        let special_conditions = scan_special_conditions(text);

        let warnings: Vec<String> = issues.iter().map(ToString::to_string).collect();

        let processing_time_ms = start.elapsed().as_millis() as u64;

        info!(
            "Extracted {} of {} categories, {} endorsement(s), {} warning(s) in {}ms",
            presence.values().filter(|p| **p).count(),
            presence.len(),
            endorsements.len(),
            warnings.len(),
            processing_time_ms
        );

        ExtractionResult {
            report: PolicyReport {
                addon_covers,
                addon_coverages,
                endorsements,
                special_conditions,
            },
            warnings,
            processing_time_ms,
        }
    }
}

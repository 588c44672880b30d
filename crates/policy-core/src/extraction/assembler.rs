//! Record assembly for the addon coverage categories.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::error::ExtractionError;
use crate::models::config::ExtractionConfig;
use crate::models::record::{CategoryResult, CoverageMap, Record};

use super::detect::PresenceMap;
use super::rules::{addon_catalog, CategoryRules, RuleContext};
use super::segment::segment;

/// Addon coverage parser driven by a rule catalog.
#[derive(Debug, Clone)]
pub struct AddonCoverageParser {
    context: RuleContext,
    catalog: &'static [CategoryRules],
}

impl AddonCoverageParser {
    /// Create a parser over the addon catalog with default reference amounts.
    pub fn new() -> Self {
        Self {
            context: RuleContext::default(),
            catalog: addon_catalog(),
        }
    }

    /// Create a parser from extraction settings.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            context: RuleContext::from(config),
            catalog: addon_catalog(),
        }
    }

    /// Set the policy sum insured used for defaults and ratios.
    pub fn with_reference_sum_insured(mut self, amount: Decimal) -> Self {
        self.context.reference_sum_insured = amount;
        self
    }

    /// Set the flat reference used for critical illness and daily cash percentages.
    pub fn with_flat_reference_amount(mut self, amount: Decimal) -> Self {
        self.context.flat_reference_amount = amount;
        self
    }

    pub fn catalog(&self) -> &'static [CategoryRules] {
        self.catalog
    }

    pub fn context(&self) -> &RuleContext {
        &self.context
    }

    /// Build the coverage map for every catalog category.
    ///
    /// Categories missing from `presence` are treated as absent.
    pub fn assemble(&self, text: &str, presence: &PresenceMap) -> (CoverageMap, Vec<ExtractionError>) {
        let mut coverages = CoverageMap::with_capacity(self.catalog.len());
        let mut issues = Vec::new();

        for category in self.catalog {
            let present = presence.get(category.name).copied().unwrap_or(false);
            let result = if present {
                CategoryResult::Detected(self.extract_blocks(text, category, &mut issues))
            } else {
                CategoryResult::Absent(category.placeholder())
            };
            coverages.insert(category.name.to_string(), result);
        }

        (coverages, issues)
    }

    fn extract_blocks(
        &self,
        text: &str,
        category: &CategoryRules,
        issues: &mut Vec<ExtractionError>,
    ) -> Vec<Record> {
        let blocks = segment(text, &category.marker);
        if blocks.is_empty() {
            warn!("{} marked present but no block segmented", category.name);
            return vec![Record::new()];
        }

        debug!("{}: {} block(s)", category.name, blocks.len());

        blocks
            .iter()
            .map(|block| {
                let outcome = category.extract(block.text, &self.context);
                issues.extend(outcome.issues);
                outcome.record
            })
            .collect()
    }
}

impl Default for AddonCoverageParser {
    fn default() -> Self {
        Self::new()
    }
}

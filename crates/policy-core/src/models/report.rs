//! Report handed to external renderers.

use serde::Serialize;

use super::record::{CoverageMap, FeatureRecord};

/// Everything the renderer needs from one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PolicyReport {
    /// One Yes/No flag per known addon type.
    pub addon_covers: FeatureRecord,

    /// Per-category addon coverage records.
    pub addon_coverages: CoverageMap,

    /// Distinct endorsement identifiers found in the document.
    pub endorsements: Vec<String>,

    /// Distinct special condition lines found in the document.
    pub special_conditions: Vec<String>,
}

/// A single cell of the report in long (tidy) form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub section: &'static str,
    pub category: String,
    pub record: usize,
    pub field: String,
    pub value: String,
}

impl PolicyReport {
    /// Flatten the report into rows, feature flags first.
    ///
    /// Feature rows use the addon name as both category and field so the
    /// two sections share one column layout.
    pub fn rows(&self) -> Vec<ReportRow> {
        let mut rows = Vec::new();

        for (addon, presence) in &self.addon_covers {
            rows.push(ReportRow {
                section: "addon_covers",
                category: addon.clone(),
                record: 0,
                field: addon.clone(),
                value: presence.to_string(),
            });
        }

        for (category, result) in &self.addon_coverages {
            for (index, record) in result.records().iter().enumerate() {
                for (field, value) in record.iter() {
                    rows.push(ReportRow {
                        section: "addon_coverages",
                        category: category.clone(),
                        record: index,
                        field: field.to_string(),
                        value: value.to_string(),
                    });
                }
            }
        }

        rows
    }
}

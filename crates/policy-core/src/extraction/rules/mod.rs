//! Declarative field rules for endorsement blocks.
//!
//! Each coverage category is described by a [`CategoryRules`]: its marker,
//! an ordered field schema with defaults, and an ordered list of
//! [`FieldRule`]s. One generic interpreter ([`CategoryRules::extract`])
//! turns a block of text into a [`Record`]. Rules run in order and never
//! short-circuit; a later rule that writes a field overwrites earlier values.

pub mod amounts;
pub mod catalog;
pub mod patterns;

pub use amounts::{parse_count, parse_rupee_amount, share_of_reference, ShareScale};
pub use catalog::{addon_catalog, ADDON_CATALOG};

use regex::Regex;
use rust_decimal::Decimal;
use tracing::{trace, warn};

use crate::error::ExtractionError;
use crate::models::config::ExtractionConfig;
use crate::models::record::{FieldValue, Record};

use super::segment::Marker;

/// Converts captured text into a typed field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueParser {
    /// Whole number.
    Integer,
    /// Rupee amount with thousands separators.
    Amount,
    /// Captured text as-is.
    Verbatim,
    /// Captured text behind a fixed prefix, e.g. `"Rs. "`.
    Prefixed(&'static str),
}

impl ValueParser {
    /// Parse `raw` for `field`.
    pub fn parse(self, field: &str, raw: &str) -> Result<FieldValue, ExtractionError> {
        let parsed = match self {
            Self::Integer => parse_count(raw).map(FieldValue::Integer),
            Self::Amount => parse_rupee_amount(raw).map(FieldValue::Amount),
            Self::Verbatim => Some(FieldValue::text(raw.trim())),
            Self::Prefixed(prefix) => Some(FieldValue::text(format!("{}{}", prefix, raw.trim()))),
        };

        parsed.ok_or_else(|| ExtractionError::Parse {
            field: field.to_string(),
            value: raw.to_string(),
        })
    }
}

/// Reference amount a derived field is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference {
    /// The policy sum insured supplied by the caller.
    SumInsured,
    /// The flat catalog reference amount.
    FlatAmount,
}

/// Value a field takes before any rule runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldDefault {
    Empty,
    Text(&'static str),
    Integer(i64),
    Reference(Reference),
}

/// A field written by a capture, with its own parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    pub field: &'static str,
    pub parser: ValueParser,
}

impl Target {
    pub const fn new(field: &'static str, parser: ValueParser) -> Self {
        Self { field, parser }
    }
}

/// One extraction rule.
#[derive(Debug, Clone)]
pub enum FieldRule {
    /// First capture group of the first match, parsed into every target.
    Capture { pattern: Regex, targets: Vec<Target> },

    /// Existence-only: any alternative matching sets `field` to `value`.
    Flag {
        field: &'static str,
        patterns: Vec<Regex>,
        value: &'static str,
    },

    /// Two-bound amount range; the larger bound also fills every `cap` field.
    Range {
        pattern: Regex,
        from: &'static str,
        to: &'static str,
        cap: Vec<&'static str>,
    },

    /// A coarse gate sets `flag`; only then a stricter pattern may fill `detail`.
    Gated {
        gate: Vec<Regex>,
        flag: &'static str,
        value: &'static str,
        detail: Regex,
        target: Target,
    },

    /// `field` becomes the Yes/No opposite of `of`.
    Complement { field: &'static str, of: &'static str },

    /// `field` becomes `numerator` as a share of a reference amount, left
    /// untouched unless both are strictly positive.
    Ratio {
        field: &'static str,
        numerator: &'static str,
        reference: Reference,
        scale: ShareScale,
        decimals: Option<u32>,
    },
}

/// Inputs shared by every rule of one extraction run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleContext {
    pub reference_sum_insured: Decimal,
    pub flat_reference_amount: Decimal,
}

impl RuleContext {
    pub fn reference(&self, reference: Reference) -> Decimal {
        match reference {
            Reference::SumInsured => self.reference_sum_insured,
            Reference::FlatAmount => self.flat_reference_amount,
        }
    }
}

impl Default for RuleContext {
    fn default() -> Self {
        Self::from(&ExtractionConfig::default())
    }
}

impl From<&ExtractionConfig> for RuleContext {
    fn from(config: &ExtractionConfig) -> Self {
        Self {
            reference_sum_insured: config.reference_sum_insured,
            flat_reference_amount: config.flat_reference_amount,
        }
    }
}

/// A record together with the field issues met while building it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordOutcome {
    pub record: Record,
    pub issues: Vec<ExtractionError>,
}

impl FieldRule {
    /// Apply this rule to `block`, writing into `record`.
    fn apply(
        &self,
        block: &str,
        context: &RuleContext,
        record: &mut Record,
        issues: &mut Vec<ExtractionError>,
    ) {
        match self {
            Self::Capture { pattern, targets } => {
                let Some(caps) = pattern.captures(block) else {
                    return;
                };
                let Some(raw) = caps.get(1) else {
                    for target in targets {
                        issues.push(ExtractionError::MissingGroup {
                            field: target.field.to_string(),
                            group: 1,
                        });
                    }
                    return;
                };
                for target in targets {
                    write_parsed(record, issues, *target, raw.as_str());
                }
            }
            Self::Flag { field, patterns, value } => {
                if patterns.iter().any(|p| p.is_match(block)) {
                    record.set(*field, *value);
                }
            }
            Self::Range { pattern, from, to, cap } => {
                let Some(caps) = pattern.captures(block) else {
                    return;
                };
                let mut bounds = Vec::with_capacity(2);
                for (group, field) in [(1, *from), (2, *to)] {
                    let Some(raw) = caps.get(group) else {
                        issues.push(ExtractionError::MissingGroup {
                            field: field.to_string(),
                            group,
                        });
                        continue;
                    };
                    match ValueParser::Amount.parse(field, raw.as_str()) {
                        Ok(value) => {
                            if let Some(amount) = value.as_decimal() {
                                bounds.push(amount);
                            }
                            record.set(field, value);
                        }
                        Err(err) => report(issues, err),
                    }
                }
                if let Some(max) = bounds.into_iter().max() {
                    for field in cap {
                        record.set(*field, max);
                    }
                }
            }
            Self::Gated { gate, flag, value, detail, target } => {
                if !gate.iter().any(|p| p.is_match(block)) {
                    return;
                }
                record.set(*flag, *value);
                if let Some(raw) = detail.captures(block).and_then(|c| c.get(1)) {
                    write_parsed(record, issues, *target, raw.as_str());
                }
            }
            Self::Complement { field, of } => {
                let source_is_yes = record.get(of).and_then(FieldValue::as_str) == Some("Yes");
                record.set(*field, if source_is_yes { "No" } else { "Yes" });
            }
            Self::Ratio { field, numerator, reference, scale, decimals } => {
                let Some(amount) = record.get(numerator).and_then(FieldValue::as_decimal) else {
                    return;
                };
                let base = context.reference(*reference);
                match share_of_reference(amount, base, *scale, *decimals) {
                    Some(share) => record.set(*field, share),
                    None => trace!("{} undefined for {} against {}", field, amount, base),
                }
            }
        }
    }
}

fn write_parsed(record: &mut Record, issues: &mut Vec<ExtractionError>, target: Target, raw: &str) {
    match target.parser.parse(target.field, raw) {
        Ok(value) => record.set(target.field, value),
        Err(err) => report(issues, err),
    }
}

fn report(issues: &mut Vec<ExtractionError>, err: ExtractionError) {
    warn!("{}; keeping default", err);
    issues.push(err);
}

/// Schema, marker and rules of one coverage category.
#[derive(Debug, Clone)]
pub struct CategoryRules {
    /// Category name, used verbatim as the report key.
    pub name: &'static str,
    /// Endorsement marker delimiting this category's blocks.
    pub marker: Marker,
    /// Field names in output order with their defaults.
    pub schema: Vec<(&'static str, FieldDefault)>,
    /// Rules applied in order to every block.
    pub rules: Vec<FieldRule>,
}

impl CategoryRules {
    /// The canonical blank row: every schema field set to the empty sentinel.
    pub fn placeholder(&self) -> Record {
        self.schema
            .iter()
            .map(|(field, _)| (field.to_string(), FieldValue::Empty))
            .collect()
    }

    /// A record holding every field's default.
    pub fn defaults(&self, context: &RuleContext) -> Record {
        self.schema
            .iter()
            .map(|(field, default)| {
                let value = match default {
                    FieldDefault::Empty => FieldValue::Empty,
                    FieldDefault::Text(s) => FieldValue::text(*s),
                    FieldDefault::Integer(n) => FieldValue::Integer(*n),
                    FieldDefault::Reference(r) => FieldValue::Amount(context.reference(*r)),
                };
                (field.to_string(), value)
            })
            .collect()
    }

    /// Build the record for one block of text.
    pub fn extract(&self, block: &str, context: &RuleContext) -> RecordOutcome {
        let mut record = self.defaults(context);
        let mut issues = Vec::new();

        for rule in &self.rules {
            rule.apply(block, context, &mut record, &mut issues);
        }

        RecordOutcome { record, issues }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_rules() -> CategoryRules {
        CategoryRules {
            name: "Sample",
            marker: Marker::new("Endt. No. 99", Regex::new(r"(?i)Endt\.\s*No\.\s*99").unwrap()),
            schema: vec![
                ("Amount", FieldDefault::Empty),
                ("Days", FieldDefault::Integer(0)),
                ("Share", FieldDefault::Empty),
                ("Basis", FieldDefault::Reference(Reference::SumInsured)),
            ],
            rules: vec![
                FieldRule::Capture {
                    pattern: Regex::new(r"(?i)amount Rs\.?\s*([\d,]+)").unwrap(),
                    targets: vec![Target::new("Amount", ValueParser::Amount)],
                },
                FieldRule::Capture {
                    pattern: Regex::new(r"(?i)(\d+)\s+days").unwrap(),
                    targets: vec![Target::new("Days", ValueParser::Integer)],
                },
                FieldRule::Ratio {
                    field: "Share",
                    numerator: "Amount",
                    reference: Reference::SumInsured,
                    scale: ShareScale::Ratio,
                    decimals: None,
                },
            ],
        }
    }

    #[test]
    fn test_parser_prefixed_keeps_capture_verbatim() {
        let value = ValueParser::Prefixed("Rs. ").parse("Applicable Limit", "1,00,000").unwrap();
        assert_eq!(value, FieldValue::text("Rs. 1,00,000"));
    }

    #[test]
    fn test_defaults_on_empty_block() {
        let rules = sample_rules();
        let outcome = rules.extract("", &RuleContext::default());

        assert!(outcome.issues.is_empty());
        assert_eq!(outcome.record.get("Amount"), Some(&FieldValue::Empty));
        assert_eq!(outcome.record.get("Days"), Some(&FieldValue::Integer(0)));
        assert_eq!(outcome.record.get("Share"), Some(&FieldValue::Empty));
        assert_eq!(
            outcome.record.get("Basis"),
            Some(&FieldValue::Amount(Decimal::from(500_000)))
        );
    }

    #[test]
    fn test_parse_failure_is_isolated() {
        let rules = sample_rules();
        let outcome = rules.extract("amount Rs. ,, for 12 days", &RuleContext::default());

        assert_eq!(outcome.issues.len(), 1);
        assert_eq!(outcome.record.get("Amount"), Some(&FieldValue::Empty));
        assert_eq!(outcome.record.get("Days"), Some(&FieldValue::Integer(12)));
        assert_eq!(outcome.record.get("Share"), Some(&FieldValue::Empty));
    }

    #[test]
    fn test_ratio_uses_context_reference() {
        let rules = sample_rules();
        let context = RuleContext {
            reference_sum_insured: Decimal::from(200_000),
            flat_reference_amount: Decimal::from(500_000),
        };
        let outcome = rules.extract("amount Rs. 20,000", &context);

        assert_eq!(
            outcome.record.get("Share"),
            Some(&FieldValue::Amount(Decimal::new(1, 1)))
        );
    }

    #[test]
    fn test_placeholder_has_every_field_blank() {
        let placeholder = sample_rules().placeholder();
        assert_eq!(placeholder.len(), 4);
        assert!(placeholder.is_blank());
    }
}

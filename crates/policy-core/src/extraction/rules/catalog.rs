//! Rule catalog for the addon coverage categories.
//!
//! Field names are the report join keys and must stay verbatim.

use lazy_static::lazy_static;
use regex::Regex;

use crate::extraction::segment::Marker;

use super::patterns::*;
use super::{CategoryRules, FieldDefault, FieldRule, Reference, ShareScale, Target, ValueParser};

pub const AMBULANCE_COVER: &str = "Ambulance Cover";
pub const CONVALESCENCE_BENEFIT: &str = "Convalescence Benefit";
pub const CRITICAL_ILLNESS: &str = "Critical Illness";
pub const DAILY_CASH_COVER: &str = "Daily Cash Cover";
pub const HOME_NURSING_ALLOWANCE: &str = "Home Nursing Allowance";

lazy_static! {
    /// Every addon coverage category, in report order.
    pub static ref ADDON_CATALOG: Vec<CategoryRules> = vec![
        ambulance_cover(),
        convalescence_benefit(),
        critical_illness(),
        daily_cash_cover(),
        home_nursing_allowance(),
    ];
}

/// The shared addon coverage catalog.
pub fn addon_catalog() -> &'static [CategoryRules] {
    &ADDON_CATALOG
}

fn capture(pattern: &Regex, targets: &[(&'static str, ValueParser)]) -> FieldRule {
    FieldRule::Capture {
        pattern: pattern.clone(),
        targets: targets.iter().map(|&(field, parser)| Target::new(field, parser)).collect(),
    }
}

fn flag(field: &'static str, patterns: &[Regex], value: &'static str) -> FieldRule {
    FieldRule::Flag {
        field,
        patterns: patterns.to_vec(),
        value,
    }
}

fn ambulance_cover() -> CategoryRules {
    CategoryRules {
        name: AMBULANCE_COVER,
        marker: Marker::new("Endt. No. 16", AMBULANCE_MARKER.clone()),
        schema: vec![
            ("Ambulance_Sum_Insured", FieldDefault::Reference(Reference::SumInsured)),
            ("Ambulance_Number_of_Trips", FieldDefault::Integer(0)),
            ("Ambulance_Limit_Applicable_On", FieldDefault::Text("Sum Insured")),
            ("Ambulance_Limit_Amount", FieldDefault::Empty),
            ("Ambulance_Applicability", FieldDefault::Text("lower")),
            ("Ambulance_Limit_Percentage", FieldDefault::Empty),
        ],
        rules: vec![
            capture(&AMBULANCE_TRIPS, &[("Ambulance_Number_of_Trips", ValueParser::Integer)]),
            capture(&AMBULANCE_LIMIT, &[("Ambulance_Limit_Amount", ValueParser::Amount)]),
            FieldRule::Ratio {
                field: "Ambulance_Limit_Percentage",
                numerator: "Ambulance_Limit_Amount",
                reference: Reference::SumInsured,
                scale: ShareScale::Ratio,
                decimals: None,
            },
        ],
    }
}

fn convalescence_benefit() -> CategoryRules {
    CategoryRules {
        name: CONVALESCENCE_BENEFIT,
        marker: Marker::new("Endt. No. 15", CONVALESCENCE_MARKER.clone()),
        schema: vec![
            ("Convalescence_Sum_Insured", FieldDefault::Reference(Reference::SumInsured)),
            ("Convalescence_Minimum_LOS_in_days", FieldDefault::Empty),
            ("Convalescence_Applicable_From", FieldDefault::Empty),
            ("Convalescence_Benefit_Amount", FieldDefault::Empty),
        ],
        rules: vec![
            capture(
                &CONVALESCENCE_MIN_STAY,
                &[("Convalescence_Minimum_LOS_in_days", ValueParser::Integer)],
            ),
            capture(
                &CONVALESCENCE_BENEFIT_AMOUNT,
                &[("Convalescence_Benefit_Amount", ValueParser::Amount)],
            ),
        ],
    }
}

fn critical_illness() -> CategoryRules {
    CategoryRules {
        name: CRITICAL_ILLNESS,
        marker: Marker::new("Endt. No. 20", CRITICAL_ILLNESS_MARKER.clone()),
        schema: vec![
            ("Over And Above Policy Sum Insured?", FieldDefault::Text("No")),
            ("Survival Period Applicable?", FieldDefault::Text("No")),
            ("Applicable Limit", FieldDefault::Empty),
            ("Sum Insured Per Person", FieldDefault::Empty),
            ("Maximum Limit", FieldDefault::Empty),
            ("Survival Period", FieldDefault::Empty),
            ("Maximum Limit Percentage", FieldDefault::Empty),
        ],
        rules: vec![
            flag("Over And Above Policy Sum Insured?", &CI_OVER_AND_ABOVE, "Yes"),
            capture(
                &CI_SUM_INSURED_PER_PERSON,
                &[("Sum Insured Per Person", ValueParser::Amount)],
            ),
            capture(
                &CI_MAXIMUM_LIMIT,
                &[
                    ("Maximum Limit", ValueParser::Amount),
                    ("Applicable Limit", ValueParser::Prefixed("Rs. ")),
                ],
            ),
            // 0-1 ratio against the flat reference, unlike the daily cash percentage
            FieldRule::Ratio {
                field: "Maximum Limit Percentage",
                numerator: "Maximum Limit",
                reference: Reference::FlatAmount,
                scale: ShareScale::Ratio,
                decimals: Some(2),
            },
            FieldRule::Gated {
                gate: CI_SURVIVAL_GATE.clone(),
                flag: "Survival Period Applicable?",
                value: "Yes",
                detail: CI_SURVIVAL_DURATION.clone(),
                target: Target::new("Survival Period", ValueParser::Verbatim),
            },
        ],
    }
}

fn daily_cash_cover() -> CategoryRules {
    CategoryRules {
        name: DAILY_CASH_COVER,
        marker: Marker::new("Endt. No. 14", DAILY_CASH_MARKER.clone()),
        schema: vec![
            ("DailyCash_Over_And_Above_Policy_Sum_Insured", FieldDefault::Text("No")),
            ("DailyCash_Max_Days_Per_Policy_year", FieldDefault::Empty),
            ("DailyCash_Max_Days_Per_Illness", FieldDefault::Empty),
            ("DailyCash_Fixed_limit", FieldDefault::Text("No")),
            ("DailyCash_Sum_Insured", FieldDefault::Empty),
            ("DailyCash_Threshold", FieldDefault::Empty),
            ("DailyCash_Limit_Amount", FieldDefault::Empty),
            ("DailyCash_Daily_Cash_Amount", FieldDefault::Empty),
            ("DailyCash_Daily_cash_percentage", FieldDefault::Empty),
            ("DailyCash_Minimum_Hospitalization_Days", FieldDefault::Empty),
            ("DailyCash_Minimum_LOS_in_days", FieldDefault::Empty),
            ("DailyCash_Maximum_Days_Per_Person", FieldDefault::Empty),
            ("DailyCash_Waiting_Period_Days", FieldDefault::Empty),
            ("DailyCash_Maternity_Exclusion", FieldDefault::Text("No")),
            ("DailyCash_First_Days_Exclusion", FieldDefault::Empty),
            ("DailyCash_Open_range", FieldDefault::Text("No")),
            ("DailyCash_Daily_Limit_Range_From", FieldDefault::Empty),
            ("DailyCash_Daily_Limit_Range_To", FieldDefault::Empty),
        ],
        rules: vec![
            flag("DailyCash_Over_And_Above_Policy_Sum_Insured", &DC_OVER_AND_ABOVE, "Yes"),
            capture(
                &DC_MAX_DAYS_PER_POLICY,
                &[("DailyCash_Max_Days_Per_Policy_year", ValueParser::Integer)],
            ),
            capture(
                &DC_MAX_DAYS_PER_EVENT,
                &[("DailyCash_Max_Days_Per_Illness", ValueParser::Integer)],
            ),
            flag("DailyCash_Open_range", &DC_OPEN_RANGE, "Yes"),
            FieldRule::Complement {
                field: "DailyCash_Fixed_limit",
                of: "DailyCash_Open_range",
            },
            capture(&DC_SUM_INSURED, &[("DailyCash_Sum_Insured", ValueParser::Amount)]),
            // Amount phrasings, later ones win
            capture(
                &DC_AMOUNT_PER_DAY,
                &[
                    ("DailyCash_Daily_Cash_Amount", ValueParser::Amount),
                    ("DailyCash_Limit_Amount", ValueParser::Amount),
                ],
            ),
            capture(
                &DC_AMOUNT_FROM_TO_DAYS,
                &[
                    ("DailyCash_Daily_Cash_Amount", ValueParser::Amount),
                    ("DailyCash_Limit_Amount", ValueParser::Amount),
                ],
            ),
            FieldRule::Range {
                pattern: DC_AMOUNT_RANGE.clone(),
                from: "DailyCash_Daily_Limit_Range_From",
                to: "DailyCash_Daily_Limit_Range_To",
                cap: vec!["DailyCash_Daily_Cash_Amount", "DailyCash_Limit_Amount"],
            },
            // 0-100 percentage against the flat reference
            FieldRule::Ratio {
                field: "DailyCash_Daily_cash_percentage",
                numerator: "DailyCash_Daily_Cash_Amount",
                reference: Reference::FlatAmount,
                scale: ShareScale::Percent,
                decimals: Some(2),
            },
            capture(
                &DC_MORE_THAN_DAYS,
                &[
                    ("DailyCash_Threshold", ValueParser::Integer),
                    ("DailyCash_Minimum_Hospitalization_Days", ValueParser::Integer),
                    ("DailyCash_Minimum_LOS_in_days", ValueParser::Integer),
                ],
            ),
            capture(&DC_MAX_DAYS, &[("DailyCash_Maximum_Days_Per_Person", ValueParser::Integer)]),
            capture(
                &DC_FIRST_DAYS,
                &[
                    ("DailyCash_Waiting_Period_Days", ValueParser::Integer),
                    ("DailyCash_First_Days_Exclusion", ValueParser::Integer),
                ],
            ),
            flag(
                "DailyCash_Maternity_Exclusion",
                std::slice::from_ref(&*DC_MATERNITY),
                "Yes",
            ),
        ],
    }
}

fn home_nursing_allowance() -> CategoryRules {
    CategoryRules {
        name: HOME_NURSING_ALLOWANCE,
        marker: Marker::new("Endt. No. 17", HOME_NURSING_MARKER.clone()),
        schema: vec![
            ("Nursing_Applicable_On", FieldDefault::Empty),
            ("Nursing_Doctor_Nursing_Combined", FieldDefault::Text("No")),
            ("Nursing_Limit_Applicable_On", FieldDefault::Reference(Reference::SumInsured)),
            ("Nursing_Limit_Percentage", FieldDefault::Empty),
            ("Nursing_Limit_Amount", FieldDefault::Empty),
            ("Nursing_Applicability", FieldDefault::Text("Lower")),
            ("Nursing_Days_Allowed", FieldDefault::Empty),
        ],
        rules: vec![
            flag(
                "Nursing_Applicable_On",
                std::slice::from_ref(&*NURSING_POST_DISCHARGE),
                "Post Hospitalization",
            ),
            capture(&NURSING_MAX_DAYS, &[("Nursing_Days_Allowed", ValueParser::Integer)]),
            capture(&NURSING_DAILY_ALLOWANCE, &[("Nursing_Limit_Amount", ValueParser::Amount)]),
            FieldRule::Ratio {
                field: "Nursing_Limit_Percentage",
                numerator: "Nursing_Limit_Amount",
                reference: Reference::SumInsured,
                scale: ShareScale::Ratio,
                decimals: None,
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::rules::RuleContext;
    use crate::models::record::{FieldValue, Record};
    use rust_decimal::Decimal;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn category(name: &str) -> &'static CategoryRules {
        addon_catalog().iter().find(|c| c.name == name).unwrap()
    }

    fn extract(name: &str, block: &str) -> Record {
        let outcome = category(name).extract(block, &RuleContext::default());
        assert!(outcome.issues.is_empty(), "unexpected issues: {:?}", outcome.issues);
        outcome.record
    }

    fn amount(s: &str) -> FieldValue {
        FieldValue::Amount(Decimal::from_str(s).unwrap())
    }

    #[test]
    fn test_catalog_order() {
        let names: Vec<_> = addon_catalog().iter().map(|c| c.name).collect();
        assert_eq!(
            names,
            vec![
                AMBULANCE_COVER,
                CONVALESCENCE_BENEFIT,
                CRITICAL_ILLNESS,
                DAILY_CASH_COVER,
                HOME_NURSING_ALLOWANCE,
            ]
        );
    }

    #[test]
    fn test_ambulance_cover() {
        let record = extract(
            AMBULANCE_COVER,
            " Road ambulance charges up to a limit of Rs. 5,000 per hospitalization. Number of trips: 2",
        );

        assert_eq!(record.get("Ambulance_Number_of_Trips"), Some(&FieldValue::Integer(2)));
        assert_eq!(record.get("Ambulance_Limit_Amount"), Some(&amount("5000")));
        assert_eq!(record.get("Ambulance_Limit_Percentage"), Some(&amount("0.01")));
        assert_eq!(record.get("Ambulance_Sum_Insured"), Some(&amount("500000")));
        assert_eq!(record.get("Ambulance_Applicability"), Some(&FieldValue::text("lower")));
    }

    #[test]
    fn test_ambulance_defaults() {
        let record = extract(AMBULANCE_COVER, " ambulance charges are covered");

        assert_eq!(record.get("Ambulance_Number_of_Trips"), Some(&FieldValue::Integer(0)));
        assert_eq!(record.get("Ambulance_Limit_Amount"), Some(&FieldValue::Empty));
        assert_eq!(record.get("Ambulance_Limit_Percentage"), Some(&FieldValue::Empty));
        assert_eq!(
            record.get("Ambulance_Limit_Applicable_On"),
            Some(&FieldValue::text("Sum Insured"))
        );
    }

    #[test]
    fn test_convalescence_benefit() {
        let record = extract(
            CONVALESCENCE_BENEFIT,
            " If hospitalization exceeds 10 days, a lump sum benefit of Rs. 10,000 is payable.",
        );

        assert_eq!(
            record.get("Convalescence_Minimum_LOS_in_days"),
            Some(&FieldValue::Integer(10))
        );
        assert_eq!(record.get("Convalescence_Benefit_Amount"), Some(&amount("10000")));
        assert_eq!(record.get("Convalescence_Applicable_From"), Some(&FieldValue::Empty));
    }

    #[test]
    fn test_home_nursing_allowance() {
        let record = extract(
            HOME_NURSING_ALLOWANCE,
            " Following discharge, a daily allowance of Rs. 500 is payable for a maximum 30 days.",
        );

        assert_eq!(
            record.get("Nursing_Applicable_On"),
            Some(&FieldValue::text("Post Hospitalization"))
        );
        assert_eq!(record.get("Nursing_Limit_Amount"), Some(&amount("500")));
        assert_eq!(record.get("Nursing_Days_Allowed"), Some(&FieldValue::Integer(30)));
        assert_eq!(record.get("Nursing_Limit_Percentage"), Some(&amount("0.001")));
        assert_eq!(record.get("Nursing_Limit_Applicable_On"), Some(&amount("500000")));
    }

    #[test]
    fn test_critical_illness() {
        let record = extract(
            CRITICAL_ILLNESS,
            " Benefit payable over and above the\nindividual sum insured, subject to a maximum limit of Rs. 1,00,000. \
             A survival period of 30 days survival applies.",
        );

        assert_eq!(
            record.get("Over And Above Policy Sum Insured?"),
            Some(&FieldValue::text("Yes"))
        );
        assert_eq!(record.get("Maximum Limit"), Some(&amount("100000")));
        assert_eq!(record.get("Applicable Limit"), Some(&FieldValue::text("Rs. 1,00,000")));
        assert_eq!(record.get("Maximum Limit Percentage"), Some(&amount("0.2")));
        assert_eq!(record.get("Survival Period Applicable?"), Some(&FieldValue::text("Yes")));
        assert_eq!(record.get("Survival Period"), Some(&FieldValue::text("30")));
    }

    #[test]
    fn test_critical_illness_survival_flag_without_duration() {
        let record = extract(CRITICAL_ILLNESS, " A waiting period applies as per schedule.");

        assert_eq!(record.get("Survival Period Applicable?"), Some(&FieldValue::text("Yes")));
        assert_eq!(record.get("Survival Period"), Some(&FieldValue::Empty));
        assert_eq!(record.get("Maximum Limit Percentage"), Some(&FieldValue::Empty));
    }

    #[test]
    fn test_critical_illness_zero_limit_leaves_percentage_empty() {
        let record = extract(CRITICAL_ILLNESS, " maximum limit of Rs. 0");

        assert_eq!(record.get("Maximum Limit"), Some(&amount("0")));
        assert_eq!(record.get("Maximum Limit Percentage"), Some(&FieldValue::Empty));
    }

    #[test]
    fn test_daily_cash_per_day() {
        let record = extract(
            DAILY_CASH_COVER,
            " Rs. 1,000 per day for hospitalization of more than 3 days, \
             maximum days of 30 per policy period. First 2 days excluded. Maternity is excluded.",
        );

        assert_eq!(record.get("DailyCash_Daily_Cash_Amount"), Some(&amount("1000")));
        assert_eq!(record.get("DailyCash_Limit_Amount"), Some(&amount("1000")));
        assert_eq!(record.get("DailyCash_Daily_cash_percentage"), Some(&amount("0.2")));
        assert_eq!(record.get("DailyCash_Threshold"), Some(&FieldValue::Integer(3)));
        assert_eq!(
            record.get("DailyCash_Minimum_LOS_in_days"),
            Some(&FieldValue::Integer(3))
        );
        assert_eq!(
            record.get("DailyCash_Max_Days_Per_Policy_year"),
            Some(&FieldValue::Integer(30))
        );
        assert_eq!(
            record.get("DailyCash_Maximum_Days_Per_Person"),
            Some(&FieldValue::Integer(30))
        );
        assert_eq!(
            record.get("DailyCash_First_Days_Exclusion"),
            Some(&FieldValue::Integer(2))
        );
        assert_eq!(
            record.get("DailyCash_Maternity_Exclusion"),
            Some(&FieldValue::text("Yes"))
        );
    }

    #[test]
    fn test_daily_cash_range_uses_larger_bound() {
        let record = extract(
            DAILY_CASH_COVER,
            " Daily cash ranging from Rs. 2,000 - 1,500 depending on grade.",
        );

        assert_eq!(record.get("DailyCash_Daily_Limit_Range_From"), Some(&amount("2000")));
        assert_eq!(record.get("DailyCash_Daily_Limit_Range_To"), Some(&amount("1500")));
        assert_eq!(record.get("DailyCash_Daily_Cash_Amount"), Some(&amount("2000")));
        assert_eq!(record.get("DailyCash_Limit_Amount"), Some(&amount("2000")));
        assert_eq!(record.get("DailyCash_Daily_cash_percentage"), Some(&amount("0.4")));
        assert_eq!(record.get("DailyCash_Open_range"), Some(&FieldValue::text("Yes")));
        assert_eq!(record.get("DailyCash_Fixed_limit"), Some(&FieldValue::text("No")));
    }

    #[test]
    fn test_daily_cash_range_caps_from_the_parsed_bound() {
        let outcome = category(DAILY_CASH_COVER)
            .extract(" Daily cash ranging from Rs. , - 2,000", &RuleContext::default());
        let record = &outcome.record;

        assert_eq!(outcome.issues.len(), 1);
        assert_eq!(record.get("DailyCash_Daily_Limit_Range_From"), Some(&FieldValue::Empty));
        assert_eq!(record.get("DailyCash_Daily_Limit_Range_To"), Some(&amount("2000")));
        assert_eq!(record.get("DailyCash_Daily_Cash_Amount"), Some(&amount("2000")));
        assert_eq!(record.get("DailyCash_Limit_Amount"), Some(&amount("2000")));
        assert_eq!(record.get("DailyCash_Daily_cash_percentage"), Some(&amount("0.4")));
    }

    #[test]
    fn test_non_ascii_digits_are_not_captured() {
        let record = extract(
            HOME_NURSING_ALLOWANCE,
            " Following discharge, a daily allowance is payable for a maximum ३० days.",
        );

        assert_eq!(record.get("Nursing_Days_Allowed"), Some(&FieldValue::Empty));
    }

    #[test]
    fn test_daily_cash_fixed_limit_when_no_range() {
        let record = extract(DAILY_CASH_COVER, " A fixed daily benefit applies.");

        assert_eq!(record.get("DailyCash_Open_range"), Some(&FieldValue::text("No")));
        assert_eq!(record.get("DailyCash_Fixed_limit"), Some(&FieldValue::text("Yes")));
        assert_eq!(record.get("DailyCash_Daily_cash_percentage"), Some(&FieldValue::Empty));
    }

    #[test]
    fn test_every_schema_field_is_filled() {
        let context = RuleContext::default();
        for category in addon_catalog() {
            let outcome = category.extract("", &context);
            let names: Vec<_> = outcome.record.field_names().collect();
            let schema: Vec<_> = category.schema.iter().map(|(f, _)| *f).collect();
            assert_eq!(names, schema, "{}", category.name);
        }
    }
}

//! Keyword-based addon presence detection.

use tracing::debug;

use crate::models::record::{FeatureRecord, Presence};

/// An addon type and the phrases that signal it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddonSignal {
    pub name: &'static str,
    /// Lowercase substrings; any one is enough.
    pub keywords: &'static [&'static str],
}

impl AddonSignal {
    const fn new(name: &'static str, keywords: &'static [&'static str]) -> Self {
        Self { name, keywords }
    }

    /// Whether any keyword occurs in already-lowercased text.
    pub fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k))
    }
}

/// Known addon types in report order.
pub const ADDON_SIGNALS: &[AddonSignal] = &[
    AddonSignal::new("Ambulance Cover", &["ambulance", "emergency ambulance"]),
    AddonSignal::new("Anyone Illness", &["anyone illness", "any illness"]),
    AddonSignal::new("Attendant Care", &["attendant", "attendance"]),
    AddonSignal::new("Cancer Cover", &["cancer", "oncology"]),
    AddonSignal::new("Convalescence Benefit", &["convalescence", "convalescent"]),
    AddonSignal::new("Critical Illness Benefit", &["critical illness", "critical disease"]),
    AddonSignal::new(
        "Daily/Hospital Cash Benefit",
        &["daily cash", "hospital cash", "cash benefit"],
    ),
    AddonSignal::new("Dental Cover", &["dental", "dental treatment"]),
    AddonSignal::new("Diabetic Cover", &["diabetic", "diabetes"]),
    AddonSignal::new(
        "Doctor & Nurse Home Visit Cover",
        &["home visit", "doctor visit", "nurse visit"],
    ),
    AddonSignal::new("Education Fund", &["education", "education fund"]),
    AddonSignal::new("Funeral", &["funeral", "funeral expenses"]),
    AddonSignal::new("Getwell Benefit", &["getwell", "get well"]),
    AddonSignal::new("Hardship Critical Illness Cover", &["hardship critical illness cover"]),
    AddonSignal::new(
        "Health Check up",
        &["health check", "health checkup", "health screening"],
    ),
    AddonSignal::new("Hypertension Cover", &["hypertension", "high blood pressure"]),
    AddonSignal::new("Intensive Care Benefit", &["intensive care", "icu"]),
    AddonSignal::new("Loss Of Pay Cover", &["loss of pay", "loss of income"]),
    AddonSignal::new("Medical Evacuation Cover", &["medical evacuation", "evacuation"]),
    AddonSignal::new("Medical Second Opinion", &["second opinion", "medical opinion"]),
    AddonSignal::new("Non Medical Expense Cover", &["non medical", "non-medical"]),
    AddonSignal::new("Out Patient Cover", &["out patient", "outpatient", "opd"]),
    AddonSignal::new("Optical Cover", &["optical", "eye care", "vision"]),
    AddonSignal::new(
        "Organ Donor Medical Expense Cover",
        &["organ donor", "organ donation"],
    ),
    AddonSignal::new("Personal Accident Cover", &["personal accident", "accident cover"]),
    AddonSignal::new(
        "Pre Existing Disease Benefit",
        &["pre existing", "pre-existing", "existing disease"],
    ),
    AddonSignal::new(
        "Psychiatric Cover",
        &["psychiatric", "psychiatry", "mental health"],
    ),
    AddonSignal::new("Recovery Benefit", &["recovery benefit", "recovery"]),
    AddonSignal::new("Referral Hospital Care", &["referral hospital", "hospital referral"]),
    AddonSignal::new("Surgical Benefit", &["surgical benefit", "surgery"]),
    AddonSignal::new("Top Up Cover", &["top up", "topup"]),
    AddonSignal::new(
        "Vaccination/Immunization Cover",
        &["vaccination", "immunization", "vaccine"],
    ),
];

/// Flag every known addon as present or absent anywhere in `text`.
///
/// Plain substring matching: "icu" also fires inside longer words.
pub fn detect_features(text: &str) -> FeatureRecord {
    let lowered = text.to_lowercase();

    let features: FeatureRecord = ADDON_SIGNALS
        .iter()
        .map(|signal| (signal.name.to_string(), Presence::from(signal.matches(&lowered))))
        .collect();

    debug!(
        "Detected {} of {} addon types",
        features.values().filter(|p| p.is_yes()).count(),
        features.len()
    );

    features
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_count_and_unique_names() {
        assert_eq!(ADDON_SIGNALS.len(), 32);

        let mut names: Vec<_> = ADDON_SIGNALS.iter().map(|s| s.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 32);
    }

    #[test]
    fn test_keywords_are_lowercase() {
        for signal in ADDON_SIGNALS {
            for keyword in signal.keywords {
                assert_eq!(*keyword, keyword.to_lowercase(), "{}", signal.name);
            }
        }
    }

    #[test]
    fn test_cancer_cover_detected() {
        let features = detect_features("Treatment for Cancer is covered");

        assert_eq!(features["Cancer Cover"], Presence::Yes);
        assert_eq!(features["Dental Cover"], Presence::No);
    }

    #[test]
    fn test_every_addon_has_a_value() {
        let features = detect_features("");

        assert_eq!(features.len(), 32);
        assert!(features.values().all(|p| *p == Presence::No));
    }

    #[test]
    fn test_case_insensitive_alternatives() {
        let features = detect_features("OPD expenses and HOSPITAL CASH are payable");

        assert_eq!(features["Out Patient Cover"], Presence::Yes);
        assert_eq!(features["Daily/Hospital Cash Benefit"], Presence::Yes);
        assert_eq!(features["Ambulance Cover"], Presence::No);
    }

    #[test]
    fn test_order_matches_signals() {
        let features = detect_features("anything");
        let names: Vec<_> = features.keys().map(String::as_str).collect();
        let expected: Vec<_> = ADDON_SIGNALS.iter().map(|s| s.name).collect();
        assert_eq!(names, expected);
    }
}

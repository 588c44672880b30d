//! Endorsement block segmentation.

use regex::{Match, Regex};
use tracing::trace;

use super::rules::patterns::{ENDORSEMENT_ID, ENDORSEMENT_MARKER, SPECIAL_CONDITION};

/// Case-insensitive endorsement marker for one category, e.g. `Endt. No. 16`.
///
/// A match immediately followed by another digit is rejected, so the
/// marker for 16 never fires on `Endt. No. 160`.
#[derive(Debug, Clone)]
pub struct Marker {
    label: &'static str,
    pattern: Regex,
}

impl Marker {
    pub fn new(label: &'static str, pattern: Regex) -> Self {
        Self { label, pattern }
    }

    /// Human-readable form of the marker.
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// All marker occurrences in `text`, in document order.
    pub fn find_iter<'t>(&'t self, text: &'t str) -> impl Iterator<Item = Match<'t>> + 't {
        self.pattern.find_iter(text).filter(move |m| {
            !text[m.end()..]
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_digit())
        })
    }

    /// Whether the marker occurs anywhere in `text`.
    pub fn is_present(&self, text: &str) -> bool {
        self.find_iter(text).next().is_some()
    }
}

/// Span of document text belonging to one endorsement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block<'a> {
    /// Text after the marker, up to the next endorsement marker.
    pub text: &'a str,
    /// Byte offset of the span start in the document.
    pub start: usize,
    /// Byte offset of the span end in the document.
    pub end: usize,
}

/// Split `text` into the blocks introduced by `marker`.
///
/// Each block runs from the end of a marker occurrence to the start of the
/// next endorsement marker of any number, or to the end of the document.
/// Returns an empty vec when the marker never occurs.
pub fn segment<'a>(text: &'a str, marker: &Marker) -> Vec<Block<'a>> {
    marker
        .find_iter(text)
        .map(|m| {
            let start = m.end();
            let end = ENDORSEMENT_MARKER
                .find_at(text, start)
                .map(|next| next.start())
                .unwrap_or(text.len());
            trace!("{} block at {}..{}", marker.label(), start, end);
            Block {
                text: &text[start..end],
                start,
                end,
            }
        })
        .collect()
}

/// Distinct endorsement identifiers in first-seen order (e.g. `Endt. No. 14`).
pub fn scan_endorsements(text: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();

    for caps in ENDORSEMENT_ID.captures_iter(text) {
        let id = format!("Endt. No. {}", &caps[1]);
        if !found.contains(&id) {
            found.push(id);
        }
    }

    found
}

/// Distinct special condition lines in first-seen order.
///
/// Each entry is the heading plus whatever follows it on the same line,
/// with surrounding whitespace trimmed.
pub fn scan_special_conditions(text: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();

    for m in SPECIAL_CONDITION.find_iter(text) {
        let line = m.as_str().trim();
        if !found.iter().any(|f| f == line) {
            found.push(line.to_string());
        }
    }

    found
}

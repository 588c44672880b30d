//! Tabular record models produced by the extraction engine.

use std::fmt;

use indexmap::IndexMap;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::ser::{Serialize, SerializeSeq, Serializer};

/// A single extracted field value.
///
/// Absence is the empty-string sentinel, never null, so downstream
/// tables keep a uniform shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldValue {
    /// Not present / not applicable. Serialized as `""`.
    #[default]
    Empty,
    /// Verbatim or categorical text.
    Text(String),
    /// Whole number (days, trips).
    Integer(i64),
    /// Monetary amount, ratio or percentage.
    Amount(Decimal),
}

impl FieldValue {
    /// Create a text value.
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Whether this is the empty sentinel (including an empty text value).
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Numeric view of the value, if it holds a number.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Integer(n) => Some(Decimal::from(*n)),
            Self::Amount(d) => Some(*d),
            _ => None,
        }
    }

    /// Text view of the value, if it holds text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Empty => Some(""),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Text(s) => f.write_str(s),
            Self::Integer(n) => write!(f, "{}", n),
            Self::Amount(d) => write!(f, "{}", d.normalize()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            Self::Empty
        } else {
            Self::Text(s.to_string())
        }
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<Decimal> for FieldValue {
    fn from(d: Decimal) -> Self {
        Self::Amount(d)
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Empty => serializer.serialize_str(""),
            Self::Text(s) => serializer.serialize_str(s),
            Self::Integer(n) => serializer.serialize_i64(*n),
            // Via the shortest decimal text so 0.01 stays 0.01
            Self::Amount(d) => {
                let value = d
                    .normalize()
                    .to_string()
                    .parse::<f64>()
                    .ok()
                    .or_else(|| d.to_f64())
                    .unwrap_or_default();
                serializer.serialize_f64(value)
            }
        }
    }
}

/// Yes/No presence flag of the addon feature record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum Presence {
    Yes,
    No,
}

impl Presence {
    pub fn is_yes(self) -> bool {
        self == Self::Yes
    }
}

impl From<bool> for Presence {
    fn from(found: bool) -> Self {
        if found { Self::Yes } else { Self::No }
    }
}

impl fmt::Display for Presence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Yes => "Yes",
            Self::No => "No",
        })
    }
}

/// One row of a category table: field name to value, in schema order.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct Record(IndexMap<String, FieldValue>);

impl Record {
    /// Create an empty record with no fields.
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Get a field value by name.
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.0.get(field)
    }

    /// Set a field, keeping its original position when it already exists.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.0.insert(field.into(), value.into());
    }

    /// Iterate fields in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Field names in schema order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when every field holds the empty sentinel.
    pub fn is_blank(&self) -> bool {
        self.0.values().all(FieldValue::is_empty)
    }
}

impl FromIterator<(String, FieldValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Extraction outcome for one coverage category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryResult {
    /// The category marker was found; one record per endorsement block.
    Detected(Vec<Record>),
    /// The category marker was not found; the canonical blank row.
    Absent(Record),
}

impl CategoryResult {
    /// Records of this category. Never empty.
    pub fn records(&self) -> &[Record] {
        match self {
            Self::Detected(records) => records,
            Self::Absent(placeholder) => std::slice::from_ref(placeholder),
        }
    }

    pub fn is_detected(&self) -> bool {
        matches!(self, Self::Detected(_))
    }

    pub fn len(&self) -> usize {
        self.records().len()
    }
}

impl Serialize for CategoryResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let records = self.records();
        let mut seq = serializer.serialize_seq(Some(records.len()))?;
        for record in records {
            seq.serialize_element(record)?;
        }
        seq.end()
    }
}

/// Category name to category result, in catalog order.
pub type CoverageMap = IndexMap<String, CategoryResult>;

/// Addon name to presence flag, in catalog order.
pub type FeatureRecord = IndexMap<String, Presence>;

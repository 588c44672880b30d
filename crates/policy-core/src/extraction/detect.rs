//! Category presence detection.

use indexmap::IndexMap;
use tracing::debug;

use super::rules::CategoryRules;

/// Category name to marker presence, in catalog order.
pub type PresenceMap = IndexMap<String, bool>;

/// Check which categories have at least one marker in `text`.
///
/// Only the marker is checked; block content is not validated.
pub fn detect_categories(text: &str, catalog: &[CategoryRules]) -> PresenceMap {
    catalog
        .iter()
        .map(|category| {
            let present = category.marker.is_present(text);
            debug!("{} ({}): present={}", category.name, category.marker.label(), present);
            (category.name.to_string(), present)
        })
        .collect()
}

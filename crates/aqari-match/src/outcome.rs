//! Search outcome assembly and the alternatives fallback.

use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use aqari_core::defaults::ALTERNATIVES_LIMIT;
use aqari_core::{Property, SearchFilter};

use crate::matcher::strict_matches;

/// Result of a full search flow, as delivered to the presentation layer.
///
/// Exactly one of `matches` / `alternatives` is populated: alternatives are
/// only shown when the strict match list came back empty. Zero strict
/// matches is a product state, not an error.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchOutcome {
    /// Listings satisfying every active filter constraint, in snapshot
    /// order.
    pub matches: Vec<Property>,
    /// Bounded, unfiltered fallback drawn from the head of the snapshot.
    /// Empty whenever `matches` is non-empty, and for an empty snapshot.
    pub alternatives: Vec<Property>,
    /// The parser's justification for the applied constraints.
    pub explanation: String,
}

/// Bounded unfiltered prefix of the snapshot, shown when no listing
/// satisfies the filter. Length is `min(3, snapshot size)`; never fabricates
/// entries.
pub fn alternatives(properties: &[Property]) -> Vec<Property> {
    properties
        .iter()
        .take(ALTERNATIVES_LIMIT)
        .cloned()
        .collect()
}

/// Run the full matching flow against a snapshot.
///
/// Applies the filter strictly; when nothing matches, falls back to the
/// alternatives prefix so the user always sees some result set.
pub fn search(properties: &[Property], filter: &SearchFilter) -> SearchOutcome {
    let matches = strict_matches(properties, filter);

    let alternatives = if matches.is_empty() {
        let alts = alternatives(properties);
        debug!(
            subsystem = "match",
            component = "matcher",
            op = "search",
            snapshot_size = properties.len(),
            result_count = alts.len(),
            "No strict matches, falling back to alternatives"
        );
        alts
    } else {
        Vec::new()
    };

    SearchOutcome {
        matches,
        alternatives,
        explanation: filter.explanation.clone(),
    }
}

//! Strict conjunctive matching of listings against a search filter.

use tracing::debug;

use aqari_core::{Property, SearchFilter};

/// Check whether a listing satisfies every active constraint of the filter.
///
/// Absent filter fields impose no constraint, so an unconstrained filter
/// accepts every listing. This is an iff with [`strict_matches`]: a listing
/// appears in the strict match list exactly when this predicate holds.
pub fn satisfies(property: &Property, filter: &SearchFilter) -> bool {
    filter.accepts(property)
}

/// Apply the filter to a snapshot of the property collection.
///
/// Returns the listings satisfying every active constraint, in the snapshot's
/// original order. Callers keep snapshots in descending creation-time order,
/// so no re-ranking happens here.
pub fn strict_matches(properties: &[Property], filter: &SearchFilter) -> Vec<Property> {
    let matches: Vec<Property> = properties
        .iter()
        .filter(|p| satisfies(p, filter))
        .cloned()
        .collect();

    debug!(
        subsystem = "match",
        component = "matcher",
        op = "strict_matches",
        snapshot_size = properties.len(),
        result_count = matches.len(),
        "Applied filter to snapshot"
    );

    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use aqari_core::{ListingStatus, PropertyType};
    use chrono::Utc;
    use uuid::Uuid;

    fn listing(
        address: &str,
        price: f64,
        ptype: PropertyType,
        status: ListingStatus,
        bedrooms: i32,
    ) -> Property {
        Property {
            id: Uuid::new_v4(),
            address: address.to_string(),
            description: String::new(),
            price,
            property_type: ptype,
            status,
            bedrooms,
            bathrooms: 2.0,
            virtual_tour_url: None,
            images: vec![],
            location: None,
            room_analysis: None,
            created_at: Utc::now(),
        }
    }

    /// The two-listing snapshot from the reference scenarios: a high-end
    /// Amman apartment and an Abdoun villa.
    fn scenario_snapshot() -> Vec<Property> {
        vec![
            listing(
                "The Ritz-Carlton Residences, Amman, Jordan",
                1_500_000.0,
                PropertyType::Apartment,
                ListingStatus::ForSale,
                4,
            ),
            listing(
                "Luxury Villa, Abdoun, Amman",
                850_000.0,
                PropertyType::House,
                ListingStatus::ForSale,
                5,
            ),
        ]
    }

    #[test]
    fn test_unconstrained_filter_is_identity() {
        let snapshot = scenario_snapshot();
        let result = strict_matches(&snapshot, &SearchFilter::new());

        assert_eq!(result.len(), snapshot.len());
        for (got, expected) in result.iter().zip(snapshot.iter()) {
            assert_eq!(got.id, expected.id);
        }
    }

    #[test]
    fn test_identity_law_holds_for_empty_snapshot() {
        assert!(strict_matches(&[], &SearchFilter::new()).is_empty());
    }

    #[test]
    fn test_house_with_min_bedrooms_excludes_apartment() {
        let snapshot = scenario_snapshot();
        let filter = SearchFilter::new()
            .with_property_type(PropertyType::House)
            .with_min_bedrooms(4);

        let result = strict_matches(&snapshot, &filter);

        // The 4-bedroom apartment clears the bedroom bound but fails the
        // type constraint; only the 5-bedroom villa matches.
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].price, 850_000.0);
        assert_eq!(result[0].property_type, PropertyType::House);
    }

    #[test]
    fn test_area_filter_matches_single_listing() {
        let snapshot = scenario_snapshot();
        let filter = SearchFilter::new().with_area("Abdoun");

        let result = strict_matches(&snapshot, &filter);

        assert_eq!(result.len(), 1);
        assert!(result[0].address.contains("Abdoun"));
    }

    #[test]
    fn test_soundness_and_completeness() {
        let snapshot = scenario_snapshot();
        let filter = SearchFilter::new()
            .with_status(ListingStatus::ForSale)
            .with_max_price(1_000_000.0);

        let result = strict_matches(&snapshot, &filter);

        // Soundness: everything returned satisfies the filter.
        for p in &result {
            assert!(satisfies(p, &filter));
        }
        // Completeness: everything satisfying the filter is returned.
        let expected: Vec<_> = snapshot.iter().filter(|p| satisfies(p, &filter)).collect();
        assert_eq!(result.len(), expected.len());
    }

    #[test]
    fn test_matching_is_idempotent() {
        let snapshot = scenario_snapshot();
        let filter = SearchFilter::new().with_min_bedrooms(4);

        let first = strict_matches(&snapshot, &filter);
        let second = strict_matches(&snapshot, &filter);

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.id, b.id);
        }
    }

    #[test]
    fn test_order_is_preserved() {
        let mut snapshot = scenario_snapshot();
        snapshot.push(listing(
            "Dabouq Modern Loft, Amman",
            250_000.0,
            PropertyType::Apartment,
            ListingStatus::ForSale,
            3,
        ));
        let filter = SearchFilter::new().with_area("Amman");

        let result = strict_matches(&snapshot, &filter);

        let input_ids: Vec<_> = snapshot.iter().map(|p| p.id).collect();
        let result_positions: Vec<_> = result
            .iter()
            .map(|p| input_ids.iter().position(|id| *id == p.id).unwrap())
            .collect();
        let mut sorted = result_positions.clone();
        sorted.sort_unstable();
        assert_eq!(result_positions, sorted);
    }

    #[test]
    fn test_all_constraints_conjoined() {
        let snapshot = scenario_snapshot();
        let filter = SearchFilter::new()
            .with_area("Amman")
            .with_min_price(800_000.0)
            .with_max_price(2_000_000.0)
            .with_min_bedrooms(5)
            .with_property_type(PropertyType::House)
            .with_status(ListingStatus::ForSale);

        let result = strict_matches(&snapshot, &filter);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].bedrooms, 5);
    }
}

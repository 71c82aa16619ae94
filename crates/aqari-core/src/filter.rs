//! Structured search filter produced by the requirement parser.
//!
//! A [`SearchFilter`] is the normalized, matcher-ready representation of a
//! free-text housing request. Every constraint is optional; a filter with no
//! constraints matches every listing, which is the deliberate "show
//! everything" state the parser falls back to when extraction fails.
//!
//! Filter fields serialize as `null` when absent rather than being omitted:
//! clients rely on the full present-or-null field set.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::defaults::DEGRADED_EXPLANATION;
use crate::models::{ListingStatus, Property, PropertyType};

/// Structured filter over the property collection.
///
/// Produced once per search request by the requirement parser and consumed
/// once by the matcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilter {
    /// Case-insensitive substring to match against the listing address.
    #[serde(default)]
    pub area: Option<String>,

    /// Inclusive lower price bound.
    #[serde(default)]
    pub min_price: Option<f64>,

    /// Inclusive upper price bound.
    #[serde(default)]
    pub max_price: Option<f64>,

    /// Minimum bedroom count.
    #[serde(default)]
    pub min_bedrooms: Option<i32>,

    /// Exact property type.
    #[serde(default)]
    pub property_type: Option<PropertyType>,

    /// Exact listing status.
    #[serde(default)]
    pub status: Option<ListingStatus>,

    /// Human-readable justification for the chosen constraints. Always
    /// present; defaults to the degraded-mode sentence.
    #[serde(default = "default_explanation")]
    pub explanation: String,
}

fn default_explanation() -> String {
    DEGRADED_EXPLANATION.to_string()
}

impl Default for SearchFilter {
    fn default() -> Self {
        Self {
            area: None,
            min_price: None,
            max_price: None,
            min_bedrooms: None,
            property_type: None,
            status: None,
            explanation: default_explanation(),
        }
    }
}

impl SearchFilter {
    /// Create a new empty filter (matches all listings) with the default
    /// explanation.
    pub fn new() -> Self {
        Self::default()
    }

    /// The fallback filter returned when requirement extraction fails or
    /// finds nothing actionable: every constraint absent, default
    /// explanation. Guarantees the matcher always has a valid input.
    pub fn degraded() -> Self {
        Self::default()
    }

    // =========================================================================
    // BUILDER METHODS
    // =========================================================================

    /// Constrain to addresses containing the given area name.
    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        self.area = Some(area.into());
        self
    }

    /// Set the inclusive lower price bound.
    pub fn with_min_price(mut self, price: f64) -> Self {
        self.min_price = Some(price);
        self
    }

    /// Set the inclusive upper price bound.
    pub fn with_max_price(mut self, price: f64) -> Self {
        self.max_price = Some(price);
        self
    }

    /// Require at least this many bedrooms.
    pub fn with_min_bedrooms(mut self, bedrooms: i32) -> Self {
        self.min_bedrooms = Some(bedrooms);
        self
    }

    /// Require an exact property type.
    pub fn with_property_type(mut self, property_type: PropertyType) -> Self {
        self.property_type = Some(property_type);
        self
    }

    /// Require an exact listing status.
    pub fn with_status(mut self, status: ListingStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Replace the explanation.
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = explanation.into();
        self
    }

    // =========================================================================
    // CONSTRAINT CHECKS
    // =========================================================================

    /// Check if the filter imposes no constraints (matches every listing).
    pub fn is_unconstrained(&self) -> bool {
        self.area.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.min_bedrooms.is_none()
            && self.property_type.is_none()
            && self.status.is_none()
    }

    /// Number of active constraints.
    pub fn active_constraint_count(&self) -> usize {
        let mut count = 0;
        if self.area.is_some() {
            count += 1;
        }
        if self.min_price.is_some() {
            count += 1;
        }
        if self.max_price.is_some() {
            count += 1;
        }
        if self.min_bedrooms.is_some() {
            count += 1;
        }
        if self.property_type.is_some() {
            count += 1;
        }
        if self.status.is_some() {
            count += 1;
        }
        count
    }

    /// Drop constraints that fall outside the non-negative domain. Prices
    /// and bedroom counts are never negative, so a negative bound from the
    /// extraction layer carries no meaning.
    pub fn sanitized(mut self) -> Self {
        if self.min_price.is_some_and(|p| p < 0.0) {
            self.min_price = None;
        }
        if self.max_price.is_some_and(|p| p < 0.0) {
            self.max_price = None;
        }
        if self.min_bedrooms.is_some_and(|b| b < 0) {
            self.min_bedrooms = None;
        }
        self
    }

    /// Check whether a single listing satisfies every active constraint.
    ///
    /// Absent fields are vacuously true, so an unconstrained filter accepts
    /// every listing.
    pub fn accepts(&self, property: &Property) -> bool {
        if let Some(area) = &self.area {
            if !property
                .address
                .to_lowercase()
                .contains(&area.to_lowercase())
            {
                return false;
            }
        }
        if let Some(min_price) = self.min_price {
            if property.price < min_price {
                return false;
            }
        }
        if let Some(max_price) = self.max_price {
            if property.price > max_price {
                return false;
            }
        }
        if let Some(min_bedrooms) = self.min_bedrooms {
            if property.bedrooms < min_bedrooms {
                return false;
            }
        }
        if let Some(property_type) = self.property_type {
            if property.property_type != property_type {
                return false;
            }
        }
        if let Some(status) = self.status {
            if property.status != status {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn listing(address: &str, price: f64, ptype: PropertyType, bedrooms: i32) -> Property {
        Property {
            id: Uuid::new_v4(),
            address: address.to_string(),
            description: String::new(),
            price,
            property_type: ptype,
            status: ListingStatus::ForSale,
            bedrooms,
            bathrooms: 2.0,
            virtual_tour_url: None,
            images: vec![],
            location: None,
            room_analysis: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_filter_is_unconstrained() {
        let filter = SearchFilter::new();
        assert!(filter.is_unconstrained());
        assert_eq!(filter.active_constraint_count(), 0);
        assert_eq!(filter.explanation, DEGRADED_EXPLANATION);
    }

    #[test]
    fn test_degraded_filter_accepts_everything() {
        let filter = SearchFilter::degraded();
        let p = listing("Anywhere", 1.0, PropertyType::Condo, 0);
        assert!(filter.accepts(&p));
    }

    #[test]
    fn test_builder_sets_constraints() {
        let filter = SearchFilter::new()
            .with_area("Abdoun")
            .with_min_bedrooms(3)
            .with_property_type(PropertyType::House);

        assert!(!filter.is_unconstrained());
        assert_eq!(filter.active_constraint_count(), 3);
    }

    #[test]
    fn test_area_match_is_case_insensitive() {
        let filter = SearchFilter::new().with_area("abdoun");
        let hit = listing("Luxury Villa, Abdoun, Amman", 850_000.0, PropertyType::House, 5);
        let miss = listing("Dabouq Modern Loft, Amman", 250_000.0, PropertyType::Apartment, 3);

        assert!(filter.accepts(&hit));
        assert!(!filter.accepts(&miss));
    }

    #[test]
    fn test_price_bounds_are_inclusive() {
        let filter = SearchFilter::new().with_min_price(100.0).with_max_price(200.0);
        assert!(filter.accepts(&listing("a", 100.0, PropertyType::House, 1)));
        assert!(filter.accepts(&listing("a", 200.0, PropertyType::House, 1)));
        assert!(!filter.accepts(&listing("a", 99.9, PropertyType::House, 1)));
        assert!(!filter.accepts(&listing("a", 200.1, PropertyType::House, 1)));
    }

    #[test]
    fn test_type_mismatch_rejected() {
        let filter = SearchFilter::new().with_property_type(PropertyType::House);
        assert!(!filter.accepts(&listing("a", 1.0, PropertyType::Apartment, 4)));
    }

    #[test]
    fn test_sanitized_drops_negative_bounds() {
        let filter = SearchFilter {
            min_price: Some(-5.0),
            max_price: Some(-1.0),
            min_bedrooms: Some(-2),
            ..SearchFilter::new()
        }
        .sanitized();

        assert!(filter.is_unconstrained());
    }

    #[test]
    fn test_deserialize_fills_missing_explanation() {
        let filter: SearchFilter = serde_json::from_str(r#"{"area": "Abdoun"}"#).unwrap();
        assert_eq!(filter.area.as_deref(), Some("Abdoun"));
        assert_eq!(filter.explanation, DEGRADED_EXPLANATION);
    }

    #[test]
    fn test_deserialize_explicit_nulls() {
        let filter: SearchFilter = serde_json::from_str(
            r#"{
                "area": null,
                "minPrice": null,
                "maxPrice": null,
                "minBedrooms": 3,
                "propertyType": "house",
                "status": null,
                "explanation": "Family of 4 needs at least 3 bedrooms."
            }"#,
        )
        .unwrap();

        assert!(filter.area.is_none());
        assert_eq!(filter.min_bedrooms, Some(3));
        assert_eq!(filter.property_type, Some(PropertyType::House));
    }

    #[test]
    fn test_serializes_absent_fields_as_null() {
        let json = serde_json::to_value(SearchFilter::new().with_area("Amman")).unwrap();
        assert_eq!(json["area"], "Amman");
        // Present-or-null contract: unset constraints are null, not omitted.
        assert!(json["minPrice"].is_null());
        assert!(json["propertyType"].is_null());
        assert!(json["explanation"].is_string());
    }

    #[test]
    fn test_unknown_property_type_is_rejected() {
        let result = serde_json::from_str::<SearchFilter>(r#"{"propertyType": "villa"}"#);
        assert!(result.is_err());
    }
}

//! Data model for the aqari marketplace.
//!
//! Wire shapes are camelCase and shared verbatim by the web and mobile
//! clients, so field names and nullability here are a compatibility contract,
//! not an implementation detail.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

// =============================================================================
// PROPERTY
// =============================================================================

/// Kind of dwelling a listing offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    House,
    Apartment,
    Condo,
}

impl PropertyType {
    /// Returns the wire representation of the property type.
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::House => "house",
            PropertyType::Apartment => "apartment",
            PropertyType::Condo => "condo",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether a listing is offered for sale or for rent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ListingStatus {
    ForSale,
    ForRent,
}

impl ListingStatus {
    /// Returns the wire representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingStatus::ForSale => "for-sale",
            ListingStatus::ForRent => "for-rent",
        }
    }
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Geographic point as (longitude, latitude).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

/// A property listing.
///
/// Immutable once created, except for `room_analysis` which is attached when
/// the owner runs an interior analysis on an uploaded photo.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: Uuid,
    /// Free-text address. Used for display and for case-insensitive
    /// substring area matching.
    pub address: String,
    pub description: String,
    /// Asking price (sale) or monthly rent. Non-negative.
    pub price: f64,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub status: ListingStatus,
    pub bedrooms: i32,
    /// May be fractional (e.g. 2.5 baths).
    pub bathrooms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub virtual_tour_url: Option<String>,
    /// Image URLs in display order; may be empty.
    pub images: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_analysis: Option<DesignAnalysis>,
    pub created_at: DateTime<Utc>,
}

impl Property {
    /// First image in display order, if any. `images` may legitimately be
    /// empty, so callers handle the missing primary image.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

// =============================================================================
// ROOM ANALYSIS RESULTS
// =============================================================================

/// Relative furniture placement; x/z are the floor plane, y is height, with
/// the room center at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// A single furniture suggestion from the design analysis.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FurnitureSuggestion {
    pub item: String,
    /// Confidence score 0.0-1.0.
    pub confidence: f32,
    pub position: Position,
}

impl FurnitureSuggestion {
    /// Creates a suggestion with the confidence clamped into range.
    pub fn new(item: impl Into<String>, confidence: f32, position: Position) -> Self {
        Self {
            item: item.into(),
            confidence: confidence.clamp(0.0, 1.0),
            position,
        }
    }
}

/// Estimated room dimensions in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RoomDimensions {
    pub width: f32,
    pub length: f32,
    pub height: f32,
}

/// Result of a design-mode room analysis.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DesignAnalysis {
    /// Architectural style (e.g. "Modern", "Scandinavian").
    pub style: String,
    pub furniture_suggestions: Vec<FurnitureSuggestion>,
    pub room_dimensions: RoomDimensions,
}

/// Result of a structural/lighting analysis of a wide-angle or panoramic
/// apartment shot.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StructuralAnalysis {
    pub layout_analysis: String,
    pub lighting_analysis: String,
    pub structural_features: Vec<String>,
    pub safety_notes: Vec<String>,
}

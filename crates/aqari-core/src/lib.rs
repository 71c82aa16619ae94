//! # aqari-core
//!
//! Core types, traits, and abstractions for the aqari marketplace.
//!
//! This crate provides the foundational data structures and trait definitions
//! that other aqari crates depend on: the property model, the structured
//! search filter produced by the requirement parser, the room analysis result
//! shapes, the error taxonomy, and the repository/backend traits.

pub mod defaults;
pub mod error;
pub mod filter;
pub mod logging;
pub mod models;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use filter::SearchFilter;
pub use models::{
    DesignAnalysis, FurnitureSuggestion, GeoPoint, ListingStatus, Position, Property,
    PropertyType, RoomDimensions, StructuralAnalysis,
};
pub use traits::{CreatePropertyRequest, GenerationBackend, PropertyRepository};

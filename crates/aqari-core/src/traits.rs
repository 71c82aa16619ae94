//! Core traits for aqari abstractions.
//!
//! These traits define the interfaces that concrete implementations must
//! satisfy, enabling pluggable backends and testability. Components receive
//! their collaborators explicitly at construction; there are no module-level
//! client singletons.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{DesignAnalysis, GeoPoint, ListingStatus, Property, PropertyType};

// =============================================================================
// PROPERTY REPOSITORY
// =============================================================================

/// Request for creating a new property listing.
#[derive(Debug, Clone)]
pub struct CreatePropertyRequest {
    pub address: String,
    pub description: String,
    pub price: f64,
    pub property_type: PropertyType,
    pub status: ListingStatus,
    pub bedrooms: i32,
    pub bathrooms: f64,
    pub virtual_tour_url: Option<String>,
    pub images: Vec<String>,
    pub location: Option<GeoPoint>,
}

/// Repository for property listings.
#[async_trait]
pub trait PropertyRepository: Send + Sync {
    /// Insert a new listing and return the stored record.
    async fn insert(&self, req: CreatePropertyRequest) -> Result<Property>;

    /// Fetch a listing by ID. Returns `Error::PropertyNotFound` on miss.
    async fn fetch(&self, id: Uuid) -> Result<Property>;

    /// List all listings, newest first (descending creation time). The
    /// matcher consumes this snapshot as-is and preserves its order.
    async fn list(&self) -> Result<Vec<Property>>;

    /// Attach (or replace) the persisted room analysis on a listing.
    async fn attach_analysis(&self, id: Uuid, analysis: &DesignAnalysis) -> Result<()>;
}

// =============================================================================
// INFERENCE
// =============================================================================

/// Backend capable of text generation.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Generate text given a prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Generate text with system context.
    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String>;

    /// Generate with JSON output enforcement where the backend supports it.
    async fn generate_json(&self, prompt: &str) -> Result<String>;

    /// Generate JSON with system context.
    async fn generate_json_with_system(&self, system: &str, prompt: &str) -> Result<String>;

    /// Get the model name being used.
    fn model_name(&self) -> &str;
}

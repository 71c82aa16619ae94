//! # aqari-match
//!
//! Property matching engine for aqari.
//!
//! This crate provides:
//! - Strict conjunctive filtering of a listing snapshot against a
//!   [`SearchFilter`](aqari_core::SearchFilter)
//! - The bounded, unfiltered alternatives fallback shown when a search has
//!   no strict matches
//! - The `{matches, alternatives, explanation}` outcome shape consumed by
//!   the web and mobile clients
//!
//! Matching is pure and synchronous: it only reads a snapshot of the
//! property collection, so it is safe to run concurrently for any number of
//! requests without locking. Slightly stale snapshots are acceptable.
//!
//! ## Example
//!
//! ```
//! use aqari_core::{PropertyType, SearchFilter};
//! use aqari_match::search;
//!
//! let filter = SearchFilter::new()
//!     .with_property_type(PropertyType::House)
//!     .with_min_bedrooms(4);
//!
//! let outcome = search(&[], &filter);
//! assert!(outcome.matches.is_empty());
//! assert!(outcome.alternatives.is_empty());
//! ```

pub mod matcher;
pub mod outcome;

// Re-export core types
pub use aqari_core::*;

pub use matcher::{satisfies, strict_matches};
pub use outcome::{alternatives, search, SearchOutcome};

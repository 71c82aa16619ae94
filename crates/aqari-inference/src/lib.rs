//! # aqari-inference
//!
//! LLM inference plumbing for aqari.
//!
//! This crate provides:
//! - [`OllamaBackend`]: generation backend over an Ollama-compatible chat API
//! - [`RequirementParser`]: free-text housing request → [`SearchFilter`],
//!   with the documented soft fallback when the model is unavailable
//! - [`VisionBackend`] trait and Ollama implementation for image analysis
//! - [`RoomAnalyzer`]: design and structural room analysis with strict
//!   result-shape validation (hard failure, no degraded result)
//!
//! The parser and the analyzer deliberately handle failure differently: a
//! missing search filter is harmless (the matcher shows everything), while a
//! broken furniture arrangement has no harmless default. See the crate-level
//! error taxonomy in `aqari-core`.

pub mod analysis;
pub mod ollama;
pub mod requirements;
pub mod vision;

// Mock backends for deterministic tests
#[cfg(test)]
pub mod mock;

// Re-export core types
pub use aqari_core::*;

pub use analysis::RoomAnalyzer;
pub use ollama::OllamaBackend;
pub use requirements::RequirementParser;
pub use vision::{OllamaVisionBackend, VisionBackend};

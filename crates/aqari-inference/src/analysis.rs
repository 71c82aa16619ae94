//! Room analysis over a vision backend.
//!
//! Two analysis modes share one adapter: design mode suggests an interior
//! style, furniture placement, and room dimensions; structural mode reads a
//! wide-angle shot as a structural engineer and lighting expert would.
//!
//! Unlike requirement parsing there is no soft fallback here. A broken
//! furniture arrangement has no harmless default, so any backend error or
//! non-conforming model output is an [`Error::Analysis`] the caller must
//! surface as a retryable failure.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, instrument};

use aqari_core::{DesignAnalysis, Error, Result, StructuralAnalysis};

use crate::requirements::strip_code_fences;
use crate::vision::VisionBackend;

/// Generates the design-mode analysis prompt.
pub fn design_prompt(style: Option<&str>) -> String {
    let style_hint = match style {
        Some(style) => format!("The user prefers a {} style; bias suggestions toward it.\n", style),
        None => String::new(),
    };
    format!(
        r#"Analyze this room image for an interior design application.
{}Identify the architectural style (e.g., Modern, Classic, Scandinavian).
Suggest 3-5 furniture items that would fit this room, including their ideal relative position (x, y, z coordinates where x/z are floor plane, y is height) assuming the room center is 0,0,0.
Estimate the room dimensions (width, length, height) in meters.

Return ONLY a valid JSON object with this structure:
{{
    "style": "string",
    "furnitureSuggestions": [
        {{ "item": "string", "confidence": number, "position": {{ "x": number, "y": number, "z": number }} }}
    ],
    "roomDimensions": {{ "width": number, "length": number, "height": number }}
}}
"#,
        style_hint
    )
}

/// Generates the structural-mode analysis prompt.
pub fn structural_prompt() -> String {
    r#"Analyze this panoramic or wide-angle image of an apartment space as a structural engineer and lighting expert.
1. Describe the spatial layout and flow between zones (e.g., "Open concept connecting kitchen and living area").
2. Analyze the natural lighting sources and coverage.
3. Identify potential structural features (columns, beams, load-bearing walls).
4. Detect any visible safety hazards or maintenance issues.

Return ONLY a valid JSON object with this structure:
{
    "layoutAnalysis": "string",
    "lightingAnalysis": "string",
    "structuralFeatures": ["string"],
    "safetyNotes": ["string"]
}
"#
    .to_string()
}

/// Validate a design-mode model response against the exact result shape.
pub fn parse_design_response(response: &str) -> Result<DesignAnalysis> {
    let body = strip_code_fences(response);
    serde_json::from_str::<DesignAnalysis>(body)
        .map_err(|e| Error::Analysis(format!("Non-conforming design analysis: {}", e)))
}

/// Validate a structural-mode model response against the exact result shape.
pub fn parse_structural_response(response: &str) -> Result<StructuralAnalysis> {
    let body = strip_code_fences(response);
    serde_json::from_str::<StructuralAnalysis>(body)
        .map_err(|e| Error::Analysis(format!("Non-conforming structural analysis: {}", e)))
}

/// Adapter turning room images into structured analysis results.
pub struct RoomAnalyzer {
    vision: Arc<dyn VisionBackend>,
}

impl RoomAnalyzer {
    /// Create an analyzer backed by the given vision backend.
    pub fn new(vision: Arc<dyn VisionBackend>) -> Self {
        Self { vision }
    }

    /// Model name of the underlying vision backend.
    pub fn model_name(&self) -> &str {
        self.vision.model_name()
    }

    /// Suggest an interior style, furniture placement, and room dimensions
    /// for a room photo.
    #[instrument(skip(self, image, style), fields(subsystem = "inference", component = "analysis", op = "analyze_design", model = %self.vision.model_name()))]
    pub async fn analyze_design(
        &self,
        image: &[u8],
        mime_type: &str,
        style: Option<&str>,
    ) -> Result<DesignAnalysis> {
        let start = Instant::now();
        let response = self
            .vision
            .analyze_image(image, mime_type, &design_prompt(style))
            .await?;

        let analysis = parse_design_response(&response)?;
        debug!(
            duration_ms = start.elapsed().as_millis() as u64,
            result_count = analysis.furniture_suggestions.len(),
            "Design analysis complete"
        );
        Ok(analysis)
    }

    /// Read a wide-angle apartment shot for layout, lighting, structure,
    /// and visible safety issues.
    #[instrument(skip(self, image), fields(subsystem = "inference", component = "analysis", op = "analyze_structure", model = %self.vision.model_name()))]
    pub async fn analyze_structure(
        &self,
        image: &[u8],
        mime_type: &str,
    ) -> Result<StructuralAnalysis> {
        let start = Instant::now();
        let response = self
            .vision
            .analyze_image(image, mime_type, &structural_prompt())
            .await?;

        let analysis = parse_structural_response(&response)?;
        debug!(
            duration_ms = start.elapsed().as_millis() as u64,
            "Structural analysis complete"
        );
        Ok(analysis)
    }
}

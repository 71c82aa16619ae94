//! Free-text housing requirement parsing.
//!
//! Turns an unconstrained user sentence ("family of 4 villa in Abdoun") into
//! a [`SearchFilter`] via the generation backend, validating the model output
//! against the exact filter shape at the boundary.
//!
//! Failure is absorbed here, never propagated: if the backend is
//! unreachable, times out, or returns something that is not a valid filter,
//! the parser returns [`SearchFilter::degraded`] so the matcher always has a
//! valid input and the user always sees some result set.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, instrument, warn};

use aqari_core::{GenerationBackend, SearchFilter};

/// System context for requirement extraction.
const SYSTEM_PROMPT: &str =
    "You are a real estate search assistant for the Jordan market. You convert \
     free-text housing requests into strict JSON search filters and nothing else.";

/// Generates the extraction prompt for a user's housing request.
///
/// Encodes the canonical extraction rules. Household sizes other than the
/// two listed fixed points are left to model best effort; no general
/// formula is promised.
pub fn requirement_prompt(user_input: &str) -> String {
    format!(
        r#"Convert the user request into strict search filters.

REQUEST: "{}"

EXTRACTION RULES:
- "family of 4" -> minBedrooms: 3 (master + 2 bedrooms)
- "family of 5" -> minBedrooms: 4
- "villa" or "house" -> propertyType: "house"
- "apartment" -> propertyType: "apartment"
- If an area or neighborhood is mentioned (e.g. "Abdoun"), area: "Abdoun"

Return ONLY valid JSON with exactly this structure:
{{
    "area": string | null,
    "minPrice": number | null,
    "maxPrice": number | null,
    "minBedrooms": number | null,
    "propertyType": "apartment" | "house" | "condo" | null,
    "status": "for-sale" | "for-rent" | null,
    "explanation": "Briefly explain the logic (e.g. 'Since you have a family of 4, I searched for houses with at least 3 bedrooms in Abdoun.')"
}}
"#,
        user_input
    )
}

/// Strip markdown code fences some models wrap around JSON output.
pub(crate) fn strip_code_fences(response: &str) -> &str {
    let trimmed = response.trim();
    let trimmed = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix("```").unwrap_or(trimmed);
    trimmed.trim()
}

/// Validate a model response against the exact filter shape.
///
/// Returns `None` when the response is not parseable as a [`SearchFilter`]:
/// unknown enum values and non-object payloads are rejected rather than
/// passed through. Negative numeric bounds are dropped.
pub fn parse_filter_response(response: &str) -> Option<SearchFilter> {
    let body = strip_code_fences(response);
    match serde_json::from_str::<SearchFilter>(body) {
        Ok(filter) => Some(filter.sanitized()),
        Err(e) => {
            debug!(error = %e, response_len = response.len(), "Filter response rejected");
            None
        }
    }
}

/// Parses free-text housing requests into structured search filters.
pub struct RequirementParser {
    backend: Arc<dyn GenerationBackend>,
}

impl RequirementParser {
    /// Create a parser backed by the given generation backend.
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Self {
        Self { backend }
    }

    /// Parse a housing request into a [`SearchFilter`].
    ///
    /// Never fails: extraction problems degrade to the all-null filter with
    /// the default explanation. Callers must pre-filter empty input.
    #[instrument(skip(self, text), fields(subsystem = "inference", component = "requirements", op = "parse", model = %self.backend.model_name(), query = %text))]
    pub async fn parse(&self, text: &str) -> SearchFilter {
        let start = Instant::now();
        let prompt = requirement_prompt(text);

        let response = match self
            .backend
            .generate_json_with_system(SYSTEM_PROMPT, &prompt)
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, degraded = true, "Requirement extraction unavailable, using degraded filter");
                return SearchFilter::degraded();
            }
        };

        let filter = match parse_filter_response(&response) {
            Some(filter) => filter,
            None => {
                warn!(
                    response_len = response.len(),
                    degraded = true,
                    "Requirement extraction returned non-conforming output, using degraded filter"
                );
                return SearchFilter::degraded();
            }
        };

        debug!(
            duration_ms = start.elapsed().as_millis() as u64,
            result_count = filter.active_constraint_count(),
            "Requirement extraction complete"
        );
        filter
    }
}

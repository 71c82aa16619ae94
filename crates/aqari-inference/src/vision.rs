//! Vision backend trait and Ollama implementation for room image analysis.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use aqari_core::{defaults, Error, Result};

/// Backend for analyzing images with a vision-capable LLM.
#[async_trait]
pub trait VisionBackend: Send + Sync {
    /// Run a prompt against an image and return the raw model text.
    async fn analyze_image(&self, image_data: &[u8], mime_type: &str, prompt: &str)
        -> Result<String>;

    /// Check if the vision backend is available.
    async fn health_check(&self) -> Result<bool>;

    /// Get the model name being used.
    fn model_name(&self) -> &str;
}

/// Ollama-based vision backend (e.g. qwen3-vl, llava).
pub struct OllamaVisionBackend {
    base_url: String,
    model: String,
    client: reqwest::Client,
    timeout_secs: u64,
}

impl OllamaVisionBackend {
    pub fn new(base_url: String, model: String) -> Self {
        Self {
            base_url,
            model,
            client: reqwest::Client::new(),
            timeout_secs: defaults::VISION_TIMEOUT_SECS,
        }
    }

    /// Create from environment variables.
    /// Returns None if the vision model variable is not set: room analysis
    /// is then unavailable and the API surfaces 503 for analysis routes.
    pub fn from_env() -> Option<Self> {
        let model = std::env::var(defaults::ENV_VISION_MODEL).ok()?;
        if model.is_empty() {
            return None;
        }
        let base_url = std::env::var(defaults::ENV_OLLAMA_URL)
            .or_else(|_| std::env::var("OLLAMA_URL"))
            .unwrap_or_else(|_| defaults::OLLAMA_URL.to_string());
        Some(Self::new(base_url, model))
    }
}

#[derive(Serialize)]
struct VisionGenerateRequest {
    model: String,
    prompt: String,
    images: Vec<String>, // base64 encoded
    stream: bool,
}

#[derive(Deserialize)]
struct VisionGenerateResponse {
    response: String,
}

#[async_trait]
impl VisionBackend for OllamaVisionBackend {
    async fn analyze_image(
        &self,
        image_data: &[u8],
        _mime_type: &str,
        prompt: &str,
    ) -> Result<String> {
        use base64::Engine;
        let image_b64 = base64::engine::general_purpose::STANDARD.encode(image_data);

        debug!(
            subsystem = "inference",
            component = "vision",
            model = %self.model,
            prompt_len = prompt.len(),
            "Submitting image for analysis"
        );

        let request = VisionGenerateRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            images: vec![image_b64],
            stream: false,
        };

        let url = format!("{}/api/generate", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&request)
            .timeout(Duration::from_secs(self.timeout_secs))
            .send()
            .await
            .map_err(|e| Error::Analysis(format!("Vision request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Analysis(format!(
                "Vision API returned {}: {}",
                status, body
            )));
        }

        let result: VisionGenerateResponse = response
            .json()
            .await
            .map_err(|e| Error::Analysis(format!("Failed to parse vision response: {}", e)))?;

        Ok(result.response)
    }

    async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/api/tags", self.base_url);
        match self
            .client
            .get(&url)
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(resp) => Ok(resp.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

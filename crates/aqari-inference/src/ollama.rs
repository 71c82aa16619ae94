//! Ollama generation backend implementation.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

use aqari_core::{defaults, Error, GenerationBackend, Result};

/// Default Ollama endpoint.
pub const DEFAULT_OLLAMA_URL: &str = defaults::OLLAMA_URL;

/// Default generation model.
pub const DEFAULT_GEN_MODEL: &str = defaults::GEN_MODEL;

/// Timeout for generation requests (seconds).
pub const GEN_TIMEOUT_SECS: u64 = defaults::GEN_TIMEOUT_SECS;

/// Ollama generation backend.
pub struct OllamaBackend {
    client: Client,
    base_url: String,
    gen_model: String,
    gen_timeout_secs: u64,
}

impl OllamaBackend {
    /// Create a new Ollama backend with default settings.
    pub fn new() -> Self {
        Self::with_config(DEFAULT_OLLAMA_URL.to_string(), DEFAULT_GEN_MODEL.to_string())
    }

    /// Create a new Ollama backend with custom configuration.
    pub fn with_config(base_url: String, gen_model: String) -> Self {
        let gen_timeout = std::env::var("AQARI_GEN_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(GEN_TIMEOUT_SECS);

        let client = Client::builder()
            .timeout(Duration::from_secs(gen_timeout))
            .build()
            .expect("Failed to create HTTP client");

        info!(
            "Initializing Ollama backend: url={}, gen={}",
            base_url, gen_model
        );

        Self {
            client,
            base_url,
            gen_model,
            gen_timeout_secs: gen_timeout,
        }
    }

    /// Create from environment variables.
    pub fn from_env() -> Self {
        let base_url = std::env::var(defaults::ENV_OLLAMA_URL)
            .or_else(|_| std::env::var("OLLAMA_URL"))
            .unwrap_or_else(|_| DEFAULT_OLLAMA_URL.to_string());
        let gen_model = std::env::var(defaults::ENV_GEN_MODEL)
            .unwrap_or_else(|_| DEFAULT_GEN_MODEL.to_string());

        Self::with_config(base_url, gen_model)
    }

    async fn generate_internal(
        &self,
        system: &str,
        prompt: &str,
        format: Option<serde_json::Value>,
    ) -> Result<String> {
        let start = Instant::now();

        debug!(
            json_format = format.is_some(),
            "Starting generation via chat API"
        );

        let mut messages = Vec::new();
        if !system.is_empty() {
            messages.push(ChatMessage {
                role: "system".to_string(),
                content: system.to_string(),
            });
        }
        messages.push(ChatMessage {
            role: "user".to_string(),
            content: prompt.to_string(),
        });

        let request = ChatRequest {
            model: self.gen_model.clone(),
            messages,
            stream: false,
            format,
        };

        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .timeout(Duration::from_secs(self.gen_timeout_secs))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Inference(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Inference(format!(
                "Ollama returned {}: {}",
                status, body
            )));
        }

        let result: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::Inference(format!("Failed to parse response: {}", e)))?;

        let content = result.message.content;
        let elapsed = start.elapsed().as_millis() as u64;
        debug!(
            response_len = content.len(),
            duration_ms = elapsed,
            "Generation complete"
        );
        if elapsed > 30000 {
            warn!(
                duration_ms = elapsed,
                prompt_len = prompt.len(),
                slow = true,
                "Slow generation operation"
            );
        }
        Ok(content)
    }

    /// Check if the backend is available and responding.
    pub async fn health_check(&self) -> Result<bool> {
        let response = self
            .client
            .get(format!("{}/api/tags", self.base_url))
            .timeout(Duration::from_secs(5))
            .send()
            .await;
        match response {
            Ok(resp) => Ok(resp.status().is_success()),
            Err(_) => Ok(false),
        }
    }
}

impl Default for OllamaBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Chat API message for `/api/chat`.
#[derive(Serialize, Deserialize, Clone)]
struct ChatMessage {
    role: String,
    content: String,
}

/// Request payload for the Ollama `/api/chat` endpoint.
#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
    /// Ollama format enforcement. Set to `"json"` for guaranteed valid JSON
    /// output.
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<serde_json::Value>,
}

/// Response from the Ollama `/api/chat` endpoint.
#[derive(Deserialize)]
struct ChatResponse {
    message: ChatMessage,
}

#[async_trait]
impl GenerationBackend for OllamaBackend {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.generate_with_system("", prompt).await
    }

    #[instrument(skip(self, system, prompt), fields(subsystem = "inference", component = "ollama", op = "generate", model = %self.gen_model, prompt_len = prompt.len()))]
    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String> {
        self.generate_internal(system, prompt, None).await
    }

    async fn generate_json(&self, prompt: &str) -> Result<String> {
        self.generate_json_with_system("", prompt).await
    }

    #[instrument(skip(self, system, prompt), fields(subsystem = "inference", component = "ollama", op = "generate_json", model = %self.gen_model, prompt_len = prompt.len()))]
    async fn generate_json_with_system(&self, system: &str, prompt: &str) -> Result<String> {
        self.generate_internal(system, prompt, Some(serde_json::json!("json")))
            .await
    }

    fn model_name(&self) -> &str {
        &self.gen_model
    }
}

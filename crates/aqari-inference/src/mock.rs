//! Mock inference backends for deterministic testing.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use aqari_core::{Error, GenerationBackend, Result};

use crate::vision::VisionBackend;

/// Mock generation backend returning a fixed response (or a fixed failure).
#[derive(Clone)]
pub struct MockGenerationBackend {
    response: String,
    fail: bool,
    call_log: Arc<Mutex<Vec<String>>>,
}

impl MockGenerationBackend {
    pub fn new() -> Self {
        Self {
            response: "{}".to_string(),
            fail: false,
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set the response returned for every generation request.
    pub fn with_fixed_response(mut self, response: impl Into<String>) -> Self {
        self.response = response.into();
        self
    }

    /// Make every generation request fail, as an unreachable backend would.
    pub fn always_failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Prompts received so far.
    pub fn calls(&self) -> Vec<String> {
        self.call_log.lock().unwrap().clone()
    }

    fn record(&self, prompt: &str) -> Result<String> {
        self.call_log.lock().unwrap().push(prompt.to_string());
        if self.fail {
            return Err(Error::Inference("mock backend unreachable".to_string()));
        }
        Ok(self.response.clone())
    }
}

impl Default for MockGenerationBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerationBackend for MockGenerationBackend {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.record(prompt)
    }

    async fn generate_with_system(&self, _system: &str, prompt: &str) -> Result<String> {
        self.record(prompt)
    }

    async fn generate_json(&self, prompt: &str) -> Result<String> {
        self.record(prompt)
    }

    async fn generate_json_with_system(&self, _system: &str, prompt: &str) -> Result<String> {
        self.record(prompt)
    }

    fn model_name(&self) -> &str {
        "mock-gen"
    }
}

/// Mock vision backend returning a fixed response (or a fixed failure).
#[derive(Clone)]
pub struct MockVisionBackend {
    response: String,
    fail: bool,
}

impl MockVisionBackend {
    pub fn new() -> Self {
        Self {
            response: "{}".to_string(),
            fail: false,
        }
    }

    pub fn with_fixed_response(mut self, response: impl Into<String>) -> Self {
        self.response = response.into();
        self
    }

    pub fn always_failing(mut self) -> Self {
        self.fail = true;
        self
    }
}

impl Default for MockVisionBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VisionBackend for MockVisionBackend {
    async fn analyze_image(
        &self,
        _image_data: &[u8],
        _mime_type: &str,
        _prompt: &str,
    ) -> Result<String> {
        if self.fail {
            return Err(Error::Analysis("mock vision backend unreachable".to_string()));
        }
        Ok(self.response.clone())
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(!self.fail)
    }

    fn model_name(&self) -> &str {
        "mock-vision"
    }
}

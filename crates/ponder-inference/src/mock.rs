//! Mock chat backend for deterministic testing.
//!
//! Responses are selected by substring match on the prompt, with a
//! configurable default, simulated latency, and failure injection.
//!
//! ## Usage
//!
//! ```rust
//! use ponder_inference::mock::MockChatBackend;
//!
//! let backend = MockChatBackend::new()
//!     .with_response_containing("Categories:", r#"{"category": "Pets", "keywords": []}"#)
//!     .with_default_response("A short answer.");
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use ponder_core::{ChatBackend, Error, Result};

#[derive(Debug, Clone)]
struct MockConfig {
    /// (needle, response) pairs checked in order against the prompt.
    responses: Vec<(String, String)>,
    default_response: String,
    latency_ms: u64,
    failure_rate: f64,
    fail_all: bool,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            responses: Vec::new(),
            default_response: "Mock response".to_string(),
            latency_ms: 0,
            failure_rate: 0.0,
            fail_all: false,
        }
    }
}

/// One recorded call for assertion.
#[derive(Debug, Clone)]
pub struct MockCall {
    pub operation: String,
    pub prompt: String,
}

/// Mock chat backend for testing.
#[derive(Clone)]
pub struct MockChatBackend {
    config: Arc<MockConfig>,
    call_log: Arc<Mutex<Vec<MockCall>>>,
}

impl MockChatBackend {
    /// Create a new mock backend with default configuration.
    pub fn new() -> Self {
        Self {
            config: Arc::new(MockConfig::default()),
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set the response returned when no mapping matches.
    pub fn with_default_response(mut self, response: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).default_response = response.into();
        self
    }

    /// Return `response` whenever the prompt contains `needle`. Mappings are
    /// checked in registration order.
    pub fn with_response_containing(
        mut self,
        needle: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        Arc::make_mut(&mut self.config)
            .responses
            .push((needle.into(), response.into()));
        self
    }

    /// Set simulated latency for all operations.
    pub fn with_latency_ms(mut self, latency_ms: u64) -> Self {
        Arc::make_mut(&mut self.config).latency_ms = latency_ms;
        self
    }

    /// Set failure rate (0.0 - 1.0) for testing error handling.
    pub fn with_failure_rate(mut self, rate: f64) -> Self {
        Arc::make_mut(&mut self.config).failure_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Make every call fail.
    pub fn failing(mut self) -> Self {
        Arc::make_mut(&mut self.config).fail_all = true;
        self
    }

    /// Get all logged calls for assertion.
    pub fn calls(&self) -> Vec<MockCall> {
        self.call_log.lock().unwrap().clone()
    }

    /// Number of calls made so far.
    pub fn call_count(&self) -> usize {
        self.call_log.lock().unwrap().len()
    }

    /// Clear the call log.
    pub fn clear_calls(&self) {
        self.call_log.lock().unwrap().clear()
    }

    async fn respond(&self, operation: &str, prompt: &str) -> Result<String> {
        self.call_log.lock().unwrap().push(MockCall {
            operation: operation.to_string(),
            prompt: prompt.to_string(),
        });

        if self.config.latency_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(self.config.latency_ms)).await;
        }

        if self.config.fail_all {
            return Err(Error::Request("mock backend failure".to_string()));
        }
        if self.config.failure_rate > 0.0 && rand::random::<f64>() < self.config.failure_rate {
            return Err(Error::Request("mock backend random failure".to_string()));
        }

        for (needle, response) in &self.config.responses {
            if prompt.contains(needle.as_str()) {
                return Ok(response.clone());
            }
        }
        Ok(self.config.default_response.clone())
    }
}

impl Default for MockChatBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatBackend for MockChatBackend {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.respond("generate", prompt).await
    }

    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String> {
        let combined = format!("{system}\n{prompt}");
        self.respond("generate_with_system", &combined).await
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}

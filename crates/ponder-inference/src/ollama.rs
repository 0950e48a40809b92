//! Ollama chat backend implementation.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use ponder_core::{defaults, ChatBackend, Error, Result};

/// Default Ollama endpoint.
pub const DEFAULT_OLLAMA_URL: &str = defaults::OLLAMA_URL;

/// Default generation model.
pub const DEFAULT_GEN_MODEL: &str = defaults::GEN_MODEL;

/// Ollama chat backend.
pub struct OllamaBackend {
    client: Client,
    base_url: String,
    gen_model: String,
    timeout_secs: u64,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaBackend {
    /// Create a new Ollama backend with default settings.
    pub fn new() -> Result<Self> {
        Self::with_config(
            DEFAULT_OLLAMA_URL.to_string(),
            DEFAULT_GEN_MODEL.to_string(),
        )
    }

    /// Create a new Ollama backend with custom configuration.
    pub fn with_config(base_url: String, gen_model: String) -> Result<Self> {
        let timeout_secs = std::env::var("PONDER_CHAT_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults::CHAT_TIMEOUT_SECS);

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            url = %base_url,
            model = %gen_model,
            timeout_secs,
            "Initializing Ollama backend"
        );

        Ok(Self {
            client,
            base_url,
            gen_model,
            timeout_secs,
        })
    }

    /// Create from environment variables.
    ///
    /// Reads `PONDER_OLLAMA_URL` (falls back to `OLLAMA_BASE`) and
    /// `PONDER_GEN_MODEL`.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("PONDER_OLLAMA_URL")
            .or_else(|_| std::env::var("OLLAMA_BASE"))
            .unwrap_or_else(|_| DEFAULT_OLLAMA_URL.to_string());
        let gen_model =
            std::env::var("PONDER_GEN_MODEL").unwrap_or_else(|_| DEFAULT_GEN_MODEL.to_string());

        Self::with_config(base_url, gen_model)
    }

    /// Request timeout in seconds.
    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    async fn generate_internal(&self, system: Option<&str>, prompt: &str) -> Result<String> {
        let url = format!("{}/api/generate", self.base_url);
        let request = GenerateRequest {
            model: &self.gen_model,
            prompt,
            system,
            stream: false,
        };

        let start = Instant::now();
        let response = self.client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(
                model = %self.gen_model,
                status = %status,
                "Ollama generation request rejected"
            );
            return Err(Error::Request(format!(
                "Ollama returned {}: {}",
                status, body
            )));
        }

        let parsed: GenerateResponse = response.json().await?;

        debug!(
            model = %self.gen_model,
            prompt_len = prompt.len(),
            response_len = parsed.response.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Ollama generation complete"
        );

        Ok(parsed.response)
    }
}

#[async_trait]
impl ChatBackend for OllamaBackend {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.generate_internal(None, prompt).await
    }

    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String> {
        self.generate_internal(Some(system), prompt).await
    }

    fn model_name(&self) -> &str {
        &self.gen_model
    }
}

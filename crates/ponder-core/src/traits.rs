//! Core traits for ponder abstractions.
//!
//! These traits define the capability seams between the retrieval core and
//! its out-of-scope collaborators (the word-vector table and the external
//! language model), enabling pluggable backends and testability.

use async_trait::async_trait;

use crate::error::Result;

/// Source of pretrained per-token dense word vectors.
///
/// Backed by a fixed vocabulary table loaded once per process. Lookups must
/// be cheap and synchronous once the table is resident.
pub trait WordVectorSource: Send + Sync {
    /// Look up the vector for a token, or `None` if the token is not in the
    /// vocabulary.
    fn lookup(&self, token: &str) -> Option<&[f32]>;

    /// Dimensionality of every vector in this source.
    fn dimension(&self) -> usize;
}

/// Backend for text generation (the external language-model collaborator).
///
/// Treated as untrusted and fallible: no guaranteed latency bound, and any
/// call may fail. Callers own the degradation policy.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Generate text given a prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Generate text with system context.
    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String>;

    /// Get the model name being used.
    fn model_name(&self) -> &str;
}

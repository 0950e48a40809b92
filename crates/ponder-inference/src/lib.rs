//! # ponder-inference
//!
//! Language-model collaborator for the ponder retrieval core.
//!
//! This crate provides:
//! - An HTTP chat backend for a local Ollama endpoint
//! - Category routing: query → best active category + keyword terms
//! - Answer synthesis: query + top notes → one-sentence answer
//! - A deterministic mock backend for tests (feature `mock`)
//!
//! The language model is treated as an untrusted, asynchronous, fallible
//! dependency. Every call carries a single bounded timeout and no retry;
//! callers degrade on failure rather than surfacing a hard error.

pub mod ollama;
pub mod router;
pub mod synthesizer;

// Mock chat backend for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export core types
pub use ponder_core::*;

pub use ollama::OllamaBackend;
pub use router::{CategoryMatch, CategoryRouter};
pub use synthesizer::AnswerSynthesizer;

#[cfg(any(test, feature = "mock"))]
pub use mock::MockChatBackend;

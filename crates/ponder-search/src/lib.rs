//! # ponder-search
//!
//! Retrieval pipeline for ponder.
//!
//! This crate provides:
//! - Token-vector averaging embeddings over a load-once word-vector table
//! - Cosine-similarity ranking with stable tie-breaking
//! - Keyword relevance filtering and a lexical search fallback
//! - Three interchangeable search strategies (lexical, model-routed, embedding)
//! - The search orchestrator: one end-to-end query-to-answer pipeline with
//!   stale-result suppression and catch-and-default degradation
//! - Input debouncing for keystroke-driven callers
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use ponder_search::{SearchOrchestrator, WordVectorTable};
//! use ponder_inference::OllamaBackend;
//!
//! let table = Arc::new(WordVectorTable::load("glove.6B.50d.txt")?);
//! let chat = Arc::new(OllamaBackend::from_env()?);
//! let orchestrator = SearchOrchestrator::new(table, chat);
//!
//! let result = orchestrator.search("which animal is best", &snapshot).await?;
//! println!("{}", result.answer);
//! ```

pub mod debounce;
pub mod embed;
pub mod orchestrator;
pub mod rank;
pub mod relevance;
pub mod strategy;

// Re-export core types
pub use ponder_core::*;

pub use debounce::Debouncer;
pub use embed::{embed_text, embed_tokens, refresh_embedding, WordVectorTable};
pub use orchestrator::{SearchConfig, SearchOrchestrator, SearchPhase};
pub use rank::{cosine_similarity, rank};
pub use relevance::{filter_by_keywords, lexical_search};
pub use strategy::SearchStrategy;

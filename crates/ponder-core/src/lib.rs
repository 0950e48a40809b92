//! # ponder-core
//!
//! Core types, traits, and abstractions for the ponder retrieval core.
//!
//! This crate provides the foundational data structures and trait definitions
//! that the ponder search and inference crates depend on.

pub mod defaults;
pub mod emotion;
pub mod error;
pub mod logging;
pub mod models;
pub mod normalize;
pub mod traits;

// Re-export commonly used types at crate root
pub use emotion::{infer_emotion, Emotion};
pub use error::{Error, Result};
pub use models::*;
pub use normalize::{normalize, normalize_unique, word_frequencies};
pub use traits::*;

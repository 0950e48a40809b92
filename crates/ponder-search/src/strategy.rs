//! Search strategy selection.
//!
//! The source system grew three coexisting search paths with ad hoc merge
//! logic between them. Here they are explicit, interchangeable variants:
//! exactly one strategy decides which candidate pool feeds answer synthesis.

use serde::{Deserialize, Serialize};

/// Which candidate pool feeds the final synthesis step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    /// Whole-word token matching, no model involvement.
    Lexical,
    /// Category routing + keyword filtering via the language model, merged
    /// with the similarity ranking.
    ModelRouted,
    /// Pure similarity ranking over note embeddings (default).
    #[default]
    Embedding,
}

impl std::fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lexical => write!(f, "lexical"),
            Self::ModelRouted => write!(f, "model_routed"),
            Self::Embedding => write!(f, "embedding"),
        }
    }
}

impl std::str::FromStr for SearchStrategy {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lexical" => Ok(Self::Lexical),
            "model_routed" => Ok(Self::ModelRouted),
            "embedding" => Ok(Self::Embedding),
            _ => Err(format!("Invalid search strategy: {}", s)),
        }
    }
}

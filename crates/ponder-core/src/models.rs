//! Data model for the ponder retrieval core.
//!
//! Notes and categories are owned by the surrounding application; this core
//! only reads snapshots of them and computes derived values. The single
//! permitted write-back is a note's cached `embedding` field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One user-authored thought.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    /// Opaque unique identifier, assigned at creation.
    pub id: Uuid,
    /// User-editable UTF-8 text.
    pub content: String,
    /// Creation timestamp, immutable.
    pub created_at: DateTime<Utc>,
    /// Back-reference to the owning category, if any.
    pub category_id: Option<Uuid>,
    /// Cached embedding vector. Either empty (unrankable) or exactly the
    /// dimension of the word-vector model in use. Recomputed whenever
    /// `content` changes.
    #[serde(default)]
    pub embedding: Vec<f32>,
}

impl Note {
    /// Create a new note with a fresh id and timestamp.
    pub fn new(content: impl Into<String>, category_id: Option<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            created_at: Utc::now(),
            category_id,
            embedding: Vec::new(),
        }
    }

    /// Whether this note has a usable cached embedding.
    pub fn has_embedding(&self) -> bool {
        !self.embedding.is_empty()
    }
}

/// A user-defined label grouping notes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    /// Display string, used as the matching key by category routing.
    pub name: String,
    /// Inactive (archived) categories are excluded from routing.
    pub is_active: bool,
}

impl Category {
    /// Create a new active category.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            is_active: true,
        }
    }
}

/// Read-only view of all notes and categories handed to a single search.
///
/// The snapshot is treated as immutable for the duration of a pipeline run;
/// concurrent external mutation is tolerated (a stale read is acceptable).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NoteSnapshot {
    pub notes: Vec<Note>,
    pub categories: Vec<Category>,
}

impl NoteSnapshot {
    /// Create a snapshot from notes and categories.
    pub fn new(notes: Vec<Note>, categories: Vec<Category>) -> Self {
        Self { notes, categories }
    }

    /// Look up a note by id.
    pub fn note(&self, id: Uuid) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    /// Trimmed names of active categories, empty names skipped.
    pub fn active_category_names(&self) -> Vec<String> {
        self.categories
            .iter()
            .filter(|c| c.is_active)
            .map(|c| c.name.trim().to_string())
            .filter(|n| !n.is_empty())
            .collect()
    }

    /// All notes that carry a non-empty cached embedding, as (id, vector)
    /// ranking candidates in snapshot order.
    pub fn embedded_notes(&self) -> Vec<(Uuid, &[f32])> {
        self.notes
            .iter()
            .filter(|n| n.has_embedding())
            .map(|n| (n.id, n.embedding.as_slice()))
            .collect()
    }

    /// Notes belonging to the named category (trimmed, case-insensitive
    /// name match), in snapshot order.
    pub fn notes_in_category(&self, name: &str) -> Vec<&Note> {
        let needle = name.trim().to_lowercase();
        let category_ids: Vec<Uuid> = self
            .categories
            .iter()
            .filter(|c| c.name.trim().to_lowercase() == needle)
            .map(|c| c.id)
            .collect();

        self.notes
            .iter()
            .filter(|n| n.category_id.map(|id| category_ids.contains(&id)).unwrap_or(false))
            .collect()
    }
}

/// One ranked search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityHit {
    pub note_id: Uuid,
    /// Cosine similarity against the query vector.
    pub score: f32,
}

/// Structured result of routing a query to a category and keyword set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoutedQuery {
    /// Best matching active category name, if the model produced one.
    pub category: Option<String>,
    /// Single-word keyword terms extracted from the query.
    pub keywords: Vec<String>,
}

impl RoutedQuery {
    /// Routing result carrying no signal (routing skipped or failed).
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.keywords.is_empty()
    }
}

/// Transient output of one orchestrated search. Never persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryResult {
    /// Note ids ordered highest similarity first.
    pub ranked_candidates: Vec<Uuid>,
    /// Synthesized natural-language answer. Empty when synthesis failed or
    /// no candidates existed.
    pub answer: String,
}

impl QueryResult {
    pub fn is_empty(&self) -> bool {
        self.ranked_candidates.is_empty() && self.answer.is_empty()
    }
}

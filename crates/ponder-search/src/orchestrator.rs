//! The end-to-end query-to-answer pipeline.
//!
//! One orchestrator instance owns the fallback policy for every stage:
//! external-collaborator failures are caught at their own stage and converted
//! to a degraded-but-valid result, so no error other than `InvalidQuery`
//! crosses the `search` boundary. Stale results from superseded queries are
//! suppressed via a monotonically increasing generation counter.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use tracing::{debug, info, warn};
use uuid::Uuid;

use ponder_core::{
    defaults, normalize, ChatBackend, Error, NoteSnapshot, QueryResult, Result, RoutedQuery,
    SimilarityHit, WordVectorSource,
};
use ponder_inference::{AnswerSynthesizer, CategoryMatch, CategoryRouter};

use crate::embed::{embed_text, embed_tokens};
use crate::rank::rank;
use crate::relevance::{filter_by_keywords, lexical_search};
use crate::strategy::SearchStrategy;

/// Pipeline phase, in logical order. Routing may overlap ranking in wall
/// time; the phase field reflects the most recently entered stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    Embedding,
    Ranking,
    Routing,
    Filtering,
    Synthesizing,
    /// A collaborator failed; the pipeline continues on the surviving path.
    Failed,
    Done,
}

impl std::fmt::Display for SearchPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Embedding => write!(f, "embedding"),
            Self::Ranking => write!(f, "ranking"),
            Self::Routing => write!(f, "routing"),
            Self::Filtering => write!(f, "filtering"),
            Self::Synthesizing => write!(f, "synthesizing"),
            Self::Failed => write!(f, "failed"),
            Self::Done => write!(f, "done"),
        }
    }
}

/// Configuration for the search pipeline.
#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    /// Number of top similarity candidates kept for synthesis.
    pub top_k: usize,
    /// Which candidate pool feeds synthesis.
    pub strategy: SearchStrategy,
    /// Matching policy for routed category names.
    pub category_match: CategoryMatch,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            top_k: defaults::TOP_K,
            strategy: SearchStrategy::default(),
            category_match: CategoryMatch::default(),
        }
    }
}

impl SearchConfig {
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_category_match(mut self, matching: CategoryMatch) -> Self {
        self.category_match = matching;
        self
    }
}

/// Sequences normalization, embedding, ranking, routing, filtering, and
/// synthesis into one best-effort search.
pub struct SearchOrchestrator {
    word_vectors: Arc<dyn WordVectorSource>,
    router: CategoryRouter,
    synthesizer: AnswerSynthesizer,
    config: SearchConfig,
    generation: AtomicU64,
    phase: Mutex<SearchPhase>,
}

impl SearchOrchestrator {
    /// Create an orchestrator with the default configuration.
    pub fn new(word_vectors: Arc<dyn WordVectorSource>, chat: Arc<dyn ChatBackend>) -> Self {
        Self::with_config(word_vectors, chat, SearchConfig::default())
    }

    /// Create an orchestrator with a custom configuration.
    pub fn with_config(
        word_vectors: Arc<dyn WordVectorSource>,
        chat: Arc<dyn ChatBackend>,
        config: SearchConfig,
    ) -> Self {
        Self {
            word_vectors,
            router: CategoryRouter::new(chat.clone()).with_matching(config.category_match),
            synthesizer: AnswerSynthesizer::new(chat),
            config,
            generation: AtomicU64::new(0),
            phase: Mutex::new(SearchPhase::Idle),
        }
    }

    /// The most recently entered pipeline phase.
    pub fn phase(&self) -> SearchPhase {
        *self.phase.lock().unwrap()
    }

    fn set_phase(&self, phase: SearchPhase) {
        debug!(phase = %phase, "Pipeline phase transition");
        *self.phase.lock().unwrap() = phase;
    }

    /// Start a new query generation, superseding any in-flight pipeline.
    pub fn begin_query(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether `generation` is still the latest issued query.
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Run one search for the given query against a snapshot.
    ///
    /// The only error this returns is [`Error::InvalidQuery`] for an empty
    /// or whitespace-only query; collaborator failures degrade to a partial
    /// result instead.
    pub async fn search(&self, query: &str, snapshot: &NoteSnapshot) -> Result<QueryResult> {
        self.run_pipeline(query, snapshot).await
    }

    /// Run one search under the generation counter, discarding the result
    /// if a newer query was issued while this one was in flight.
    ///
    /// Returns `Ok(None)` for a superseded (stale) result; callers must not
    /// commit it.
    pub async fn search_latest(
        &self,
        query: &str,
        snapshot: &NoteSnapshot,
    ) -> Result<Option<QueryResult>> {
        let generation = self.begin_query();
        let result = self.run_pipeline(query, snapshot).await?;
        if self.is_current(generation) {
            Ok(Some(result))
        } else {
            debug!(
                generation,
                current = self.generation.load(Ordering::SeqCst),
                "Discarding stale search result"
            );
            Ok(None)
        }
    }

    /// Embed arbitrary text with this orchestrator's word-vector source.
    ///
    /// Exposed for callers that recompute a note's cached embedding after an
    /// edit.
    pub fn embed(&self, text: &str) -> Vec<f32> {
        embed_text(self.word_vectors.as_ref(), text)
    }

    /// Rank notes similar to an existing note, excluding the note itself.
    ///
    /// Returns an empty ranking when the note is unknown or has no cached
    /// embedding.
    pub fn find_similar(
        &self,
        note_id: Uuid,
        snapshot: &NoteSnapshot,
        limit: usize,
    ) -> Vec<SimilarityHit> {
        let Some(note) = snapshot.note(note_id) else {
            return Vec::new();
        };
        if !note.has_embedding() {
            return Vec::new();
        }

        let candidates: Vec<(Uuid, &[f32])> = snapshot
            .embedded_notes()
            .into_iter()
            .filter(|(id, _)| *id != note_id)
            .collect();
        rank(&note.embedding, &candidates, limit)
    }

    async fn run_pipeline(&self, query: &str, snapshot: &NoteSnapshot) -> Result<QueryResult> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            // Short-circuit before any work; not an operational error.
            debug!("Rejecting empty query");
            self.set_phase(SearchPhase::Idle);
            return Err(Error::InvalidQuery(
                "empty or whitespace-only query".to_string(),
            ));
        }

        let start = Instant::now();
        let mut degraded = false;

        self.set_phase(SearchPhase::Embedding);
        let tokens = normalize(trimmed);
        let query_vec = embed_tokens(self.word_vectors.as_ref(), &tokens);
        if query_vec.is_empty() {
            debug!(
                token_count = tokens.len(),
                "Query embedding is empty; similarity ranking will treat all notes as unrankable"
            );
        }

        let pool: Vec<Uuid> = match self.config.strategy {
            SearchStrategy::Embedding => {
                self.set_phase(SearchPhase::Ranking);
                let hits = rank(&query_vec, &snapshot.embedded_notes(), self.config.top_k);
                hits.into_iter().map(|h| h.note_id).collect()
            }
            SearchStrategy::Lexical => {
                self.set_phase(SearchPhase::Ranking);
                lexical_search(&snapshot.notes, trimmed)
                    .into_iter()
                    .map(|n| n.id)
                    .collect()
            }
            SearchStrategy::ModelRouted => {
                self.set_phase(SearchPhase::Ranking);
                let rank_fut = async { rank(&query_vec, &snapshot.embedded_notes(), self.config.top_k) };

                self.set_phase(SearchPhase::Routing);
                let names = snapshot.active_category_names();
                let route_fut = self.router.route(trimmed, &names);

                // The similarity and routing paths are independent reads of
                // the same immutable snapshot.
                let (hits, route_result) = tokio::join!(rank_fut, route_fut);

                let routed = match route_result {
                    Ok(routed) => routed,
                    Err(e) => {
                        warn!(
                            error = %e,
                            "Category routing failed, continuing on similarity ranking alone"
                        );
                        self.set_phase(SearchPhase::Failed);
                        degraded = true;
                        RoutedQuery::empty()
                    }
                };

                self.set_phase(SearchPhase::Filtering);
                let category_pool: Vec<Uuid> = match &routed.category {
                    Some(name) => {
                        filter_by_keywords(snapshot.notes_in_category(name), &routed.keywords)
                            .into_iter()
                            .map(|n| n.id)
                            .collect()
                    }
                    None => Vec::new(),
                };

                // Similarity top-K is the authoritative pool; the routed
                // pool extends it with category evidence.
                let mut pool: Vec<Uuid> = hits.into_iter().map(|h| h.note_id).collect();
                for id in category_pool {
                    if !pool.contains(&id) {
                        pool.push(id);
                    }
                }
                pool
            }
        };

        self.set_phase(SearchPhase::Synthesizing);
        let contents: Vec<String> = pool
            .iter()
            .filter_map(|id| snapshot.note(*id))
            .map(|n| n.content.clone())
            .collect();
        let answer = match self.synthesizer.synthesize(trimmed, &contents).await {
            Ok(answer) => answer,
            Err(e) => {
                warn!(error = %e, "Answer synthesis failed, returning ranked candidates only");
                self.set_phase(SearchPhase::Failed);
                degraded = true;
                String::new()
            }
        };

        self.set_phase(SearchPhase::Done);
        info!(
            strategy = %self.config.strategy,
            result_count = pool.len(),
            degraded,
            duration_ms = start.elapsed().as_millis() as u64,
            "Search complete"
        );

        Ok(QueryResult {
            ranked_candidates: pool,
            answer,
        })
    }
}

//! Structured logging schema and field name constants for ponder.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log aggregation tools can query by standardized field names across
//! every subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, automatic fallback applied |
//! | INFO  | Lifecycle events (table load, backend init) |
//! | DEBUG | Decision points, phase transitions, config choices |
//! | TRACE | Per-item iteration (per-token lookups, per-note scores) |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "core", "search", "inference"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "orchestrator", "ranker", "router", "synthesizer", "ollama"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "search", "rank", "route", "synthesize", "embed"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Note UUID being operated on.
pub const NOTE_ID: &str = "note_id";

/// Search query text.
pub const QUERY: &str = "query";

/// Query generation counter value for stale-result suppression.
pub const GENERATION: &str = "generation";

/// Pipeline phase name.
pub const PHASE: &str = "phase";

/// Search strategy in effect ("lexical", "model_routed", "embedding").
pub const STRATEGY: &str = "strategy";

/// Category name selected by routing.
pub const CATEGORY: &str = "category";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of results returned by a search or ranking step.
pub const RESULT_COUNT: &str = "result_count";

/// Number of tokens after normalization.
pub const TOKEN_COUNT: &str = "token_count";

/// Number of keywords extracted by routing.
pub const KEYWORD_COUNT: &str = "keyword_count";

/// Byte length of a prompt or response.
pub const PROMPT_LEN: &str = "prompt_len";

/// Byte length of a model response.
pub const RESPONSE_LEN: &str = "response_len";

// ─── Inference fields ──────────────────────────────────────────────────────

/// Model name used for inference.
pub const MODEL: &str = "model";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";

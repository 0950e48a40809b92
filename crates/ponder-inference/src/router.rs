//! Category routing: map a free-text query to one active category plus a
//! small set of keyword terms.
//!
//! Routing delegates to the chat backend with a structured-JSON prompt. The
//! model's answer is untrusted: code fences are stripped, the JSON is parsed
//! leniently, and the returned category must resolve against the supplied
//! active-name list or the whole routing attempt is reported as failed.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, warn};

use ponder_core::{ChatBackend, Error, Result, RoutedQuery};

/// Policy for matching the model's category string against active names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryMatch {
    /// Byte-for-byte equality.
    Exact,
    /// Trimmed, case-insensitive equality (default).
    #[default]
    Loose,
}

/// Raw structured response expected from the model.
#[derive(Debug, Deserialize)]
struct RoutingResponse {
    category: String,
    #[serde(default)]
    keywords: Vec<String>,
}

const ROUTING_SYSTEM: &str = "You classify short personal notes. \
Respond with strict JSON only, no prose.";

/// Routes queries to categories via the chat backend.
pub struct CategoryRouter {
    backend: Arc<dyn ChatBackend>,
    matching: CategoryMatch,
}

impl CategoryRouter {
    /// Create a router with the default (loose) matching policy.
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self {
            backend,
            matching: CategoryMatch::default(),
        }
    }

    /// Override the category matching policy.
    pub fn with_matching(mut self, matching: CategoryMatch) -> Self {
        self.matching = matching;
        self
    }

    /// Route a query to the best matching active category and extract
    /// keyword terms.
    ///
    /// An empty `active_categories` list skips the model call entirely and
    /// returns an empty routing result.
    pub async fn route(&self, query: &str, active_categories: &[String]) -> Result<RoutedQuery> {
        if active_categories.is_empty() {
            debug!("No active categories, skipping routing");
            return Ok(RoutedQuery::empty());
        }

        let prompt = routing_prompt(query, active_categories);
        let raw = self
            .backend
            .generate_with_system(ROUTING_SYSTEM, &prompt)
            .await
            .map_err(|e| Error::Routing(format!("chat backend failed: {}", e)))?;

        let parsed = parse_routing_response(&raw)?;

        let category = match_category(&parsed.category, active_categories, self.matching);
        if category.is_none() {
            warn!(
                returned = %parsed.category,
                "Routed category does not match any active category"
            );
            return Err(Error::Routing(format!(
                "category '{}' not in active set",
                parsed.category
            )));
        }

        let keywords = sanitize_keywords(parsed.keywords);
        debug!(
            category = category.as_deref().unwrap_or(""),
            keyword_count = keywords.len(),
            "Routing complete"
        );

        Ok(RoutedQuery { category, keywords })
    }
}

/// Build the routing prompt for a query and active category list.
fn routing_prompt(query: &str, active_categories: &[String]) -> String {
    format!(
        "Pick the single best matching category for this search query, and \
         extract up to five single-word keywords from the query.\n\
         Query: {query}\n\
         Categories: {}\n\
         Answer as JSON: {{\"category\": \"<name>\", \"keywords\": [\"<word>\", ...]}}",
        active_categories.join(", "),
    )
}

/// Parse the model's routing answer, tolerating code fences and surrounding
/// prose.
fn parse_routing_response(raw: &str) -> Result<RoutingResponse> {
    let stripped = strip_code_fences(raw);
    let json = extract_json_object(stripped)
        .ok_or_else(|| Error::Routing("no JSON object in routing response".to_string()))?;
    serde_json::from_str(json).map_err(|e| Error::Routing(format!("malformed routing JSON: {}", e)))
}

fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let without_open = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    without_open
        .strip_suffix("```")
        .unwrap_or(without_open)
        .trim()
}

fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Resolve the model's category string against the active list, returning
/// the canonical active name on success.
fn match_category(
    returned: &str,
    active_categories: &[String],
    matching: CategoryMatch,
) -> Option<String> {
    match matching {
        CategoryMatch::Exact => active_categories
            .iter()
            .find(|name| name.as_str() == returned)
            .cloned(),
        CategoryMatch::Loose => {
            let needle = returned.trim().to_lowercase();
            active_categories
                .iter()
                .find(|name| name.trim().to_lowercase() == needle)
                .cloned()
        }
    }
}

/// Keep only non-empty single-word lowercase terms, deduplicated in order.
fn sanitize_keywords(keywords: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    keywords
        .into_iter()
        .filter_map(|k| {
            k.split_whitespace()
                .next()
                .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
        })
        .filter(|k| !k.is_empty())
        .filter(|k| seen.insert(k.clone()))
        .collect()
}

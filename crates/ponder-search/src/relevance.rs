//! Keyword relevance filtering and the lexical search fallback.

use regex::RegexBuilder;
use tracing::debug;

use ponder_core::{normalize, Note};

/// Retain notes whose content contains at least one keyword
/// (case-insensitive substring match). Order-preserving.
///
/// An empty keyword list yields an empty result: no keyword means no
/// evidence of relevance, so nothing is forwarded.
pub fn filter_by_keywords<'a, I>(notes: I, keywords: &[String]) -> Vec<&'a Note>
where
    I: IntoIterator<Item = &'a Note>,
{
    if keywords.is_empty() {
        return Vec::new();
    }

    let lowered: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();
    let retained: Vec<&Note> = notes
        .into_iter()
        .filter(|note| {
            let content = note.content.to_lowercase();
            lowered.iter().any(|k| content.contains(k.as_str()))
        })
        .collect();

    debug!(
        keyword_count = keywords.len(),
        result_count = retained.len(),
        "Keyword relevance filter applied"
    );
    retained
}

/// Lexical search: retain notes whose content matches any whole normalized
/// query token. Order-preserving; no model involvement.
pub fn lexical_search<'a>(notes: &'a [Note], query: &str) -> Vec<&'a Note> {
    let tokens = normalize(query);
    if tokens.is_empty() {
        return Vec::new();
    }

    let pattern = format!(
        r"\b({})\b",
        tokens
            .iter()
            .map(|t| regex::escape(t))
            .collect::<Vec<_>>()
            .join("|")
    );
    let matcher = match RegexBuilder::new(&pattern).case_insensitive(true).build() {
        Ok(m) => m,
        // Escaped alternation of alphanumeric tokens always compiles; treat
        // a failure as "no matches" rather than aborting the search.
        Err(_) => return Vec::new(),
    };

    notes
        .iter()
        .filter(|note| matcher.is_match(&note.content))
        .collect()
}

//! Text normalization for embedding input and lexical search.
//!
//! Tokenization is intentionally simple: split on non-alphanumeric
//! boundaries, lowercase, drop stop words. The same token stream feeds both
//! the embedding averaging and the lightweight lexical search path.

use std::collections::{HashMap, HashSet};

/// Short function words excluded from tokenized output.
pub const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "to", "for", "in", "i", "is", "of", "and", "on", "it", "at", "be", "or",
    "was", "are", "my", "me", "so", "that", "this", "with", "am",
];

fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&token)
}

/// Tokenize text into a lowercased, stop-word-free token stream.
///
/// Does NOT deduplicate: every occurrence contributes when the stream is
/// used as embedding input. Empty input yields an empty stream.
pub fn normalize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .map(|t| t.to_lowercase())
        .filter(|t| !t.is_empty() && !is_stop_word(t))
        .collect()
}

/// Tokenize like [`normalize`], deduplicating while preserving first-seen
/// order. Used for display purposes (word clouds), not embedding input.
pub fn normalize_unique(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    normalize(text)
        .into_iter()
        .filter(|t| seen.insert(t.clone()))
        .collect()
}

/// Token frequencies across a set of texts, most frequent first.
///
/// Ties preserve first-seen order across the input texts.
pub fn word_frequencies<'a, I>(texts: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for text in texts {
        for token in normalize(text) {
            match counts.get_mut(&token) {
                Some(count) => *count += 1,
                None => {
                    counts.insert(token.clone(), 1);
                    order.push(token);
                }
            }
        }
    }

    let mut result: Vec<(String, usize)> = order
        .into_iter()
        .map(|t| {
            let count = counts[&t];
            (t, count)
        })
        .collect();
    // Stable sort keeps first-seen order for equal counts
    result.sort_by(|a, b| b.1.cmp(&a.1));
    result
}

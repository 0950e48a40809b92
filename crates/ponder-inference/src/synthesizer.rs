//! Answer synthesis: compose a one-sentence answer from top-ranked notes.

use std::sync::Arc;

use tracing::debug;

use ponder_core::{defaults, ChatBackend, Error, Result};

const SYNTHESIS_SYSTEM: &str = "You answer questions from a user's own short notes. \
Answer in one sentence, drawing an inference from the notes rather than quoting them verbatim. \
If the notes are unrelated to the question, say so briefly.";

/// Synthesizes natural-language answers via the chat backend.
pub struct AnswerSynthesizer {
    backend: Arc<dyn ChatBackend>,
}

impl AnswerSynthesizer {
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self { backend }
    }

    /// Compose a one-sentence answer to `query` from `notes`.
    ///
    /// At most [`defaults::SYNTHESIS_NOTE_LIMIT`] notes are included. An
    /// empty note set returns an empty answer without invoking the model.
    pub async fn synthesize(&self, query: &str, notes: &[String]) -> Result<String> {
        if notes.is_empty() {
            debug!("No candidate notes, skipping synthesis");
            return Ok(String::new());
        }

        let prompt = synthesis_prompt(query, notes);
        let answer = self
            .backend
            .generate_with_system(SYNTHESIS_SYSTEM, &prompt)
            .await
            .map_err(|e| Error::Synthesis(format!("chat backend failed: {}", e)))?;

        let answer = answer.trim().to_string();
        debug!(
            response_len = answer.len(),
            note_count = notes.len().min(defaults::SYNTHESIS_NOTE_LIMIT),
            "Synthesis complete"
        );
        Ok(answer)
    }
}

fn synthesis_prompt(query: &str, notes: &[String]) -> String {
    let mut prompt = format!("Question: {query}\n\nNotes:\n");
    for (i, note) in notes.iter().take(defaults::SYNTHESIS_NOTE_LIMIT).enumerate() {
        prompt.push_str(&format!("{}. {}\n", i + 1, note));
    }
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockChatBackend;

    fn notes(contents: &[&str]) -> Vec<String> {
        contents.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_synthesize_returns_trimmed_answer() {
        let backend = MockChatBackend::new().with_default_response("  Dogs seem best.  \n");
        let synthesizer = AnswerSynthesizer::new(Arc::new(backend));

        let answer = synthesizer
            .synthesize("which animal is best", &notes(&["Dogs are great pets"]))
            .await
            .unwrap();
        assert_eq!(answer, "Dogs seem best.");
    }

    #[tokio::test]
    async fn test_synthesize_empty_notes_skips_model() {
        let backend = MockChatBackend::new();
        let handle = backend.clone();
        let synthesizer = AnswerSynthesizer::new(Arc::new(backend));

        let answer = synthesizer.synthesize("anything", &[]).await.unwrap();
        assert!(answer.is_empty());
        assert_eq!(handle.call_count(), 0);
    }

    #[tokio::test]
    async fn test_synthesize_backend_failure_is_synthesis_error() {
        let backend = MockChatBackend::new().failing();
        let synthesizer = AnswerSynthesizer::new(Arc::new(backend));

        let result = synthesizer
            .synthesize("anything", &notes(&["some note"]))
            .await;
        assert!(matches!(result, Err(Error::Synthesis(_))));
    }

    #[tokio::test]
    async fn test_synthesize_caps_notes_in_prompt() {
        let backend = MockChatBackend::new().with_default_response("ok");
        let handle = backend.clone();
        let synthesizer = AnswerSynthesizer::new(Arc::new(backend));

        let many: Vec<String> = (0..10).map(|i| format!("note {i}")).collect();
        synthesizer.synthesize("q", &many).await.unwrap();

        let calls = handle.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].prompt.contains("note 4"));
        assert!(!calls[0].prompt.contains("note 5"));
    }

    #[test]
    fn test_synthesis_prompt_numbers_notes() {
        let prompt = synthesis_prompt("q", &notes(&["first", "second"]));
        assert!(prompt.contains("1. first"));
        assert!(prompt.contains("2. second"));
    }
}

//! Minimal end-to-end search demo against the mock chat backend.
//!
//! Run with `RUST_LOG=debug cargo run --example search_demo` to watch the
//! pipeline phases.

use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use ponder_core::{infer_emotion, Category, Note, NoteSnapshot};
use ponder_inference::MockChatBackend;
use ponder_search::{refresh_embedding, SearchOrchestrator, WordVectorTable};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let table = Arc::new(WordVectorTable::from_pairs(
        2,
        [
            ("dogs".to_string(), vec![1.0, 0.0]),
            ("cats".to_string(), vec![0.0, 1.0]),
            ("animal".to_string(), vec![0.7, 0.7]),
            ("best".to_string(), vec![0.5, 0.0]),
        ],
    ));

    let pets = Category::new("Pets");
    let mut notes = vec![
        Note::new("Dogs are great pets", Some(pets.id)),
        Note::new("Cats are mid", Some(pets.id)),
    ];
    for note in notes.iter_mut() {
        refresh_embedding(table.as_ref(), note);
        println!(
            "note: {:?} emotion={} dims={}",
            note.content,
            infer_emotion(&note.content),
            note.embedding.len()
        );
    }
    let snapshot = NoteSnapshot::new(notes, vec![pets]);

    let chat = Arc::new(
        MockChatBackend::new()
            .with_response_containing(
                "Categories:",
                r#"{"category": "Pets", "keywords": ["animal", "best"]}"#,
            )
            .with_response_containing("Notes:", "Dogs, going by your notes."),
    );
    let orchestrator = SearchOrchestrator::new(table, chat);

    let result = orchestrator.search("which animal is best", &snapshot).await?;
    println!("candidates: {:?}", result.ranked_candidates);
    println!("answer: {}", result.answer);

    Ok(())
}

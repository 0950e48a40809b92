//! Embedding generation by word-vector averaging.
//!
//! Each note or query is embedded as the arithmetic per-dimension mean of
//! the pretrained vectors of its normalized tokens. Tokens absent from the
//! vocabulary are silently skipped; if nothing resolves the result is an
//! empty vector, which callers must treat as "unrankable" rather than an
//! error. The result is never normalized; cosine comparison is
//! scale-invariant.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use once_cell::sync::OnceCell;
use tracing::{debug, info, warn};

use ponder_core::{defaults, normalize, Error, Note, Result, WordVectorSource};

/// Average the word vectors of `tokens` into one embedding.
///
/// Returns an empty vector when no token resolves.
pub fn embed_tokens(source: &dyn WordVectorSource, tokens: &[String]) -> Vec<f32> {
    let dimension = source.dimension();
    let mut sum = vec![0.0f32; dimension];
    let mut resolved = 0usize;

    for token in tokens {
        if let Some(vector) = source.lookup(token) {
            if vector.len() != dimension {
                warn!(
                    token = %token,
                    expected = dimension,
                    actual = vector.len(),
                    "Skipping word vector with unexpected dimension"
                );
                continue;
            }
            for (acc, component) in sum.iter_mut().zip(vector) {
                *acc += component;
            }
            resolved += 1;
        }
    }

    if resolved == 0 {
        return Vec::new();
    }

    for component in sum.iter_mut() {
        *component /= resolved as f32;
    }
    sum
}

/// Normalize `text` and embed the resulting token stream.
pub fn embed_text(source: &dyn WordVectorSource, text: &str) -> Vec<f32> {
    embed_tokens(source, &normalize(text))
}

/// Recompute a note's cached embedding from its current content.
///
/// This is the core's one permitted write-back: a derived cache field,
/// idempotent to recompute. The stale vector stays in place until the new
/// one is assigned, so ranking never observes a torn state.
pub fn refresh_embedding(source: &dyn WordVectorSource, note: &mut Note) {
    note.embedding = embed_text(source, &note.content);
    debug!(
        note_id = %note.id,
        dimension = note.embedding.len(),
        "Refreshed note embedding"
    );
}

/// Pretrained word-vector table in GloVe text format: one
/// whitespace-separated `token v1 .. vL` entry per line.
pub struct WordVectorTable {
    vectors: HashMap<String, Vec<f32>>,
    dimension: usize,
}

static GLOBAL_TABLE: OnceCell<WordVectorTable> = OnceCell::new();

impl WordVectorTable {
    /// Load a table from a GloVe-format text file.
    ///
    /// The dimension is taken from the first parsable line; later lines with
    /// a different dimension are skipped with a warning. An empty or fully
    /// unparsable file is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let mut vectors = HashMap::new();
        let mut dimension = 0usize;
        let mut skipped = 0usize;

        for line in reader.lines() {
            let line = line?;
            let mut parts = line.split_whitespace();
            let Some(token) = parts.next() else {
                continue;
            };
            let components: std::result::Result<Vec<f32>, _> =
                parts.map(|p| p.parse::<f32>()).collect();
            let Ok(components) = components else {
                skipped += 1;
                continue;
            };
            if components.is_empty() {
                skipped += 1;
                continue;
            }

            if dimension == 0 {
                dimension = components.len();
            } else if components.len() != dimension {
                skipped += 1;
                continue;
            }
            vectors.insert(token.to_lowercase(), components);
        }

        if vectors.is_empty() {
            return Err(Error::Embedding(format!(
                "word-vector table {} contains no usable entries",
                path.display()
            )));
        }
        if skipped > 0 {
            warn!(skipped, "Skipped malformed word-vector entries");
        }

        info!(
            entries = vectors.len(),
            dimension,
            path = %path.display(),
            "Loaded word-vector table"
        );

        Ok(Self { vectors, dimension })
    }

    /// Build a table directly from (token, vector) pairs.
    pub fn from_pairs(
        dimension: usize,
        pairs: impl IntoIterator<Item = (String, Vec<f32>)>,
    ) -> Self {
        let vectors = pairs
            .into_iter()
            .map(|(token, vector)| (token.to_lowercase(), vector))
            .collect();
        Self { vectors, dimension }
    }

    /// Number of vocabulary entries.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Initialize the process-wide table from a file, loading at most once.
    ///
    /// Subsequent calls return the already-loaded table regardless of path.
    /// A load failure is fatal for embedding: callers should surface it at
    /// startup rather than mid-query.
    pub fn init_global(path: impl AsRef<Path>) -> Result<&'static WordVectorTable> {
        GLOBAL_TABLE.get_or_try_init(|| Self::load(path))
    }

    /// Initialize the process-wide table from the
    /// [`defaults::WORD_VECTORS_PATH_ENV`] environment variable.
    pub fn init_global_from_env() -> Result<&'static WordVectorTable> {
        let path = std::env::var(defaults::WORD_VECTORS_PATH_ENV).map_err(|_| {
            Error::Config(format!("{} is not set", defaults::WORD_VECTORS_PATH_ENV))
        })?;
        Self::init_global(path)
    }

    /// The process-wide table, if one has been loaded.
    pub fn global() -> Option<&'static WordVectorTable> {
        GLOBAL_TABLE.get()
    }
}

impl WordVectorSource for WordVectorTable {
    fn lookup(&self, token: &str) -> Option<&[f32]> {
        self.vectors.get(token).map(|v| v.as_slice())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn test_table() -> WordVectorTable {
        WordVectorTable::from_pairs(
            2,
            [
                ("dog".to_string(), vec![1.0, 0.0]),
                ("cat".to_string(), vec![0.0, 1.0]),
                ("pet".to_string(), vec![0.5, 0.5]),
            ],
        )
    }

    #[test]
    fn test_embed_tokens_averages_components() {
        let table = test_table();
        let tokens = vec!["dog".to_string(), "cat".to_string()];
        let embedding = embed_tokens(&table, &tokens);
        assert_eq!(embedding, vec![0.5, 0.5]);
    }

    #[test]
    fn test_embed_tokens_skips_unknown_tokens() {
        let table = test_table();
        let tokens = vec!["dog".to_string(), "zeppelin".to_string()];
        let embedding = embed_tokens(&table, &tokens);
        assert_eq!(embedding, vec![1.0, 0.0]);
    }

    #[test]
    fn test_embed_tokens_empty_when_nothing_resolves() {
        let table = test_table();
        assert!(embed_tokens(&table, &[]).is_empty());
        assert!(embed_tokens(&table, &["zeppelin".to_string()]).is_empty());
    }

    #[test]
    fn test_embed_tokens_counts_repeated_occurrences() {
        let table = test_table();
        // dog appears twice, cat once: mean = (2*[1,0] + [0,1]) / 3
        let tokens = vec!["dog".to_string(), "dog".to_string(), "cat".to_string()];
        let embedding = embed_tokens(&table, &tokens);
        assert!((embedding[0] - 2.0 / 3.0).abs() < 1e-6);
        assert!((embedding[1] - 1.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_embed_text_normalizes_first() {
        let table = test_table();
        // "The" is a stop word, "Dog!" normalizes to "dog"
        let embedding = embed_text(&table, "The Dog!");
        assert_eq!(embedding, vec![1.0, 0.0]);
    }

    #[test]
    fn test_refresh_embedding_writes_back() {
        let table = test_table();
        let mut note = Note::new("dog and cat", None);
        refresh_embedding(&table, &mut note);
        assert_eq!(note.embedding, vec![0.5, 0.5]);

        // Idempotent: same content, same embedding
        let previous = note.embedding.clone();
        refresh_embedding(&table, &mut note);
        assert_eq!(note.embedding, previous);
    }

    #[test]
    fn test_refresh_embedding_clears_on_unresolvable_content() {
        let table = test_table();
        let mut note = Note::new("dog", None);
        refresh_embedding(&table, &mut note);
        assert!(note.has_embedding());

        note.content = "zeppelin".to_string();
        refresh_embedding(&table, &mut note);
        assert!(!note.has_embedding());
    }

    #[test]
    fn test_load_glove_format() {
        let dir = std::env::temp_dir().join("ponder-embed-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("vectors.txt");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "dog 1.0 0.0").unwrap();
        writeln!(file, "cat 0.0 1.0").unwrap();
        writeln!(file, "broken 0.5").unwrap(); // wrong dimension, skipped
        writeln!(file, "junk a b").unwrap(); // unparsable, skipped
        drop(file);

        let table = WordVectorTable::load(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.dimension(), 2);
        assert_eq!(table.lookup("dog"), Some([1.0, 0.0].as_slice()));
        assert_eq!(table.lookup("broken"), None);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = WordVectorTable::load("/nonexistent/vectors.txt");
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_load_empty_file_is_embedding_error() {
        let dir = std::env::temp_dir().join("ponder-embed-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("empty.txt");
        std::fs::File::create(&path).unwrap();

        let result = WordVectorTable::load(&path);
        assert!(matches!(result, Err(Error::Embedding(_))));
    }

    #[test]
    fn test_lookup_is_lowercased_at_load() {
        let table = WordVectorTable::from_pairs(1, [("Dog".to_string(), vec![1.0])]);
        assert!(table.lookup("dog").is_some());
        assert!(table.lookup("Dog").is_none());
    }
}

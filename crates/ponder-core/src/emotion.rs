//! Emotion tagging for notes.
//!
//! Inference is a lightweight keyword scan over the normalized token stream.
//! The variant set is closed; every dispatch over it is an exhaustive match
//! so that adding a variant is a compile error at each mapping site rather
//! than a silent fallthrough.

use serde::{Deserialize, Serialize};

use crate::normalize::normalize;

/// Emotion inferred from a note's text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Joy,
    Sadness,
    Anger,
    Fear,
    Surprise,
    /// Assigned when no emotional cue is present in the text.
    #[default]
    Calm,
}

impl Emotion {
    /// All variants, in cue-priority order.
    pub const ALL: [Emotion; 6] = [
        Emotion::Joy,
        Emotion::Sadness,
        Emotion::Anger,
        Emotion::Fear,
        Emotion::Surprise,
        Emotion::Calm,
    ];

    /// Display color associated with this emotion.
    pub fn color_name(&self) -> &'static str {
        match self {
            Emotion::Joy => "yellow",
            Emotion::Sadness => "blue",
            Emotion::Anger => "red",
            Emotion::Fear => "purple",
            Emotion::Surprise => "orange",
            Emotion::Calm => "green",
        }
    }

    fn cue_words(&self) -> &'static [&'static str] {
        match self {
            Emotion::Joy => &[
                "happy", "joy", "glad", "great", "love", "excited", "wonderful", "fun",
            ],
            Emotion::Sadness => &["sad", "down", "unhappy", "miss", "lonely", "cry", "lost"],
            Emotion::Anger => &["angry", "mad", "furious", "hate", "annoyed", "frustrated"],
            Emotion::Fear => &["afraid", "scared", "worried", "anxious", "nervous", "dread"],
            Emotion::Surprise => &[
                "surprised",
                "unexpected",
                "shocked",
                "sudden",
                "wow",
                "unbelievable",
            ],
            Emotion::Calm => &["calm", "peaceful", "relaxed", "quiet", "content"],
        }
    }
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Emotion::Joy => write!(f, "joy"),
            Emotion::Sadness => write!(f, "sadness"),
            Emotion::Anger => write!(f, "anger"),
            Emotion::Fear => write!(f, "fear"),
            Emotion::Surprise => write!(f, "surprise"),
            Emotion::Calm => write!(f, "calm"),
        }
    }
}

/// Infer an emotion from free text by counting cue-word hits.
///
/// The variant with the most hits wins; ties resolve in [`Emotion::ALL`]
/// order. Text with no cues at all is tagged [`Emotion::Calm`].
pub fn infer_emotion(text: &str) -> Emotion {
    let tokens = normalize(text);
    if tokens.is_empty() {
        return Emotion::Calm;
    }

    let mut best = Emotion::Calm;
    let mut best_hits = 0usize;
    for emotion in Emotion::ALL {
        let hits = tokens
            .iter()
            .filter(|t| emotion.cue_words().contains(&t.as_str()))
            .count();
        if hits > best_hits {
            best = emotion;
            best_hits = hits;
        }
    }
    best
}

//! Cosine-similarity ranking of note embeddings against a query vector.

use tracing::debug;
use uuid::Uuid;

use ponder_core::SimilarityHit;

/// Cosine similarity between two vectors.
///
/// Defined as 0.0 (unrelated) rather than an error when the lengths differ,
/// either vector is empty, or either magnitude is zero. This keeps ranking
/// alive when some notes carry stale or empty embeddings.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

/// Rank candidates by cosine similarity against `query`, descending.
///
/// The sort is stable: ties preserve the input order of `candidates`
/// (commonly snapshot insertion/recency order). The result is truncated to
/// `limit`; a limit of 0 yields an empty ranking.
pub fn rank(query: &[f32], candidates: &[(Uuid, &[f32])], limit: usize) -> Vec<SimilarityHit> {
    let mut hits: Vec<SimilarityHit> = candidates
        .iter()
        .map(|(note_id, vector)| SimilarityHit {
            note_id: *note_id,
            score: cosine_similarity(query, vector),
        })
        .collect();

    hits.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    hits.truncate(limit);

    debug!(
        candidate_count = candidates.len(),
        result_count = hits.len(),
        "Similarity ranking complete"
    );

    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity_identical_vector_is_one() {
        let v = vec![0.3, 0.7, 0.1];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_orthogonal_is_zero() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
    }

    #[test]
    fn test_cosine_similarity_scale_invariant() {
        let a = vec![1.0, 2.0];
        let b = vec![10.0, 20.0];
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_length_mismatch_is_zero() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0, 0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_cosine_similarity_empty_is_zero() {
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[], &[1.0]), 0.0);
    }

    #[test]
    fn test_cosine_similarity_zero_magnitude_is_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }

    #[test]
    fn test_rank_orders_descending() {
        let id1 = Uuid::new_v4();
        let id2 = Uuid::new_v4();
        let id3 = Uuid::new_v4();

        let v1 = [1.0f32, 0.0];
        let v2 = [0.0f32, 1.0];
        let v3 = [0.7f32, 0.7];
        let candidates = vec![
            (id1, v1.as_slice()),
            (id2, v2.as_slice()),
            (id3, v3.as_slice()),
        ];

        let hits = rank(&[1.0, 0.0], &candidates, 10);
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].note_id, id1);
        assert!((hits[0].score - 1.0).abs() < 1e-6);
        assert_eq!(hits[1].note_id, id3);
        assert!((hits[1].score - 0.7071).abs() < 1e-3);
        assert_eq!(hits[2].note_id, id2);
        assert_eq!(hits[2].score, 0.0);
    }

    #[test]
    fn test_rank_ties_preserve_input_order() {
        let id1 = Uuid::new_v4();
        let id2 = Uuid::new_v4();

        let v = [1.0f32, 0.0];
        let candidates = vec![(id1, v.as_slice()), (id2, v.as_slice())];

        let hits = rank(&[1.0, 0.0], &candidates, 10);
        assert_eq!(hits[0].note_id, id1);
        assert_eq!(hits[1].note_id, id2);
    }

    #[test]
    fn test_rank_respects_limit() {
        let v = [1.0f32];
        let candidates: Vec<(Uuid, &[f32])> =
            (0..10).map(|_| (Uuid::new_v4(), v.as_slice())).collect();

        assert_eq!(rank(&[1.0], &candidates, 3).len(), 3);
        assert_eq!(rank(&[1.0], &candidates, 0).len(), 0);
        assert_eq!(rank(&[1.0], &candidates, 100).len(), 10);
    }

    #[test]
    fn test_rank_empty_query_scores_everything_zero() {
        let v = [1.0f32, 0.0];
        let id = Uuid::new_v4();
        let candidates = vec![(id, v.as_slice())];

        let hits = rank(&[], &candidates, 10);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].score, 0.0);
    }

    #[test]
    fn test_rank_empty_candidates() {
        assert!(rank(&[1.0], &[], 10).is_empty());
    }
}

//! Embedding-based relevance ranking.

use crate::embeddings::EmbedClient;
use crate::error::AnalysisError;
use crate::types::ScoredItem;

/// Cosine similarity between two vectors.
///
/// Returns `0.0` when either vector has zero norm (or the vectors are empty),
/// rather than dividing by zero.
pub(crate) fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0_f32;
    let mut norm_a = 0.0_f32;
    let mut norm_b = 0.0_f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Annotate each item with its relevance to the query and sort by descending
/// relevance. Ties keep their input order (stable sort).
///
/// Embeds the query once, then all item texts batched, against the shared
/// embedding handle.
///
/// # Errors
///
/// Returns [`AnalysisError::Embed`] if either embed call fails; items are
/// left unmodified in that case so the caller can fall back to source order.
pub(crate) async fn rank(
    embedder: &EmbedClient,
    query: &str,
    items: &mut [ScoredItem],
) -> Result<(), AnalysisError> {
    if items.is_empty() {
        return Ok(());
    }

    let query_vec = embedder.embed_one(query).await?;

    let texts: Vec<&str> = items.iter().map(ScoredItem::ranking_text).collect();
    let item_vecs = embedder.embed_batch(&texts).await?;

    for (item, vec) in items.iter_mut().zip(&item_vecs) {
        item.relevance = cosine_similarity(&query_vec, vec);
    }
    items.sort_by(|a, b| b.relevance.total_cmp(&a.relevance));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_vectors_score_one() {
        let v = [0.6_f32, 0.8];
        let sim = cosine_similarity(&v, &v);
        assert!((sim - 1.0).abs() < 1e-6, "got {sim}");
    }

    #[test]
    fn orthogonal_vectors_score_zero() {
        let sim = cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]);
        assert!(sim.abs() < 1e-6, "got {sim}");
    }

    #[test]
    fn opposite_vectors_score_negative_one() {
        let sim = cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]);
        assert!((sim + 1.0).abs() < 1e-6, "got {sim}");
    }

    #[test]
    fn zero_norm_vector_scores_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }

    #[test]
    fn magnitude_does_not_change_similarity() {
        let sim_unit = cosine_similarity(&[0.6, 0.8], &[0.8, 0.6]);
        let sim_scaled = cosine_similarity(&[6.0, 8.0], &[0.08, 0.06]);
        assert!((sim_unit - sim_scaled).abs() < 1e-6);
    }
}

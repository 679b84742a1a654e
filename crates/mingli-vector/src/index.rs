use std::cmp::Ordering;

use mingli_core::types::{SearchHit, SourceKind};
use mingli_embed::{dot, l2_norm};

use crate::store::{EmbeddingMatrix, VectorStore};

/// Indices and cosine scores of the `k` rows most similar to `query`,
/// highest first. Non-positive scores are dropped; equal scores keep row order.
pub fn top_k(matrix: &EmbeddingMatrix, query: &[f32], k: usize) -> Vec<(usize, f32)> {
    if k == 0 || query.len() != matrix.dim {
        return Vec::new();
    }
    let q_norm = l2_norm(query);
    if q_norm == 0.0 {
        return Vec::new();
    }
    let mut scored: Vec<(usize, f32)> = matrix
        .iter_rows()
        .enumerate()
        .filter_map(|(i, row)| {
            let r_norm = l2_norm(row);
            if r_norm == 0.0 {
                return None;
            }
            let score = dot(row, query) / (r_norm * q_norm);
            (score > 0.0).then_some((i, score))
        })
        .collect();
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal).then(a.0.cmp(&b.0)));
    scored.truncate(k);
    scored
}

impl VectorStore {
    /// Encode `query` with the store's own vocabulary and rank every row.
    pub fn search(&self, query: &str, k: usize) -> Vec<SearchHit> {
        let q = self.vectorizer.encode(query);
        top_k(&self.matrix, &q, k)
            .into_iter()
            .filter_map(|(i, score)| {
                self.meta.get(i).map(|doc| SearchHit { document: doc.clone(), score, source: SourceKind::Vector })
            })
            .collect()
    }
}

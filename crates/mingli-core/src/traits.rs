use crate::types::{Lookup, SearchHit};

/// Turns text into fixed-width vectors.
///
/// Implementations must return L2-normalized vectors (or all-zero vectors when
/// nothing in the text is recognized) of length `dim()`.
pub trait Embedder: Send + Sync {
    fn dim(&self) -> usize;
    fn embed(&self, text: &str) -> Vec<f32>;
    fn embed_batch(&self, texts: &[String]) -> Vec<Vec<f32>> {
        texts.iter().map(|t| self.embed(t)).collect()
    }
}

/// Nearest-neighbour tier. May report itself as unavailable.
pub trait VectorSearcher: Send + Sync {
    fn search(&self, query: &str, k: usize) -> anyhow::Result<Lookup>;
}

/// Term-matching tier used when the vector tier yields nothing.
pub trait TextSearcher: Send + Sync {
    fn search(&self, query: &str, k: usize) -> anyhow::Result<Vec<SearchHit>>;
}

/// Top-level entry point consumed by the conversational layer.
pub trait Retriever: Send + Sync {
    /// Returns formatted reference text, or an empty string.
    fn retrieve(&self, query: &str, k: usize) -> String;
}

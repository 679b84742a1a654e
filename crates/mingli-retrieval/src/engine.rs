use tracing::{debug, warn};

use mingli_core::traits::{Retriever, TextSearcher, VectorSearcher};
use mingli_core::types::{Lookup, SearchHit};

/// Two-tier retrieval: vector hits if there are any, otherwise keyword hits.
/// Results from the two tiers are never mixed.
pub struct RetrievalEngine<V, T>
where
    V: VectorSearcher,
    T: TextSearcher,
{
    vector: V,
    text: T,
    banner: String,
}

impl<V, T> RetrievalEngine<V, T>
where
    V: VectorSearcher,
    T: TextSearcher,
{
    pub fn new(vector: V, text: T, banner: impl Into<String>) -> Self {
        Self { vector, text, banner: banner.into() }
    }

    pub fn vector(&self) -> &V {
        &self.vector
    }

    pub fn text(&self) -> &T {
        &self.text
    }

    /// Ranked hits from whichever tier answered first. Errors from either tier
    /// are logged and treated as "no result".
    pub fn search(&self, query: &str, k: usize) -> Vec<SearchHit> {
        let lookup = self.vector.search(query, k).unwrap_or_else(|e| {
            warn!(error = %e, "vector tier failed, falling back");
            Lookup::Unavailable
        });
        if lookup.is_unavailable() {
            debug!("vector tier unavailable");
        }
        if let Some(hits) = lookup.usable() {
            return hits;
        }
        self.text.search(query, k).unwrap_or_else(|e| {
            warn!(error = %e, "keyword tier failed");
            Vec::new()
        })
    }

    pub fn format(&self, hits: &[SearchHit]) -> String {
        format_hits(&self.banner, hits)
    }
}

impl<V, T> Retriever for RetrievalEngine<V, T>
where
    V: VectorSearcher,
    T: TextSearcher,
{
    fn retrieve(&self, query: &str, k: usize) -> String {
        self.format(&self.search(query, k))
    }
}

/// Banner line, then `来源：{source}` and the content for each hit. Hits with
/// blank content are skipped; no printable hit gives an empty string.
pub fn format_hits(banner: &str, hits: &[SearchHit]) -> String {
    let entries: Vec<String> = hits
        .iter()
        .filter(|h| !h.document.content.trim().is_empty())
        .map(|h| format!("来源：{}\n{}\n", h.document.source, h.document.content))
        .collect();
    if entries.is_empty() {
        return String::new();
    }
    let mut lines = Vec::with_capacity(entries.len() + 1);
    lines.push(banner.to_string());
    lines.extend(entries);
    lines.join("\n")
}

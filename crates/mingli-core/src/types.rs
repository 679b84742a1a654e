//! Domain types shared by the retrieval tiers.

use serde::{Deserialize, Serialize};

pub type ChunkId = String;

/// A retrievable knowledge passage.
///
/// - `id`: globally unique chunk identifier (e.g. `ditiansui_baihua_chunk_12`)
/// - `source`: human readable origin shown next to the passage (book title)
/// - `tags`: optional curated keywords, only consulted by the keyword tier
/// - `content`: the text payload of the chunk
///
/// Documents are immutable once written into a vector store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub id: ChunkId,
    #[serde(default)]
    pub source: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub content: String,
}

impl Document {
    pub fn new(id: impl Into<String>, source: impl Into<String>, content: impl Into<String>) -> Self {
        Self { id: id.into(), source: source.into(), tags: Vec::new(), content: content.into() }
    }

    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// Indicates which tier produced a result.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SourceKind {
    Vector,
    Keyword,
}

/// A ranked document returned by either tier.
///
/// `score` is tier-specific (cosine similarity or matched term count) but
/// higher is always better.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub document: Document,
    pub score: f32,
    pub source: SourceKind,
}

/// Outcome of a lookup against a tier that may not be provisioned.
///
/// `Unavailable` means the backing artifacts are absent or inconsistent and the
/// caller should fall back; `Hits` may still be empty.
#[derive(Debug, Clone)]
pub enum Lookup {
    Unavailable,
    Hits(Vec<SearchHit>),
}

impl Lookup {
    /// Returns the hits if there is at least one, otherwise `None`.
    pub fn usable(self) -> Option<Vec<SearchHit>> {
        match self {
            Lookup::Hits(hits) if !hits.is_empty() => Some(hits),
            _ => None,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Lookup::Unavailable)
    }
}

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

use mingli_core::error::Error;
use mingli_core::lazy::LoadOnce;
use mingli_core::traits::VectorSearcher;
use mingli_core::types::Lookup;

use crate::store::VectorStore;

/// Vector tier backed by a store directory, loaded on first query.
///
/// A missing or inconsistent store is not an error: searches report
/// [`Lookup::Unavailable`] and the next query tries to load again.
pub struct VectorRetriever {
    dir: PathBuf,
    store: LoadOnce<VectorStore>,
}

impl VectorRetriever {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), store: LoadOnce::new() }
    }

    /// Wrap an already built store.
    pub fn from_store(dir: impl Into<PathBuf>, store: VectorStore) -> Self {
        let retriever = Self::new(dir);
        retriever.store.get_or_load(|| Some(store));
        retriever
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn store(&self) -> Option<Arc<VectorStore>> {
        self.store.get_or_load(|| match VectorStore::load(&self.dir) {
            Ok(s) => Some(s),
            Err(Error::NotFound(msg)) => {
                debug!(%msg, "vector store not built");
                None
            }
            Err(e) => {
                warn!(error = %e, dir = %self.dir.display(), "vector store unusable");
                None
            }
        })
    }

    /// Forget the loaded store, e.g. after a rebuild.
    pub fn reload(&self) {
        self.store.invalidate();
    }
}

impl VectorSearcher for VectorRetriever {
    fn search(&self, query: &str, k: usize) -> anyhow::Result<Lookup> {
        let Some(store) = self.store() else {
            return Ok(Lookup::Unavailable);
        };
        if query.trim().is_empty() {
            return Ok(Lookup::Hits(Vec::new()));
        }
        let hits = store.search(query, k);
        debug!(hits = hits.len(), "vector search");
        Ok(Lookup::Hits(hits))
    }
}

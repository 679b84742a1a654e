use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

use mingli_core::corpus::CorpusLoader;
use mingli_core::lazy::LoadOnce;
use mingli_core::traits::TextSearcher;
use mingli_core::types::{Document, SearchHit};

use crate::keyword::keyword_search;

/// Keyword tier over the chunk directory.
///
/// Every chunk file is read on first use and kept for the life of the value.
/// An empty or missing directory is retried on the next query.
pub struct KeywordSearcher {
    loader: CorpusLoader,
    corpus: LoadOnce<Vec<Document>>,
}

impl KeywordSearcher {
    pub fn new(chunks_dir: impl Into<PathBuf>) -> Self {
        Self { loader: CorpusLoader::new(chunks_dir), corpus: LoadOnce::new() }
    }

    /// Search a fixed in-memory corpus.
    pub fn from_documents(documents: Vec<Document>) -> Self {
        let searcher = Self::new(PathBuf::new());
        searcher.corpus.get_or_load(|| Some(documents));
        searcher
    }

    pub fn corpus(&self) -> Arc<Vec<Document>> {
        self.corpus
            .get_or_load(|| {
                let docs = self.loader.load();
                (!docs.is_empty()).then_some(docs)
            })
            .unwrap_or_default()
    }
}

impl TextSearcher for KeywordSearcher {
    fn search(&self, query: &str, k: usize) -> anyhow::Result<Vec<SearchHit>> {
        let corpus = self.corpus();
        let hits = keyword_search(query, &corpus, k);
        debug!(corpus = corpus.len(), hits = hits.len(), "keyword search");
        Ok(hits)
    }
}

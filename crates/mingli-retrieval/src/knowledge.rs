use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

use mingli_core::config::{resolve_with_base, Config, Settings};
use mingli_core::corpus::CorpusLoader;
use mingli_core::traits::Retriever;
use mingli_core::types::SearchHit;
use mingli_text::KeywordSearcher;
use mingli_vector::{StoreBuilder, VectorRetriever};

use crate::engine::RetrievalEngine;

/// The process-wide retrieval context: both tiers, their lazily loaded data
/// and the façade. Build one at startup and share it by reference.
pub struct KnowledgeBase {
    settings: Settings,
    chunks_dir: PathBuf,
    store_dir: PathBuf,
    engine: RetrievalEngine<VectorRetriever, KeywordSearcher>,
}

impl KnowledgeBase {
    pub fn open(config: &Config) -> mingli_core::Result<Self> {
        let settings = config.settings()?;
        Ok(Self::from_settings(settings, config.base_dir()))
    }

    /// Relative directories in `settings` resolve against `base_dir`.
    pub fn from_settings(settings: Settings, base_dir: &Path) -> Self {
        let chunks_dir = resolve_with_base(base_dir, &settings.knowledge.chunks_dir);
        let store_dir = resolve_with_base(base_dir, &settings.knowledge.vector_store_dir);
        let engine = RetrievalEngine::new(
            VectorRetriever::new(&store_dir),
            KeywordSearcher::new(&chunks_dir),
            settings.retrieval.banner.clone(),
        );
        Self { settings, chunks_dir, store_dir, engine }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn chunks_dir(&self) -> &Path {
        &self.chunks_dir
    }

    pub fn store_dir(&self) -> &Path {
        &self.store_dir
    }

    pub fn engine(&self) -> &RetrievalEngine<VectorRetriever, KeywordSearcher> {
        &self.engine
    }

    pub fn search(&self, query: &str, k: usize) -> Vec<SearchHit> {
        self.engine.search(query, k)
    }

    /// `retrieve` with the configured `top_k`.
    pub fn retrieve_default(&self, query: &str) -> String {
        self.engine.retrieve(query, self.settings.retrieval.top_k)
    }

    /// Rebuild the vector store from the chunk directory and make the next
    /// query pick it up. Returns the number of indexed chunks.
    pub fn rebuild_vector_store(&self, progress: bool) -> Result<usize> {
        let docs = CorpusLoader::new(&self.chunks_dir)
            .with_marker(&self.settings.knowledge.vector_source_marker)
            .load_indexable();
        if docs.is_empty() {
            anyhow::bail!("no indexable chunks under {}", self.chunks_dir.display());
        }
        let mut builder = StoreBuilder::new(self.settings.vectorizer.clone());
        if !progress {
            builder = builder.quiet();
        }
        let store = builder
            .build_and_save(docs, &self.store_dir)
            .context("vector store build failed")?;
        self.engine.vector().reload();
        info!(rows = store.len(), "knowledge base rebuilt");
        Ok(store.len())
    }
}

impl Retriever for KnowledgeBase {
    fn retrieve(&self, query: &str, k: usize) -> String {
        self.engine.retrieve(query, k)
    }
}

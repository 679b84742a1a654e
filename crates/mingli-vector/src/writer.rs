use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use mingli_core::config::VectorizerConfig;
use mingli_core::types::Document;
use mingli_embed::{TfIdfVectorizer, VocabularyBuilder};

use crate::store::{corpus_digest, EmbeddingMatrix, VectorStore};

/// Offline full rebuild of a vector store from a document set.
pub struct StoreBuilder {
    config: VectorizerConfig,
    progress: bool,
}

impl StoreBuilder {
    pub fn new(config: VectorizerConfig) -> Self {
        Self { config, progress: true }
    }

    /// Hide the progress bar (tests, non-interactive runs).
    pub fn quiet(mut self) -> Self {
        self.progress = false;
        self
    }

    pub fn build(&self, documents: Vec<Document>) -> Result<VectorStore> {
        self.config.validate().context("invalid vectorizer settings")?;
        let texts: Vec<&str> = documents.iter().map(|d| d.content.as_str()).collect();
        let vocab = VocabularyBuilder::new(self.config.clone()).build(&texts);
        info!(documents = documents.len(), vocabulary = vocab.len(), "vocabulary ready");
        let vectorizer = TfIdfVectorizer::new(Arc::new(vocab));

        let pb = if self.progress { ProgressBar::new(documents.len() as u64) } else { ProgressBar::hidden() };
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} chunks ({percent}%) {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        let mut rows = Vec::with_capacity(documents.len());
        for doc in &documents {
            rows.push(vectorizer.encode(&doc.content));
            pb.inc(1);
        }
        pb.finish_with_message("vectorized");

        let dim = vectorizer.vocabulary().len();
        let matrix = EmbeddingMatrix::from_rows(rows, dim, corpus_digest(&documents))?;
        Ok(VectorStore::new(vectorizer, matrix, documents)?)
    }

    pub fn build_and_save(&self, documents: Vec<Document>, out_dir: &Path) -> Result<VectorStore> {
        let store = self.build(documents)?;
        store
            .save(out_dir)
            .with_context(|| format!("writing vector store to {}", out_dir.display()))?;
        info!(rows = store.len(), dim = store.dim(), dir = %out_dir.display(), "vector store written");
        Ok(store)
    }
}

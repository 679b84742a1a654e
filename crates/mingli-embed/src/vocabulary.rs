//! Document-frequency vocabulary with smoothed IDF weights.
//!
//! Build steps: per-document token *sets* → document frequency → keep
//! `min_df <= df <= max_df_ratio * N` → sort by df descending, ties by token
//! ascending → truncate to `max_vocab_size` → dense indices in sorted order →
//! `idf = ln(N / df) + 1`.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use tracing::debug;

use mingli_core::config::VectorizerConfig;
use mingli_core::error::{Error, Result};

use crate::tokenize::{NgramRange, Tokenizer};

/// Token → dense index, with a parallel IDF table. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "VocabularyFile", into = "VocabularyFile")]
pub struct Vocabulary {
    ngram: NgramRange,
    tokens: Vec<String>,
    idf: Vec<f32>,
    index: HashMap<String, usize>,
}

/// On-disk shape; `tokens[i]` owns index `i`.
#[derive(Serialize, Deserialize)]
pub struct VocabularyFile {
    pub ngram_min: usize,
    pub ngram_max: usize,
    pub tokens: Vec<String>,
    pub idf: Vec<f32>,
}

impl TryFrom<VocabularyFile> for Vocabulary {
    type Error = String;

    fn try_from(file: VocabularyFile) -> std::result::Result<Self, Self::Error> {
        Vocabulary::from_parts(NgramRange::new(file.ngram_min, file.ngram_max), file.tokens, file.idf)
    }
}

impl From<Vocabulary> for VocabularyFile {
    fn from(v: Vocabulary) -> Self {
        Self { ngram_min: v.ngram.min, ngram_max: v.ngram.max, tokens: v.tokens, idf: v.idf }
    }
}

impl Vocabulary {
    /// Assemble and validate: parallel lengths, unique tokens, finite weights.
    pub fn from_parts(ngram: NgramRange, tokens: Vec<String>, idf: Vec<f32>) -> std::result::Result<Self, String> {
        if !ngram.is_valid() {
            return Err(format!("invalid n-gram range {}..={}", ngram.min, ngram.max));
        }
        if tokens.len() != idf.len() {
            return Err(format!("{} tokens but {} idf weights", tokens.len(), idf.len()));
        }
        if let Some(bad) = idf.iter().find(|w| !w.is_finite()) {
            return Err(format!("non-finite idf weight {bad}"));
        }
        let mut index = HashMap::with_capacity(tokens.len());
        for (i, t) in tokens.iter().enumerate() {
            if index.insert(t.clone(), i).is_some() {
                return Err(format!("duplicate token {t:?}"));
            }
        }
        Ok(Self { ngram, tokens, idf, index })
    }

    pub fn empty(ngram: NgramRange) -> Self {
        Self { ngram, tokens: Vec::new(), idf: Vec::new(), index: HashMap::new() }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn ngram(&self) -> NgramRange {
        self.ngram
    }

    /// The tokenizer every encoder of this vocabulary must use.
    pub fn tokenizer(&self) -> Tokenizer {
        Tokenizer::new(self.ngram)
    }

    pub fn index_of(&self, token: &str) -> Option<usize> {
        self.index.get(token).copied()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.index.contains_key(token)
    }

    pub fn token(&self, idx: usize) -> Option<&str> {
        self.tokens.get(idx).map(String::as_str)
    }

    pub fn idf(&self, idx: usize) -> Option<f32> {
        self.idf.get(idx).copied()
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn idf_weights(&self) -> &[f32] {
        &self.idf
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let body = serde_json::to_string(self)?;
        fs::write(path, body)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::NotFound(path.display().to_string()));
        }
        let text = fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(|e| Error::Corrupt(format!("{}: {e}", path.display())))
    }
}

pub struct VocabularyBuilder {
    config: VectorizerConfig,
}

impl Default for VocabularyBuilder {
    fn default() -> Self {
        Self { config: VectorizerConfig::default() }
    }
}

impl VocabularyBuilder {
    pub fn new(config: VectorizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &VectorizerConfig {
        &self.config
    }

    pub fn build<S: AsRef<str>>(&self, corpus: &[S]) -> Vocabulary {
        let ngram = NgramRange::new(self.config.ngram_min, self.config.ngram_max);
        let n_docs = corpus.len();
        if n_docs == 0 {
            return Vocabulary::empty(ngram);
        }
        let tokenizer = Tokenizer::new(ngram);
        let df = document_frequencies(&tokenizer, corpus);

        let max_df = self.config.max_df_ratio * n_docs as f64;
        let mut kept: Vec<(String, usize)> = df
            .into_iter()
            .filter(|(_, d)| *d >= self.config.min_df && (*d as f64) <= max_df)
            .collect();
        kept.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        kept.truncate(self.config.max_vocab_size);

        let n = n_docs as f64;
        let (tokens, idf): (Vec<String>, Vec<f32>) = kept
            .into_iter()
            .map(|(t, d)| {
                let w = ((n / d as f64).ln() + 1.0) as f32;
                (t, w)
            })
            .unzip();
        debug!(documents = n_docs, vocabulary = tokens.len(), "built vocabulary");

        let mut index = HashMap::with_capacity(tokens.len());
        for (i, t) in tokens.iter().enumerate() {
            index.insert(t.clone(), i);
        }
        Vocabulary { ngram, tokens, idf, index }
    }
}

/// Number of documents each token appears in.
pub fn document_frequencies<S: AsRef<str>>(tokenizer: &Tokenizer, corpus: &[S]) -> HashMap<String, usize> {
    let mut df: HashMap<String, usize> = HashMap::new();
    for doc in corpus {
        let unique: HashSet<String> = tokenizer.tokenize(doc.as_ref()).into_iter().collect();
        for token in unique {
            *df.entry(token).or_insert(0) += 1;
        }
    }
    df
}

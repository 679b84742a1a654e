use std::collections::HashMap;
use std::sync::Arc;

use mingli_core::config::VectorizerConfig;
use mingli_core::traits::Embedder;

use crate::norm::l2_normalize;
use crate::tokenize::Tokenizer;
use crate::vocabulary::{Vocabulary, VocabularyBuilder};

/// Sublinear TF-IDF encoder over a fitted vocabulary.
///
/// Tokenization always comes from the vocabulary itself, so a query is split
/// exactly the way the corpus was when the vocabulary was built.
#[derive(Debug, Clone)]
pub struct TfIdfVectorizer {
    vocab: Arc<Vocabulary>,
    tokenizer: Tokenizer,
}

impl TfIdfVectorizer {
    pub fn new(vocab: Arc<Vocabulary>) -> Self {
        let tokenizer = vocab.tokenizer();
        Self { vocab, tokenizer }
    }

    /// Build a vocabulary from `corpus` and wrap it.
    pub fn fit<S: AsRef<str>>(corpus: &[S], config: VectorizerConfig) -> Self {
        Self::new(Arc::new(VocabularyBuilder::new(config).build(corpus)))
    }

    pub fn vocabulary(&self) -> &Arc<Vocabulary> {
        &self.vocab
    }

    /// `vec[idx] = (1 + ln(count)) * idf[idx]`, then L2-normalized. Texts with
    /// no vocabulary token encode to the zero vector.
    pub fn encode(&self, text: &str) -> Vec<f32> {
        let mut vec = vec![0.0f32; self.vocab.len()];
        if vec.is_empty() {
            return vec;
        }
        let tokens = self.tokenizer.tokenize(text);
        let mut counts: HashMap<&str, u32> = HashMap::new();
        for t in &tokens {
            *counts.entry(t.as_str()).or_insert(0) += 1;
        }
        for (token, count) in counts {
            if let Some(idx) = self.vocab.index_of(token) {
                let idf = self.vocab.idf(idx).unwrap_or(0.0);
                vec[idx] = (1.0 + (count as f32).ln()) * idf;
            }
        }
        l2_normalize(&mut vec);
        vec
    }
}

impl Embedder for TfIdfVectorizer {
    fn dim(&self) -> usize {
        self.vocab.len()
    }
    fn embed(&self, text: &str) -> Vec<f32> {
        self.encode(text)
    }
}

//! mingli-embed
//!
//! Character n-gram tokenizer, document-frequency vocabulary and sublinear
//! TF-IDF vectorizer. See `examples/encode.rs` for a quick look at vectors.

pub mod norm;
pub mod tokenize;
pub mod vectorizer;
pub mod vocabulary;

pub use norm::{cosine, dot, l2_norm, l2_normalize};
pub use tokenize::{NgramRange, Tokenizer};
pub use vectorizer::TfIdfVectorizer;
pub use vocabulary::{Vocabulary, VocabularyBuilder};

use std::path::Path;
use std::sync::Arc;

/// Load a persisted vocabulary and wrap it in a vectorizer.
pub fn load_vectorizer(vocab_path: &Path) -> mingli_core::Result<TfIdfVectorizer> {
    let vocab = Vocabulary::load(vocab_path)?;
    Ok(TfIdfVectorizer::new(Arc::new(vocab)))
}

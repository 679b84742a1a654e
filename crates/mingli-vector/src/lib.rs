//! mingli-vector
//!
//! Persisted TF-IDF vector store and the nearest-neighbour tier built on it.
//! `StoreBuilder` writes a store offline; `VectorRetriever` loads it lazily
//! and answers top-k cosine queries.

pub mod index;
pub mod search;
pub mod store;
pub mod writer;

pub use index::top_k;
pub use search::VectorRetriever;
pub use store::{corpus_digest, EmbeddingMatrix, StorePaths, VectorStore};
pub use writer::StoreBuilder;

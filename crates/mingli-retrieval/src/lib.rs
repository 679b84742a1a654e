//! mingli-retrieval
//!
//! The retrieval façade. `RetrievalEngine` chains a vector tier and a keyword
//! tier; `KnowledgeBase` wires both to the configured directories.

pub mod engine;
pub mod knowledge;

pub use engine::{format_hits, RetrievalEngine};
pub use knowledge::KnowledgeBase;

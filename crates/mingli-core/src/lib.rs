//! mingli-core
//!
//! Shared types, configuration, corpus loading and the seam traits between
//! the retrieval tiers.

pub mod config;
pub mod corpus;
pub mod data_processor;
pub mod error;
pub mod lazy;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use types::{Document, Lookup, SearchHit, SourceKind};

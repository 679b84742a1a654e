//! mingli-text
//!
//! Keyword fallback tier: synonym-expanded term overlap over the raw chunk
//! corpus. Used when the vector tier has nothing to offer.

pub mod keyword;
pub mod search;
pub mod synonyms;

pub use keyword::{expand_query, keyword_search};
pub use search::KeywordSearcher;
pub use synonyms::SYNONYM_GROUPS;

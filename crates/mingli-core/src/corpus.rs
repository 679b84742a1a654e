//! Loads chunk JSON files produced by the chunking step.
//!
//! A chunk file is either a single document object or a bundle
//! `{"chunks": [...]}`. Unreadable files are skipped with a warning so one bad
//! file never hides the rest of the corpus.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::Result;
use crate::types::Document;

#[derive(Deserialize)]
#[serde(untagged)]
enum ChunkFile {
    Bundle { chunks: Vec<Document> },
    Single(Document),
}

pub fn parse_chunk_file(text: &str) -> Result<Vec<Document>> {
    let parsed: ChunkFile = serde_json::from_str(text)?;
    Ok(match parsed {
        ChunkFile::Bundle { chunks } => chunks,
        ChunkFile::Single(doc) => vec![doc],
    })
}

/// True when a document can be vectorized: it has an id and non-blank content.
pub fn is_indexable(doc: &Document) -> bool {
    !doc.id.is_empty() && !doc.content.trim().is_empty()
}

#[derive(Debug, Clone)]
pub struct CorpusLoader {
    chunks_dir: PathBuf,
    name_marker: Option<String>,
}

impl CorpusLoader {
    pub fn new(chunks_dir: impl Into<PathBuf>) -> Self {
        Self { chunks_dir: chunks_dir.into(), name_marker: None }
    }

    /// Restrict loading to files whose name contains `marker` (case-insensitive).
    /// An empty marker disables the filter.
    #[must_use]
    pub fn with_marker(mut self, marker: &str) -> Self {
        self.name_marker = if marker.is_empty() { None } else { Some(marker.to_lowercase()) };
        self
    }

    pub fn chunks_dir(&self) -> &Path {
        &self.chunks_dir
    }

    /// Every parsed chunk, in sorted file order. A missing directory yields an
    /// empty corpus.
    pub fn load(&self) -> Vec<Document> {
        let files = self.list_json_files();
        let mut docs = Vec::new();
        for path in &files {
            let text = match fs::read_to_string(path) {
                Ok(t) => t,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping unreadable chunk file");
                    continue;
                }
            };
            match parse_chunk_file(&text) {
                Ok(chunks) => docs.extend(chunks),
                Err(e) => warn!(path = %path.display(), error = %e, "skipping malformed chunk file"),
            }
        }
        debug!(files = files.len(), chunks = docs.len(), dir = %self.chunks_dir.display(), "loaded corpus");
        docs
    }

    /// Chunks eligible for the vector store, with content trimmed.
    pub fn load_indexable(&self) -> Vec<Document> {
        self.load()
            .into_iter()
            .filter(is_indexable)
            .map(|mut d| {
                d.content = d.content.trim().to_string();
                d
            })
            .collect()
    }

    fn list_json_files(&self) -> Vec<PathBuf> {
        if !self.chunks_dir.is_dir() {
            return Vec::new();
        }
        let mut files: Vec<PathBuf> = walkdir::WalkDir::new(&self.chunks_dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| p.extension().and_then(|s| s.to_str()) == Some("json"))
            .filter(|p| self.matches_marker(p))
            .collect();
        files.sort();
        files
    }

    fn matches_marker(&self, path: &Path) -> bool {
        match &self.name_marker {
            None => true,
            Some(marker) => path
                .file_name()
                .map(|n| n.to_string_lossy().to_lowercase().contains(marker.as_str()))
                .unwrap_or(false),
        }
    }
}

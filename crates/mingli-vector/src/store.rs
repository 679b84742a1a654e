//! On-disk vector store: vocabulary, embedding matrix and row metadata.
//!
//! Layout of a store directory:
//!
//! * `vocabulary.json`: tokens in index order plus IDF weights
//! * `embeddings.bin`: bincode-encoded [`EmbeddingMatrix`], row-major `f32`
//! * `meta.json`: the [`Document`] for each row, in row order
//!
//! Row `i` of the matrix always belongs to `meta[i]`. The matrix carries a
//! digest of the metadata so a half-rewritten directory is detected on load.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use serde::{Deserialize, Serialize};
use tracing::debug;

use mingli_core::error::{Error, Result};
use mingli_core::types::Document;
use mingli_embed::{load_vectorizer, TfIdfVectorizer};

pub const VOCABULARY_FILE: &str = "vocabulary.json";
pub const EMBEDDINGS_FILE: &str = "embeddings.bin";
pub const META_FILE: &str = "meta.json";

#[derive(Debug, Clone)]
pub struct StorePaths {
    pub vocabulary: PathBuf,
    pub embeddings: PathBuf,
    pub meta: PathBuf,
}

impl StorePaths {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            vocabulary: dir.join(VOCABULARY_FILE),
            embeddings: dir.join(EMBEDDINGS_FILE),
            meta: dir.join(META_FILE),
        }
    }

    pub fn all_present(&self) -> bool {
        self.vocabulary.is_file() && self.embeddings.is_file() && self.meta.is_file()
    }
}

/// Dense `rows x dim` matrix of unit (or zero) document vectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingMatrix {
    pub rows: usize,
    pub dim: usize,
    pub corpus_digest: String,
    pub data: Vec<f32>,
}

impl EmbeddingMatrix {
    pub fn from_rows(rows: Vec<Vec<f32>>, dim: usize, corpus_digest: String) -> Result<Self> {
        let n = rows.len();
        let mut data = Vec::with_capacity(n * dim);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != dim {
                return Err(Error::Operation(format!("row {i} has width {} (expected {dim})", row.len())));
            }
            data.extend(row);
        }
        Ok(Self { rows: n, dim, corpus_digest, data })
    }

    pub fn row(&self, i: usize) -> Option<&[f32]> {
        if i >= self.rows {
            return None;
        }
        self.data.get(i * self.dim..(i + 1) * self.dim)
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[f32]> + '_ {
        (0..self.rows).filter_map(move |i| self.row(i))
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        encode_to_vec(self, standard()).map_err(|e| Error::Operation(format!("encode embeddings: {e}")))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let (matrix, _) = decode_from_slice::<Self, _>(bytes, standard())
            .map_err(|e| Error::Corrupt(format!("decode embeddings: {e}")))?;
        Ok(matrix)
    }
}

/// blake3 over ids and contents, length-prefixed so field boundaries matter.
pub fn corpus_digest(meta: &[Document]) -> String {
    let mut hasher = blake3::Hasher::new();
    for doc in meta {
        for field in [&doc.id, &doc.content] {
            hasher.update(&(field.len() as u64).to_le_bytes());
            hasher.update(field.as_bytes());
        }
    }
    hasher.finalize().to_hex().to_string()
}

/// A loaded, self-consistent store. Read-only once constructed.
#[derive(Debug, Clone)]
pub struct VectorStore {
    pub(crate) vectorizer: TfIdfVectorizer,
    pub(crate) matrix: EmbeddingMatrix,
    pub(crate) meta: Vec<Document>,
}

impl VectorStore {
    pub fn new(vectorizer: TfIdfVectorizer, matrix: EmbeddingMatrix, meta: Vec<Document>) -> Result<Self> {
        let store = Self { vectorizer, matrix, meta };
        store.check()?;
        Ok(store)
    }

    fn check(&self) -> Result<()> {
        let m = &self.matrix;
        if m.rows != self.meta.len() {
            return Err(Error::Corrupt(format!("{} embedding rows but {} metadata entries", m.rows, self.meta.len())));
        }
        let vocab_len = self.vectorizer.vocabulary().len();
        if m.dim != vocab_len {
            return Err(Error::Corrupt(format!("embedding width {} but vocabulary has {vocab_len} tokens", m.dim)));
        }
        if m.data.len() != m.rows * m.dim {
            return Err(Error::Corrupt(format!("embedding data has {} values, expected {}", m.data.len(), m.rows * m.dim)));
        }
        if m.corpus_digest != corpus_digest(&self.meta) {
            return Err(Error::Corrupt("embeddings were built from a different corpus than meta.json".into()));
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.meta.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meta.is_empty()
    }

    pub fn dim(&self) -> usize {
        self.matrix.dim
    }

    pub fn vectorizer(&self) -> &TfIdfVectorizer {
        &self.vectorizer
    }

    pub fn matrix(&self) -> &EmbeddingMatrix {
        &self.matrix
    }

    pub fn documents(&self) -> &[Document] {
        &self.meta
    }

    /// Read a store directory. Missing files are `NotFound`; anything that
    /// fails the consistency checks is `Corrupt`.
    pub fn load(dir: &Path) -> Result<Self> {
        let paths = StorePaths::in_dir(dir);
        if !paths.all_present() {
            return Err(Error::NotFound(format!("vector store incomplete in {}", dir.display())));
        }
        let vectorizer = load_vectorizer(&paths.vocabulary)?;
        let matrix = EmbeddingMatrix::from_bytes(&fs::read(&paths.embeddings)?)?;
        let meta: Vec<Document> = serde_json::from_str(&fs::read_to_string(&paths.meta)?)
            .map_err(|e| Error::Corrupt(format!("{}: {e}", paths.meta.display())))?;
        let store = Self::new(vectorizer, matrix, meta)?;
        debug!(rows = store.len(), dim = store.dim(), dir = %dir.display(), "loaded vector store");
        Ok(store)
    }

    /// Write all three files. Each goes to a temp file in `dir` first and is
    /// renamed over the old one, so readers never see a torn file.
    pub fn save(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)?;
        let paths = StorePaths::in_dir(dir);
        let vocab = serde_json::to_vec(self.vectorizer.vocabulary().as_ref())?;
        let meta = serde_json::to_vec_pretty(&self.meta)?;
        let matrix = self.matrix.to_bytes()?;
        write_atomic(dir, &paths.vocabulary, &vocab)?;
        write_atomic(dir, &paths.meta, &meta)?;
        // last, so a crash before this point leaves a digest mismatch behind
        write_atomic(dir, &paths.embeddings, &matrix)?;
        Ok(())
    }
}

fn write_atomic(dir: &Path, target: &Path, bytes: &[u8]) -> Result<()> {
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(target).map_err(|e| Error::Io(e.error))?;
    Ok(())
}

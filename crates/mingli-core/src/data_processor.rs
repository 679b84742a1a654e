use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::ChunkingConfig;
use crate::types::Document;

/// Sentence separators tried, in order, when a paragraph must be cut.
const CUT_SEPARATORS: [char; 6] = ['。', '！', '？', '\n', '；', ' '];

/// Book id, title of the raw text, title of the edition the vernacular
/// rewrite follows.
const KNOWN_BOOKS: &[(&str, &str, &str)] = &[
    ("yuanhaiziping", "渊海子平", "渊海子平"),
    ("ditiansui", "滴天髓", "滴天髓阐微"),
    ("sanmingtonghui", "三命通会", "三命通会"),
    ("zipingzhenquan", "子平真诠评注", "子平真诠评注"),
];

/// A derived edition of the raw books (e.g. the vernacular rewrite).
#[derive(Debug, Clone, Copy)]
pub struct ChunkVariant {
    /// Inserted into chunk ids and looked up in file names.
    pub marker: &'static str,
    /// Appended to the source title, e.g. `三命通会（白话）`.
    pub label: &'static str,
    /// File-name suffix stripped before resolving the book id.
    pub file_suffix: &'static str,
}

impl ChunkVariant {
    pub const BAIHUA: ChunkVariant = ChunkVariant { marker: "baihua", label: "白话", file_suffix: "_白话" };
}

#[derive(Default)]
pub struct DataProcessor {
    chunking_config: ChunkingConfig,
}

impl DataProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(chunking_config: ChunkingConfig) -> Self {
        Self { chunking_config }
    }

    /// Chunk every `.txt` book under `data_dir`.
    pub fn process_directory(&self, data_dir: &Path, variant: Option<ChunkVariant>) -> Result<Vec<Document>> {
        let files = self.list_txt_files(data_dir);
        if files.is_empty() {
            info!(dir = %data_dir.display(), "no .txt files found");
            return Ok(vec![]);
        }
        let mut all_chunks = Vec::new();
        for (file_index, file_path) in files.iter().enumerate() {
            info!("Processing file {}/{}: {}", file_index + 1, files.len(), file_path.display());
            let content = self.read_file_content(file_path)?;
            let chunks = self.chunk_book(&content, &self.extract_book_stem(file_path, variant), variant);
            info!("  {} -> {} chunks", file_path.display(), chunks.len());
            all_chunks.extend(chunks);
        }
        info!("Processed {} files into {} chunks", files.len(), all_chunks.len());
        Ok(all_chunks)
    }

    /// Split one book into documents with stable ids.
    pub fn chunk_book(&self, text: &str, book_stem: &str, variant: Option<ChunkVariant>) -> Vec<Document> {
        let (book_id, title) = resolve_book(book_stem, variant.is_some());
        let text = if variant.is_some() { strip_header(text) } else { text };
        let source = match variant {
            Some(v) => format!("{}（{}）", title, v.label),
            None => title,
        };
        self.split_into_blocks(text)
            .into_iter()
            .enumerate()
            .map(|(i, content)| {
                let id = match variant {
                    Some(v) => format!("{}_{}_chunk_{}", book_id, v.marker, i + 1),
                    None => format!("{}_chunk_{}", book_id, i + 1),
                };
                Document::new(id, source.clone(), content)
            })
            .collect()
    }

    /// Paragraph-first splitting; short paragraphs merge backwards, long ones
    /// are cut at the last sentence separator inside the window.
    pub fn split_into_blocks(&self, text: &str) -> Vec<String> {
        let text = text.trim();
        if text.is_empty() {
            return vec![];
        }
        let cfg = &self.chunking_config;
        let mut blocks: Vec<String> = Vec::new();
        for paragraph in paragraphs(text) {
            let chars: Vec<char> = paragraph.chars().collect();
            if chars.len() <= cfg.max_chars {
                if chars.len() < cfg.min_chars && !blocks.is_empty() {
                    if let Some(last) = blocks.last_mut() {
                        last.push_str("\n\n");
                        last.push_str(&paragraph);
                    }
                } else {
                    blocks.push(paragraph);
                }
            } else {
                blocks.extend(self.cut_long_paragraph(&chars));
            }
        }
        blocks.retain(|b| b.trim().chars().count() >= cfg.min_block_chars);
        blocks
    }

    fn cut_long_paragraph(&self, chars: &[char]) -> Vec<String> {
        let max = self.chunking_config.max_chars;
        let mut out = Vec::new();
        let mut start = 0;
        while start < chars.len() {
            let mut end = start + max;
            if end < chars.len() {
                let window_end = (end + 1).min(chars.len());
                for sep in CUT_SEPARATORS {
                    if let Some(offset) = chars[start..window_end].iter().rposition(|&c| c == sep) {
                        if offset > 0 {
                            end = start + offset + 1;
                            break;
                        }
                    }
                }
            }
            let end = end.min(chars.len());
            out.push(chars[start..end].iter().collect::<String>().trim().to_string());
            start = end;
        }
        out
    }

    /// Write one pretty-printed JSON file per chunk; returns the count written.
    pub fn write_chunks(&self, chunks: &[Document], out_dir: &Path) -> Result<usize> {
        fs::create_dir_all(out_dir).with_context(|| format!("creating {}", out_dir.display()))?;
        for chunk in chunks {
            let path = out_dir.join(format!("{}.json", chunk.id));
            let body = serde_json::to_string_pretty(chunk)?;
            fs::write(&path, body).with_context(|| format!("writing {}", path.display()))?;
        }
        Ok(chunks.len())
    }

    fn read_file_content(&self, file_path: &Path) -> Result<String> {
        match fs::read_to_string(file_path) {
            Ok(content) => Ok(content),
            Err(_) => Ok(String::from_utf8_lossy(&fs::read(file_path)?).to_string()),
        }
    }

    fn extract_book_stem(&self, file_path: &Path, variant: Option<ChunkVariant>) -> String {
        let stem = file_path.file_stem().map(|s| s.to_string_lossy().to_string()).unwrap_or_default();
        match variant {
            Some(v) => stem.strip_suffix(v.file_suffix).map(str::to_string).unwrap_or(stem),
            None => stem,
        }
    }

    fn list_txt_files(&self, root: &Path) -> Vec<PathBuf> {
        let mut txt_files: Vec<PathBuf> = walkdir::WalkDir::new(root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| p.extension().and_then(|s| s.to_str()) == Some("txt"))
            .collect();
        txt_files.sort();
        txt_files
    }
}

/// Paragraphs separated by one or more blank lines, trimmed, non-empty.
fn paragraphs(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                out.push(current.join("\n").trim().to_string());
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        out.push(current.join("\n").trim().to_string());
    }
    out.retain(|p| !p.is_empty());
    out
}

/// Drops a leading description line (`# ...` or a `说明：` preamble).
fn strip_header(text: &str) -> &str {
    let head: String = text.chars().take(200).collect();
    if text.starts_with('#') || head.contains("说明：") {
        if let Some(idx) = text.find('\n') {
            if idx > 0 {
                return text[idx..].trim_start();
            }
        }
    }
    text
}

/// Map a file stem (book id or either title) to `(book_id, display title)`.
fn resolve_book(stem: &str, derived: bool) -> (String, String) {
    KNOWN_BOOKS
        .iter()
        .find(|(id, raw, edition)| [*id, *raw, *edition].contains(&stem))
        .map(|(id, raw, edition)| (id.to_string(), if derived { edition } else { raw }.to_string()))
        .unwrap_or_else(|| (stem.to_string(), stem.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_book_accepts_id_or_title() {
        assert_eq!(resolve_book("ditiansui", false).1, "滴天髓");
        assert_eq!(resolve_book("滴天髓阐微", true), ("ditiansui".to_string(), "滴天髓阐微".to_string()));
        assert_eq!(resolve_book("三命通会", false).0, "sanmingtonghui");
        assert_eq!(resolve_book("unknown", true), ("unknown".to_string(), "unknown".to_string()));
    }

    #[test]
    fn header_is_stripped_only_when_present() {
        assert_eq!(strip_header("# 说明\n正文"), "正文");
        assert_eq!(strip_header("正文第一行\n第二行"), "正文第一行\n第二行");
    }
}

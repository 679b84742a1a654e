use std::path::Path;

use mingli_core::config::Settings;
use mingli_core::traits::{Retriever, TextSearcher, VectorSearcher};
use mingli_core::types::{Document, Lookup, SearchHit, SourceKind};
use mingli_retrieval::{format_hits, KnowledgeBase, RetrievalEngine};

const BANNER: &str = "【命理知识库参考】";

fn hit(source: &str, content: &str, kind: SourceKind) -> SearchHit {
    SearchHit { document: Document::new("id", source, content), score: 1.0, source: kind }
}

struct FixedVector(Option<Vec<SearchHit>>);

impl VectorSearcher for FixedVector {
    fn search(&self, _query: &str, _k: usize) -> anyhow::Result<Lookup> {
        Ok(match &self.0 {
            Some(h) => Lookup::Hits(h.clone()),
            None => Lookup::Unavailable,
        })
    }
}

struct FailingVector;

impl VectorSearcher for FailingVector {
    fn search(&self, _query: &str, _k: usize) -> anyhow::Result<Lookup> {
        anyhow::bail!("matrix exploded")
    }
}

struct FixedText(Vec<SearchHit>);

impl TextSearcher for FixedText {
    fn search(&self, _query: &str, _k: usize) -> anyhow::Result<Vec<SearchHit>> {
        Ok(self.0.clone())
    }
}

struct FailingText;

impl TextSearcher for FailingText {
    fn search(&self, _query: &str, _k: usize) -> anyhow::Result<Vec<SearchHit>> {
        anyhow::bail!("corpus unreadable")
    }
}

#[test]
fn vector_hits_win_and_are_never_merged() {
    let engine = RetrievalEngine::new(
        FixedVector(Some(vec![hit("甲书", "向量结果", SourceKind::Vector)])),
        FixedText(vec![hit("乙书", "关键词结果", SourceKind::Keyword)]),
        BANNER,
    );
    let out = engine.retrieve("q", 5);
    assert_eq!(out, format!("{BANNER}\n来源：甲书\n向量结果\n"));
    assert!(!out.contains("关键词结果"));
}

#[test]
fn empty_unavailable_or_failing_vector_tier_falls_back() {
    let text = || FixedText(vec![hit("乙书", "关键词结果", SourceKind::Keyword)]);
    let expected = format!("{BANNER}\n来源：乙书\n关键词结果\n");

    assert_eq!(RetrievalEngine::new(FixedVector(None), text(), BANNER).retrieve("q", 5), expected);
    assert_eq!(RetrievalEngine::new(FixedVector(Some(vec![])), text(), BANNER).retrieve("q", 5), expected);
    assert_eq!(RetrievalEngine::new(FailingVector, text(), BANNER).retrieve("q", 5), expected);
}

#[test]
fn nothing_anywhere_is_an_empty_string() {
    assert_eq!(RetrievalEngine::new(FixedVector(None), FixedText(vec![]), BANNER).retrieve("q", 5), "");
    assert_eq!(RetrievalEngine::new(FailingVector, FailingText, BANNER).retrieve("q", 5), "");
}

#[test]
fn formatting_skips_blank_content() {
    let hits = vec![
        hit("甲书", "第一段", SourceKind::Vector),
        hit("空", "   ", SourceKind::Vector),
        hit("乙书", "第二段", SourceKind::Vector),
    ];
    assert_eq!(format_hits(BANNER, &hits), format!("{BANNER}\n来源：甲书\n第一段\n\n来源：乙书\n第二段\n"));
    assert_eq!(format_hits(BANNER, &hits[1..2]), "");
}

fn write_chunks(dir: &Path, name: &str, docs: &[Document]) {
    std::fs::create_dir_all(dir).expect("mkdir");
    let body = serde_json::json!({ "chunks": docs });
    std::fs::write(dir.join(name), serde_json::to_string(&body).expect("json")).expect("write");
}

fn sample_docs() -> Vec<Document> {
    vec![
        Document::new("ditiansui_baihua_chunk_1", "滴天髓阐微（白话）", "子午冲则水火相战，主心神不宁"),
        Document::new("ditiansui_baihua_chunk_2", "滴天髓阐微（白话）", "用神得力，运程自顺"),
        Document::new("ditiansui_baihua_chunk_3", "滴天髓阐微（白话）", "财官双美，八字清纯"),
        Document::new("ditiansui_baihua_chunk_4", "滴天髓阐微（白话）", "卯酉冲主变动，子午冲亦然"),
    ]
}

fn knowledge_base(root: &Path) -> KnowledgeBase {
    let mut settings = Settings::default();
    settings.vectorizer.min_df = 1;
    KnowledgeBase::from_settings(settings, root)
}

#[test]
fn zi_wu_clash_found_through_keyword_tier() {
    let tmp = tempfile::tempdir().expect("tmp");
    let kb = knowledge_base(tmp.path());
    write_chunks(kb.chunks_dir(), "ditiansui_baihua.json", &sample_docs());

    let out = kb.retrieve("子午冲", 5);
    assert!(out.starts_with(BANNER));
    assert!(out.contains("子午冲"));
    assert!(kb.search("子午冲", 5).iter().all(|h| h.source == SourceKind::Keyword));
}

#[test]
fn zi_wu_clash_found_through_vector_tier_after_rebuild() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let kb = knowledge_base(tmp.path());
    write_chunks(kb.chunks_dir(), "ditiansui_baihua.json", &sample_docs());
    // without the marker in its name this file only feeds the keyword tier
    write_chunks(kb.chunks_dir(), "ditiansui.json", &[Document::new("raw_1", "滴天髓", "原文")]);

    assert_eq!(kb.rebuild_vector_store(false)?, 4);
    let hits = kb.search("子午冲", 5);
    assert!(!hits.is_empty());
    assert!(hits.iter().all(|h| h.source == SourceKind::Vector));
    assert!(hits[0].document.content.contains("子午冲"));
    assert!(kb.retrieve_default("子午冲").contains("来源：滴天髓阐微（白话）"));
    Ok(())
}

#[test]
fn rebuild_without_chunks_is_an_operator_error() {
    let tmp = tempfile::tempdir().expect("tmp");
    let kb = knowledge_base(tmp.path());
    assert!(kb.rebuild_vector_store(false).is_err());
    assert_eq!(kb.retrieve("子午冲", 5), "");
}

use mingli_core::traits::TextSearcher;
use mingli_core::types::{Document, SourceKind};
use mingli_text::{expand_query, keyword_search, KeywordSearcher, SYNONYM_GROUPS};

fn corpus() -> Vec<Document> {
    vec![
        Document::new("1", "子平真诠", "喜神得力，一生多顺"),
        Document::new("2", "滴天髓", "子午冲，水火交战"),
        Document::new("3", "渊海子平", "论财官印绶"),
        Document::new("4", "三命通会", "忌神当令，取用宜慎，喜用在时"),
        Document::new("5", "三命通会", "").with_tags(["用神", "格局"]),
    ]
}

#[test]
fn yongshen_expands_to_its_group() {
    let terms = expand_query("用神");
    for t in ["用神", "取用", "喜用", "喜神", "忌神"] {
        assert!(terms.iter().any(|x| x == t), "missing {t}");
    }
    let hits = keyword_search("用神", &corpus(), 10);
    let ids: Vec<&str> = hits.iter().map(|h| h.document.id.as_str()).collect();
    // doc 4 matches 取用, 喜用, 忌神; docs 1 and 5 match one term each (ties keep corpus order)
    assert_eq!(ids, vec!["4", "1", "5"]);
    assert_eq!(hits[0].score, 3.0);
    assert!(hits.iter().all(|h| h.source == SourceKind::Keyword));
}

#[test]
fn tags_are_searched_and_top_k_applies() {
    let hits = keyword_search("格局", &corpus(), 1);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].document.id, "5");
}

#[test]
fn no_corpus_or_no_match_is_empty() {
    assert!(keyword_search("用神", &[], 5).is_empty());
    assert!(keyword_search("紫微斗数", &corpus(), 5).is_empty());
    assert!(keyword_search("", &corpus(), 5).is_empty());
}

#[test]
fn matching_is_case_insensitive() {
    let docs = vec![Document::new("x", "notes", "About BaZi charts")];
    assert_eq!(keyword_search("bazi", &docs, 5).len(), 1);
}

#[test]
fn thesaurus_has_nineteen_groups() {
    assert_eq!(SYNONYM_GROUPS.len(), 19);
    assert!(SYNONYM_GROUPS.iter().all(|g| !g.is_empty()));
}

#[test]
fn searcher_reads_chunk_directory_lazily() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let searcher = KeywordSearcher::new(tmp.path());
    assert!(searcher.search("子午冲", 5)?.is_empty());

    let bundle = serde_json::json!({ "chunks": corpus() });
    std::fs::write(tmp.path().join("books.json"), serde_json::to_string(&bundle)?)?;
    let hits = searcher.search("子午冲", 5)?;
    assert_eq!(hits.len(), 1);
    assert!(hits[0].document.content.contains("子午冲"));
    Ok(())
}

#[test]
fn in_memory_searcher() -> anyhow::Result<()> {
    let searcher = KeywordSearcher::from_documents(corpus());
    assert_eq!(searcher.corpus().len(), 5);
    assert_eq!(searcher.search("财官", 5)?[0].document.id, "3");
    Ok(())
}

use std::fs;
use tempfile::TempDir;

use mingli_core::config::{ChunkingConfig, Config, Settings, VectorizerConfig};
use mingli_core::corpus::{parse_chunk_file, CorpusLoader};
use mingli_core::data_processor::{ChunkVariant, DataProcessor};

#[test]
fn process_directory_single_small_file() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();
    fs::write(dir.join("ditiansui.txt"), "天道：欲识三元万法宗，先观帝载与神功。坤元合德机缄通，五气偏全定吉凶。").unwrap();

    let processor = DataProcessor::new();
    let chunks = processor.process_directory(dir, None).expect("process");

    assert_eq!(chunks.len(), 1, "one small paragraph becomes one chunk");
    assert_eq!(chunks[0].id, "ditiansui_chunk_1");
    assert_eq!(chunks[0].source, "滴天髓");
    assert!(chunks[0].content.starts_with("天道"));
}

#[test]
fn short_paragraphs_merge_and_tiny_blocks_drop() {
    let processor = DataProcessor::with_config(ChunkingConfig { max_chars: 50, min_chars: 10, min_block_chars: 5 });
    let blocks = processor.split_into_blocks("甲乙丙丁戊己庚辛壬癸子丑\n\n短句\n\n\n寅卯辰巳午未申酉戌亥");
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0], "甲乙丙丁戊己庚辛壬癸子丑\n\n短句");
    assert_eq!(blocks[1], "寅卯辰巳午未申酉戌亥");

    let blocks = processor.split_into_blocks("短");
    assert!(blocks.is_empty(), "blocks under min_block_chars are dropped");
}

#[test]
fn long_paragraph_is_cut_at_sentence_boundary() {
    let processor = DataProcessor::with_config(ChunkingConfig { max_chars: 10, min_chars: 1, min_block_chars: 1 });
    let blocks = processor.split_into_blocks("甲乙丙丁。戊己庚辛壬癸子丑寅卯");
    assert_eq!(blocks[0], "甲乙丙丁。");
    assert_eq!(blocks[1], "戊己庚辛壬癸子丑寅卯");
    for b in &blocks {
        assert!(b.chars().count() <= 10);
    }
}

#[test]
fn baihua_variant_ids_and_sources() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("三命通会_白话.txt"), "# 说明：白话译文\n这是一段足够长的白话文内容，用来验证切分后的编号与来源名称。").unwrap();
    let chunks = DataProcessor::new().process_directory(tmp.path(), Some(ChunkVariant::BAIHUA)).expect("process");
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].id, "sanmingtonghui_baihua_chunk_1");
    assert_eq!(chunks[0].source, "三命通会（白话）");
    assert!(!chunks[0].content.contains("说明"));
}

#[test]
fn raw_and_vernacular_editions_carry_their_own_titles() {
    let content = "天道：欲识三元万法宗，先观帝载与神功。坤元合德机缄通，五气偏全定吉凶。";
    let processor = DataProcessor::new();
    let raw = processor.chunk_book(content, "ditiansui", None);
    assert_eq!((raw[0].id.as_str(), raw[0].source.as_str()), ("ditiansui_chunk_1", "滴天髓"));
    let vernacular = processor.chunk_book(content, "滴天髓阐微", Some(ChunkVariant::BAIHUA));
    assert_eq!(vernacular[0].id, "ditiansui_baihua_chunk_1");
    assert_eq!(vernacular[0].source, "滴天髓阐微（白话）");
}

#[test]
fn corpus_loader_reads_bundles_singles_and_skips_garbage() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();
    fs::write(dir.join("a_baihua_chunk_1.json"), r#"{"id":"a1","source":"甲书","tags":["用神"],"content":" 内容一 "}"#).unwrap();
    fs::write(dir.join("b_bundle.json"), r#"{"chunks":[{"id":"b1","source":"乙书","content":"内容二"},{"id":"b2","source":"乙书","content":"   "}]}"#).unwrap();
    fs::write(dir.join("broken.json"), "{not json").unwrap();
    fs::write(dir.join("notes.txt"), "ignored").unwrap();

    let all = CorpusLoader::new(dir).load();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].tags, vec!["用神".to_string()]);

    let indexable = CorpusLoader::new(dir).load_indexable();
    assert_eq!(indexable.len(), 2);
    assert_eq!(indexable[0].content, "内容一");

    let marked = CorpusLoader::new(dir).with_marker("baihua").load();
    assert_eq!(marked.len(), 1);
    assert_eq!(marked[0].id, "a1");

    assert!(CorpusLoader::new(dir.join("missing")).load().is_empty());
}

#[test]
fn write_chunks_round_trips_through_loader() {
    let tmp = TempDir::new().unwrap();
    let processor = DataProcessor::new();
    let docs = processor.chunk_book("第一段内容足够长，能够单独成为一个知识片段，不会被丢弃。", "ditiansui", None);
    let out = tmp.path().join("chunks");
    assert_eq!(processor.write_chunks(&docs, &out).expect("write"), 1);
    assert_eq!(CorpusLoader::new(&out).load(), docs);
    assert_eq!(parse_chunk_file(r#"{"id":"x"}"#).expect("parse")[0].content, "");
}

#[test]
fn config_layers_defaults_file_and_validation() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("config.toml"), "[retrieval]\ntop_k = 3\n\n[vectorizer]\nmin_df = 1\n").unwrap();
    let config = Config::load_from(tmp.path()).expect("config");
    let settings = config.settings().expect("settings");
    assert_eq!(settings.retrieval.top_k, 3);
    assert_eq!(settings.vectorizer.min_df, 1);
    assert_eq!(settings.vectorizer.max_vocab_size, 8000);
    assert_eq!(settings.knowledge.chunks_dir, "knowledge/chunks");
    assert_eq!(config.get::<usize>("retrieval.top_k").expect("key"), 3);
    assert!(config.resolve("knowledge/chunks").starts_with(tmp.path()));

    let mut bad = Settings::default();
    bad.vectorizer = VectorizerConfig { ngram_min: 3, ngram_max: 2, ..VectorizerConfig::default() };
    assert!(bad.validate().is_err());
    bad.vectorizer = VectorizerConfig { max_df_ratio: 0.0, ..VectorizerConfig::default() };
    assert!(bad.validate().is_err());
}

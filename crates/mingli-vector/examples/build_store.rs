use std::path::PathBuf;

use mingli_core::config::Config;
use mingli_core::corpus::CorpusLoader;
use mingli_vector::StoreBuilder;

fn main() -> anyhow::Result<()> {
    let config = Config::load()?;
    let settings = config.settings()?;
    let chunks = config.resolve(&settings.knowledge.chunks_dir);
    let out: PathBuf = config.resolve(&settings.knowledge.vector_store_dir);

    let docs = CorpusLoader::new(chunks)
        .with_marker(&settings.knowledge.vector_source_marker)
        .load_indexable();
    let store = StoreBuilder::new(settings.vectorizer).build_and_save(docs, &out)?;
    println!("{} rows x {} dims -> {}", store.len(), store.dim(), out.display());
    Ok(())
}

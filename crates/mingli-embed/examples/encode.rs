use mingli_core::config::VectorizerConfig;
use mingli_embed::TfIdfVectorizer;

fn main() {
    let corpus = ["八字命理分析", "八字看财运", "风水布局", "子午冲主动荡"];
    let config = VectorizerConfig { min_df: 1, ..VectorizerConfig::default() };
    let v = TfIdfVectorizer::fit(&corpus, config);
    println!("vocabulary size: {}", v.vocabulary().len());
    for q in ["八字", "子午冲", "hello"] {
        let vec = v.encode(q);
        let nz: Vec<(&str, f32)> = vec.iter().enumerate().filter(|(_, x)| **x != 0.0).filter_map(|(i, x)| v.vocabulary().token(i).map(|t| (t, *x))).collect();
        println!("{q}: {nz:?}");
    }
}

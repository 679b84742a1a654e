use mingli_core::types::{Document, SearchHit, SourceKind};

use crate::synonyms::matching_groups;

/// Active match terms for a query: its own words of two or more characters,
/// plus every synonym group it touches. Order is first occurrence.
pub fn expand_query(query: &str) -> Vec<String> {
    let lowered = query.to_lowercase();
    let spaced = lowered.replace(['，', '。'], " ");
    let mut terms: Vec<String> = Vec::new();
    let mut push = |t: &str| {
        if !terms.iter().any(|x| x == t) {
            terms.push(t.to_string());
        }
    };
    for word in spaced.split_whitespace() {
        if word.chars().count() >= 2 {
            push(word);
        }
    }
    for group in matching_groups(&lowered) {
        for term in group {
            push(*term);
        }
    }
    terms
}

/// Text a document is matched against: tags, then content.
pub fn searchable_text(doc: &Document) -> String {
    format!("{} {}", doc.tags.join(" "), doc.content).to_lowercase()
}

/// Rank `corpus` by how many active terms each document contains.
///
/// Only positive scores are kept; equal scores keep corpus order.
pub fn keyword_search(query: &str, corpus: &[Document], top_k: usize) -> Vec<SearchHit> {
    let terms = expand_query(query);
    if terms.is_empty() || top_k == 0 {
        return Vec::new();
    }
    let mut scored: Vec<(usize, &Document)> = corpus
        .iter()
        .filter_map(|doc| {
            let text = searchable_text(doc);
            let score = terms.iter().filter(|t| text.contains(t.as_str())).count();
            (score > 0).then_some((score, doc))
        })
        .collect();
    // sort_by is stable
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored
        .into_iter()
        .take(top_k)
        .map(|(score, doc)| SearchHit { document: doc.clone(), score: score as f32, source: SourceKind::Keyword })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_characters_are_not_terms() {
        assert!(expand_query("a 甲").is_empty());
        assert_eq!(expand_query("Ab，甲乙。"), vec!["ab", "甲乙"]);
    }

    #[test]
    fn groups_are_added_once() {
        let terms = expand_query("伤官 食神");
        assert_eq!(terms.iter().filter(|t| *t == "伤官").count(), 1);
        assert!(terms.contains(&"伤官见官".to_string()));
        assert!(terms.contains(&"十神".to_string()));
    }
}

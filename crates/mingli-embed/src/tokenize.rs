use serde::{Deserialize, Serialize};

/// Full-width punctuation that survives cleaning.
const KEPT_PUNCTUATION: [char; 7] = ['，', '。', '、', '；', '：', '？', '！'];

/// Inclusive character n-gram range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NgramRange {
    pub min: usize,
    pub max: usize,
}

impl Default for NgramRange {
    fn default() -> Self {
        Self { min: 1, max: 2 }
    }
}

impl NgramRange {
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn is_valid(&self) -> bool {
        self.min >= 1 && self.min <= self.max
    }
}

/// CJK unified ideographs, extension A/B and compatibility ideographs.
pub fn is_cjk(c: char) -> bool {
    matches!(c as u32,
        0x4E00..=0x9FFF | 0x3400..=0x4DBF | 0x20000..=0x2A6DF | 0xF900..=0xFAFF)
}

/// Keep CJK characters and a few full-width punctuation marks; drop Latin,
/// digits, whitespace and everything else.
pub fn clean(text: &str) -> Vec<char> {
    text.chars().filter(|&c| is_cjk(c) || KEPT_PUNCTUATION.contains(&c)).collect()
}

/// Character n-gram tokenizer. Vocabulary building and query encoding must
/// share one instance configuration, so the range travels with the vocabulary.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer {
    range: NgramRange,
}

impl Tokenizer {
    pub fn new(range: NgramRange) -> Self {
        Self { range }
    }

    pub fn range(&self) -> NgramRange {
        self.range
    }

    /// All contiguous n-grams of the cleaned text, shortest first.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let chars = clean(text);
        let mut tokens = Vec::new();
        if !self.range.is_valid() {
            return tokens;
        }
        for n in self.range.min..=self.range.max {
            if n > chars.len() {
                break;
            }
            tokens.extend(chars.windows(n).map(|w| w.iter().collect::<String>()));
        }
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_latin_digits_and_whitespace() {
        assert_eq!(clean("abc 甲 1子\n，x"), vec!['甲', '子', '，']);
    }

    #[test]
    fn unigrams_then_bigrams() {
        let t = Tokenizer::default();
        assert_eq!(t.tokenize("八字 ok 命"), vec!["八", "字", "命", "八字", "字命"]);
        assert!(t.tokenize("hello world 42").is_empty());
        assert!(t.tokenize("").is_empty());
    }

    #[test]
    fn short_text_yields_only_fitting_grams() {
        let t = Tokenizer::new(NgramRange::new(1, 3));
        assert_eq!(t.tokenize("冲"), vec!["冲"]);
        assert!(Tokenizer::new(NgramRange::new(2, 1)).tokenize("甲乙").is_empty());
    }
}

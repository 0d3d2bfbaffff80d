//! Fitted vocabulary shared by the count and TF-IDF vectorizers.

use std::collections::BTreeMap;

use ahash::AHashMap;

use crate::analysis::normalizer::NormalizedText;
use crate::analysis::tokenizer::whitespace::WhitespaceTokenizer;
use crate::error::{PalateError, Result};

/// Term to column mapping plus the tokenization settings used when it was fit.
#[derive(Clone, Debug)]
pub struct Vocabulary {
    terms: AHashMap<String, usize>,
    ngram_range: (usize, usize),
    tokenizer: WhitespaceTokenizer,
}

impl Vocabulary {
    /// Validate and wrap a fitted vocabulary.
    ///
    /// Column indices must cover `0..terms.len()` exactly once.
    pub fn new(
        terms: AHashMap<String, usize>,
        ngram_range: (usize, usize),
        min_token_len: usize,
    ) -> Result<Self> {
        let (min_n, max_n) = ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(PalateError::artifact(format!(
                "invalid ngram_range ({min_n}, {max_n})"
            )));
        }

        let mut seen = vec![false; terms.len()];
        for (term, &idx) in &terms {
            match seen.get_mut(idx) {
                Some(slot) if !*slot => *slot = true,
                Some(_) => {
                    return Err(PalateError::artifact(format!(
                        "vocabulary column {idx} is assigned twice (at '{term}')"
                    )));
                }
                None => {
                    return Err(PalateError::artifact(format!(
                        "vocabulary column {idx} for '{term}' exceeds vocabulary size {}",
                        terms.len()
                    )));
                }
            }
        }

        Ok(Self {
            terms,
            ngram_range,
            tokenizer: WhitespaceTokenizer::new().with_min_len(min_token_len),
        })
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the vocabulary has no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Column of a term, if it was seen during fitting.
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.terms.get(term).copied()
    }

    /// Count in-vocabulary n-grams of `text`, keyed by column in ascending order.
    ///
    /// Out-of-vocabulary n-grams are skipped.
    pub fn term_counts(&self, text: &NormalizedText) -> BTreeMap<usize, u32> {
        let words = self.tokenizer.words(text.as_str());
        let (min_n, max_n) = self.ngram_range;
        let mut counts = BTreeMap::new();
        let mut gram = String::new();

        for n in min_n..=max_n {
            for window in words.windows(n) {
                let idx = if n == 1 {
                    self.index_of(window[0])
                } else {
                    gram.clear();
                    for (i, word) in window.iter().enumerate() {
                        if i > 0 {
                            gram.push(' ');
                        }
                        gram.push_str(word);
                    }
                    self.index_of(&gram)
                };
                if let Some(idx) = idx {
                    *counts.entry(idx).or_insert(0) += 1;
                }
            }
        }

        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::normalizer::normalize;

    fn terms(words: &[&str]) -> AHashMap<String, usize> {
        words
            .iter()
            .enumerate()
            .map(|(i, w)| (w.to_string(), i))
            .collect()
    }

    #[test]
    fn test_unigram_counts() {
        let vocab = Vocabulary::new(terms(&["great", "tea", "bad"]), (1, 1), 2).unwrap();
        let counts = vocab.term_counts(&normalize("Great tea, great price"));
        assert_eq!(counts.get(&0), Some(&2));
        assert_eq!(counts.get(&1), Some(&1));
        assert_eq!(counts.get(&2), None);
    }

    #[test]
    fn test_bigram_counts() {
        let vocab = Vocabulary::new(terms(&["not", "good", "not good"]), (1, 2), 2).unwrap();
        let counts = vocab.term_counts(&normalize("Not good. Not at all"));
        assert_eq!(counts.get(&0), Some(&2));
        assert_eq!(counts.get(&1), Some(&1));
        assert_eq!(counts.get(&2), Some(&1));
    }

    #[test]
    fn test_short_tokens_dropped() {
        let vocab = Vocabulary::new(terms(&["a", "snack"]), (1, 1), 2).unwrap();
        let counts = vocab.term_counts(&normalize("a snack"));
        assert_eq!(counts.len(), 1);
        assert_eq!(counts.get(&1), Some(&1));
    }

    #[test]
    fn test_rejects_bad_columns() {
        let mut bad = terms(&["one", "two"]);
        bad.insert("two".to_string(), 0);
        assert!(Vocabulary::new(bad, (1, 1), 1).is_err());

        let mut gap = AHashMap::new();
        gap.insert("one".to_string(), 3);
        assert!(Vocabulary::new(gap, (1, 1), 1).is_err());

        assert!(Vocabulary::new(terms(&["x"]), (2, 1), 1).is_err());
        assert!(Vocabulary::new(terms(&["x"]), (0, 1), 1).is_err());
    }
}

//! Whitespace tokenizer implementation.

use super::Tokenizer;

use crate::analysis::token::{Token, TokenStream};
use crate::error::Result;

/// A tokenizer that splits text on whitespace.
///
/// Tokens shorter than `min_len` bytes are skipped without consuming a
/// position.
#[derive(Clone, Debug)]
pub struct WhitespaceTokenizer {
    min_len: usize,
}

impl Default for WhitespaceTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl WhitespaceTokenizer {
    /// Create a new whitespace tokenizer that keeps every word.
    pub fn new() -> Self {
        WhitespaceTokenizer { min_len: 1 }
    }

    /// Skip words shorter than `min_len` bytes.
    pub fn with_min_len(mut self, min_len: usize) -> Self {
        self.min_len = min_len.max(1);
        self
    }

    /// Collect token texts directly, without building [`Token`] values.
    pub fn words<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.split_whitespace()
            .filter(|word| word.len() >= self.min_len)
            .collect()
    }
}

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let mut tokens = Vec::new();
        let mut position = 0;
        let mut word_start: Option<usize> = None;

        for (idx, ch) in text.char_indices().chain(std::iter::once((text.len(), ' '))) {
            match (ch.is_whitespace(), word_start) {
                (true, Some(start)) => {
                    if idx - start >= self.min_len {
                        tokens.push(Token::with_offsets(&text[start..idx], position, start, idx));
                        position += 1;
                    }
                    word_start = None;
                }
                (false, None) => word_start = Some(idx),
                _ => {}
            }
        }

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "whitespace"
    }
}

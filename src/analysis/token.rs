//! Token types for review analysis.
//!
//! A [`Token`] is one word of a normalized review together with its position
//! and byte offsets in the normalized text.
//!
//! # Examples
//!
//! ```
//! use palate::analysis::token::Token;
//!
//! let token = Token::with_offsets("divine", 5, 26, 32);
//! assert_eq!(token.text, "divine");
//! assert_eq!(token.len(), 6);
//! ```

use serde::{Deserialize, Serialize};

/// A token represents a single unit of text after tokenization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The text content of the token
    pub text: String,

    /// The position of the token in the token stream (0-based)
    pub position: usize,

    /// The byte offset where this token starts in the analyzed text
    pub start_offset: usize,

    /// The byte offset where this token ends in the analyzed text
    pub end_offset: usize,
}

impl Token {
    /// Create a new token with explicit byte offsets.
    pub fn with_offsets<S: Into<String>>(
        text: S,
        position: usize,
        start_offset: usize,
        end_offset: usize,
    ) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset,
            end_offset,
        }
    }

    /// Length of the token text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Whether the token text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// A boxed iterator over tokens.
pub type TokenStream = Box<dyn Iterator<Item = Token> + Send>;

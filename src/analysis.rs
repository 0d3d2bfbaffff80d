//! Text analysis for review sentiment.
//!
//! Raw review text is cleaned by a fixed chain of char filters (the
//! [`normalizer`]), then split into tokens for feature extraction and keyword
//! matching.
//!
//! ```text
//! Raw Review → Char Filters → NormalizedText → Tokenizer → Tokens
//! ```

pub mod char_filter;
pub mod normalizer;
pub mod token;
pub mod tokenizer;

//! Char filter implementations for text normalization.
//!
//! Char filters pre-process the whole review string before it is tokenized.
//! They are applied in sequence by the
//! [`TextNormalizer`](crate::analysis::normalizer::TextNormalizer), and each
//! filter may assume the filters before it already ran.
//!
//! # Available Filters
//!
//! - [`pattern_replace::PatternReplaceCharFilter`] - Regex-based replacement
//! - [`lowercase::LowercaseCharFilter`] - ASCII lowercasing
//! - [`collapse_whitespace::CollapseWhitespaceCharFilter`] - Whitespace run collapsing and trimming
//!
//! # Examples
//!
//! ```
//! use palate::analysis::char_filter::CharFilter;
//! use palate::analysis::char_filter::pattern_replace::PatternReplaceCharFilter;
//!
//! let filter = PatternReplaceCharFilter::new(r"\d+", "#").unwrap();
//! assert_eq!(filter.filter("table 42"), "table #");
//! ```

/// Trait for character filters that transform text before tokenization.
///
/// Filters must be pure: the output depends only on the input string.
pub trait CharFilter: Send + Sync {
    /// Apply this filter to the input text and return the filtered text.
    fn filter(&self, input: &str) -> String;

    /// Get the name of this char filter.
    fn name(&self) -> &'static str;
}

pub mod collapse_whitespace;
pub mod lowercase;
pub mod pattern_replace;

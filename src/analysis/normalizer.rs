//! Review text normalization.
//!
//! The [`TextNormalizer`] applies a fixed chain of char filters, in this order:
//!
//! 1. HTML-tag-shaped substrings (`<...>`) become a single space.
//! 2. The `n't` / `n’t` contraction expands to ` not`.
//! 3. Every character that is not an ASCII letter or whitespace becomes a space.
//! 4. ASCII letters are lowercased.
//! 5. Whitespace runs collapse to one space and the ends are trimmed.
//!
//! The result contains only lowercase ASCII letters separated by single
//! spaces. Normalization is total: input that is not text at all (see
//! [`ReviewInput`]) normalizes to the empty string.
//!
//! # Examples
//!
//! ```
//! use palate::analysis::normalizer::normalize;
//!
//! let text = normalize("<br/>The soup wasn't WARM!!");
//! assert_eq!(text.as_str(), "the soup was not warm");
//!
//! let missing: Option<&str> = None;
//! assert!(normalize(&missing).is_empty());
//! ```

use std::fmt;
use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analysis::char_filter::CharFilter;
use crate::analysis::char_filter::collapse_whitespace::CollapseWhitespaceCharFilter;
use crate::analysis::char_filter::lowercase::LowercaseCharFilter;
use crate::analysis::char_filter::pattern_replace::PatternReplaceCharFilter;

lazy_static! {
    static ref HTML_TAG: Regex = Regex::new(r"<[^>]*>").expect("html tag pattern is valid");
    static ref NOT_CONTRACTION: Regex =
        Regex::new(r"(?i)n['\u{2019}]t").expect("contraction pattern is valid");
    static ref NON_ALPHA: Regex =
        Regex::new(r"[^A-Za-z\s]").expect("non-alphabetic pattern is valid");
    static ref DEFAULT_NORMALIZER: TextNormalizer = TextNormalizer::new();
}

/// Anything a review can arrive as.
///
/// Values that carry no text (a `None`, a JSON number, ...) return `None` and
/// normalize to the empty string instead of failing.
pub trait ReviewInput {
    /// The review text, if this value is text-typed.
    fn review_text(&self) -> Option<&str>;
}

impl ReviewInput for str {
    fn review_text(&self) -> Option<&str> {
        Some(self)
    }
}

impl ReviewInput for String {
    fn review_text(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl<T: ReviewInput + ?Sized> ReviewInput for &T {
    fn review_text(&self) -> Option<&str> {
        (**self).review_text()
    }
}

impl<T: ReviewInput> ReviewInput for Option<T> {
    fn review_text(&self) -> Option<&str> {
        self.as_ref().and_then(ReviewInput::review_text)
    }
}

impl ReviewInput for serde_json::Value {
    fn review_text(&self) -> Option<&str> {
        self.as_str()
    }
}

/// Review text in canonical form: lowercase ASCII words joined by single spaces.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedText(String);

impl NormalizedText {
    /// Borrow the normalized text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether normalization left nothing behind.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the words of the normalized text.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.0.split(' ').filter(|w| !w.is_empty())
    }

    /// Consume into the underlying string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The fixed char filter chain producing [`NormalizedText`].
#[derive(Clone)]
pub struct TextNormalizer {
    char_filters: Vec<Arc<dyn CharFilter>>,
}

impl fmt::Debug for TextNormalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextNormalizer")
            .field(
                "char_filters",
                &self.char_filters.iter().map(|c| c.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextNormalizer {
    /// Create the standard review normalizer.
    pub fn new() -> Self {
        let char_filters: Vec<Arc<dyn CharFilter>> = vec![
            Arc::new(
                PatternReplaceCharFilter::from_regex(HTML_TAG.clone(), " ")
                    .with_name("html_strip"),
            ),
            Arc::new(
                PatternReplaceCharFilter::from_regex(NOT_CONTRACTION.clone(), " not")
                    .with_name("expand_not"),
            ),
            Arc::new(
                PatternReplaceCharFilter::from_regex(NON_ALPHA.clone(), " ")
                    .with_name("non_alpha"),
            ),
            Arc::new(LowercaseCharFilter::new()),
            Arc::new(CollapseWhitespaceCharFilter::new()),
        ];
        Self { char_filters }
    }

    /// Names of the char filters, in application order.
    pub fn filter_names(&self) -> Vec<&'static str> {
        self.char_filters.iter().map(|c| c.name()).collect()
    }

    /// Normalize a review of any shape.
    pub fn normalize<T: ReviewInput + ?Sized>(&self, input: &T) -> NormalizedText {
        match input.review_text() {
            Some(text) => self.normalize_str(text),
            None => NormalizedText::default(),
        }
    }

    fn normalize_str(&self, text: &str) -> NormalizedText {
        let normalized = self
            .char_filters
            .iter()
            .fold(text.to_string(), |acc, filter| filter.filter(&acc));
        NormalizedText(normalized)
    }
}

/// Normalize a review with the standard [`TextNormalizer`].
pub fn normalize<T: ReviewInput + ?Sized>(input: &T) -> NormalizedText {
    DEFAULT_NORMALIZER.normalize(input)
}

//! ASCII lowercase char filter.
//!
//! Reviews reaching this filter in the normalizer chain contain only ASCII
//! letters and whitespace, so ASCII lowercasing is sufficient and never
//! changes byte lengths.
//!
//! # Examples
//!
//! ```
//! use palate::analysis::char_filter::CharFilter;
//! use palate::analysis::char_filter::lowercase::LowercaseCharFilter;
//!
//! let filter = LowercaseCharFilter::new();
//! assert_eq!(filter.filter("Hello WORLD"), "hello world");
//! ```

use super::CharFilter;

/// A char filter that converts ASCII letters to lowercase.
#[derive(Clone, Copy, Debug, Default)]
pub struct LowercaseCharFilter;

impl LowercaseCharFilter {
    /// Create a new lowercase char filter.
    pub fn new() -> Self {
        LowercaseCharFilter
    }
}

impl CharFilter for LowercaseCharFilter {
    fn filter(&self, input: &str) -> String {
        input.to_ascii_lowercase()
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_filter() {
        let filter = LowercaseCharFilter::new();
        assert_eq!(filter.filter("The QUICK Brown"), "the quick brown");
        assert_eq!(filter.filter(""), "");
    }

    #[test]
    fn test_non_ascii_untouched() {
        assert_eq!(LowercaseCharFilter::new().filter("CRÈME"), "crÈme");
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(LowercaseCharFilter::new().name(), "lowercase");
    }
}

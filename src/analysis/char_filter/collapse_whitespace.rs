//! Whitespace collapsing char filter.

use super::CharFilter;

/// A char filter that collapses every run of whitespace into a single space
/// and trims both ends.
#[derive(Clone, Copy, Debug, Default)]
pub struct CollapseWhitespaceCharFilter;

impl CollapseWhitespaceCharFilter {
    /// Create a new whitespace collapsing char filter.
    pub fn new() -> Self {
        CollapseWhitespaceCharFilter
    }
}

impl CharFilter for CollapseWhitespaceCharFilter {
    fn filter(&self, input: &str) -> String {
        let mut output = String::with_capacity(input.len());
        for word in input.split_whitespace() {
            if !output.is_empty() {
                output.push(' ');
            }
            output.push_str(word);
        }
        output
    }

    fn name(&self) -> &'static str {
        "collapse_whitespace"
    }
}

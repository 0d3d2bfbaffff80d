//! Term count vectorizer.

use crate::analysis::normalizer::NormalizedText;
use crate::error::Result;
use crate::vectorizer::feature::FeatureVector;
use crate::vectorizer::vocabulary::Vocabulary;
use crate::vectorizer::{CountArtifact, Vectorizer};

/// Maps text to raw in-vocabulary n-gram counts (or presence flags when
/// `binary` is set).
#[derive(Clone, Debug)]
pub struct CountVectorizer {
    vocabulary: Vocabulary,
    binary: bool,
}

impl CountVectorizer {
    /// Build a count vectorizer from its fitted artifact.
    pub fn from_artifact(artifact: CountArtifact) -> Result<Self> {
        Ok(Self {
            vocabulary: Vocabulary::new(
                artifact.vocabulary,
                artifact.ngram_range,
                artifact.min_token_len,
            )?,
            binary: artifact.binary,
        })
    }
}

impl Vectorizer for CountVectorizer {
    fn vectorize(&self, text: &NormalizedText) -> FeatureVector {
        let counts = self.vocabulary.term_counts(text);
        let binary = self.binary;
        FeatureVector::from_sorted(
            self.vocabulary.len(),
            counts
                .into_iter()
                .map(|(idx, count)| (idx, if binary { 1.0 } else { f64::from(count) })),
        )
    }

    fn dimension(&self) -> usize {
        self.vocabulary.len()
    }

    fn name(&self) -> &'static str {
        "count"
    }
}

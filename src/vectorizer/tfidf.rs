//! TF-IDF vectorizer for text feature extraction.

use crate::analysis::normalizer::NormalizedText;
use crate::error::{PalateError, Result};
use crate::vectorizer::feature::FeatureVector;
use crate::vectorizer::vocabulary::Vocabulary;
use crate::vectorizer::{Norm, TfIdfArtifact, Vectorizer};

/// TF-IDF vectorizer backed by a fitted vocabulary and idf table.
///
/// Each in-vocabulary n-gram gets `tf * idf[column]`, where `tf` is the raw
/// count or `1 + ln(count)` with sublinear scaling. The row is then divided by
/// its l1 or l2 norm when a norm is configured.
pub struct TfIdfVectorizer {
    /// Vocabulary: n-gram -> column mapping.
    vocabulary: Vocabulary,
    /// Inverse document frequency for each column.
    idf: Vec<f64>,
    sublinear_tf: bool,
    norm: Option<Norm>,
}

impl std::fmt::Debug for TfIdfVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfIdfVectorizer")
            .field("vocabulary_size", &self.vocabulary.len())
            .field("sublinear_tf", &self.sublinear_tf)
            .field("norm", &self.norm)
            .finish()
    }
}

impl TfIdfVectorizer {
    /// Build a TF-IDF vectorizer from its fitted artifact.
    pub fn from_artifact(artifact: TfIdfArtifact) -> Result<Self> {
        let vocabulary = Vocabulary::new(
            artifact.vocabulary,
            artifact.ngram_range,
            artifact.min_token_len,
        )?;

        if artifact.idf.len() != vocabulary.len() {
            return Err(PalateError::artifact(format!(
                "idf table has {} entries for a vocabulary of {} terms",
                artifact.idf.len(),
                vocabulary.len()
            )));
        }
        if let Some(pos) = artifact.idf.iter().position(|w| !w.is_finite()) {
            return Err(PalateError::artifact(format!(
                "idf weight at column {pos} is not finite"
            )));
        }

        Ok(Self {
            vocabulary,
            idf: artifact.idf,
            sublinear_tf: artifact.sublinear_tf,
            norm: artifact.norm,
        })
    }

    /// Get the size of the vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }
}

impl Vectorizer for TfIdfVectorizer {
    fn vectorize(&self, text: &NormalizedText) -> FeatureVector {
        let counts = self.vocabulary.term_counts(text);

        let mut features = FeatureVector::from_sorted(
            self.vocabulary.len(),
            counts.into_iter().map(|(idx, count)| {
                let count = f64::from(count);
                let tf = if self.sublinear_tf { 1.0 + count.ln() } else { count };
                (idx, tf * self.idf[idx])
            }),
        );

        match self.norm {
            Some(Norm::L2) => {
                let norm = features.l2_norm();
                features.normalize_by(norm);
            }
            Some(Norm::L1) => {
                let norm = features.l1_norm();
                features.normalize_by(norm);
            }
            None => {}
        }

        features
    }

    fn dimension(&self) -> usize {
        self.vocabulary.len()
    }

    fn name(&self) -> &'static str {
        "tfidf"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::normalizer::normalize;

    fn artifact(norm: Option<Norm>, sublinear_tf: bool) -> TfIdfArtifact {
        TfIdfArtifact {
            vocabulary: [("delicious", 0), ("soup", 1), ("cold", 2), ("not", 3)]
                .into_iter()
                .map(|(t, i)| (t.to_string(), i))
                .collect(),
            idf: vec![2.0, 1.0, 3.0, 1.5],
            sublinear_tf,
            norm,
            ngram_range: (1, 1),
            min_token_len: 2,
        }
    }

    #[test]
    fn test_tfidf_vectorizer() {
        let vectorizer = TfIdfVectorizer::from_artifact(artifact(None, false)).unwrap();
        assert_eq!(vectorizer.vocabulary_size(), 4);

        let features = vectorizer.vectorize(&normalize("Delicious soup, delicious!"));
        assert_eq!(features.dimension(), 4);
        assert_eq!(features.to_dense(), vec![4.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_l2_normalized() {
        let vectorizer = TfIdfVectorizer::from_artifact(artifact(Some(Norm::L2), false)).unwrap();
        let features = vectorizer.vectorize(&normalize("cold soup"));
        assert!((features.l2_norm() - 1.0).abs() < 1e-12);
        assert!(features.get(2) > features.get(1));
    }

    #[test]
    fn test_sublinear_tf() {
        let vectorizer = TfIdfVectorizer::from_artifact(artifact(None, true)).unwrap();
        let features = vectorizer.vectorize(&normalize("soup soup soup"));
        assert!((features.get(1) - (1.0 + 3f64.ln())).abs() < 1e-12);
    }

    #[test]
    fn test_empty_text_is_zero_vector() {
        let vectorizer = TfIdfVectorizer::from_artifact(artifact(Some(Norm::L2), false)).unwrap();
        let features = vectorizer.vectorize(&normalize(""));
        assert!(features.is_zero());
        assert_eq!(features.dimension(), 4);
    }

    #[test]
    fn test_deterministic() {
        let vectorizer = TfIdfVectorizer::from_artifact(artifact(Some(Norm::L2), true)).unwrap();
        let text = normalize("the soup was not delicious and not cold");
        assert_eq!(vectorizer.vectorize(&text), vectorizer.vectorize(&text));
    }

    #[test]
    fn test_idf_length_mismatch() {
        let mut bad = artifact(None, false);
        bad.idf.pop();
        assert!(TfIdfVectorizer::from_artifact(bad).is_err());
    }
}

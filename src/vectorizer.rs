//! Feature vectorization of normalized review text.
//!
//! A vectorizer is fit ahead of time by an external training process and
//! shipped as a [`VectorizerArtifact`]. Loading it produces a [`Vectorizer`]
//! whose output dimension is fixed for the lifetime of the instance.
//!
//! # Available Vectorizers
//!
//! - [`count::CountVectorizer`] - Raw or binary n-gram counts
//! - [`tfidf::TfIdfVectorizer`] - TF-IDF weighted n-gram counts
//!
//! # Examples
//!
//! ```
//! use palate::analysis::normalizer::normalize;
//! use palate::vectorizer::{self, VectorizerArtifact};
//!
//! let artifact: VectorizerArtifact = serde_json::from_str(
//!     r#"{"count": {"vocabulary": {"good": 0, "bad": 1}}}"#,
//! ).unwrap();
//! let vectorizer = vectorizer::from_artifact(artifact).unwrap();
//!
//! let features = vectorizer.vectorize(&normalize("Good, good food"));
//! assert_eq!(features.dimension(), 2);
//! assert_eq!(features.get(0), 2.0);
//! ```

pub mod count;
pub mod feature;
pub mod tfidf;
pub mod vocabulary;

use std::sync::Arc;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::NormalizedText;
use crate::error::Result;

pub use feature::FeatureVector;

/// Maps normalized text to a fixed-dimension feature vector.
///
/// Implementations are read-only after construction, so one instance can
/// serve concurrent requests without locking.
pub trait Vectorizer: Send + Sync + std::fmt::Debug {
    /// Vectorize normalized text. Out-of-vocabulary tokens contribute nothing.
    fn vectorize(&self, text: &NormalizedText) -> FeatureVector;

    /// Dimension of every vector this instance produces.
    fn dimension(&self) -> usize;

    /// Get the name of this vectorizer for debugging and logging.
    fn name(&self) -> &'static str;
}

/// Row normalization applied after weighting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_min_token_len() -> usize {
    2
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

/// Fitted state of a count vectorizer.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CountArtifact {
    pub vocabulary: AHashMap<String, usize>,
    #[serde(default)]
    pub binary: bool,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    #[serde(default = "default_min_token_len")]
    pub min_token_len: usize,
}

/// Fitted state of a TF-IDF vectorizer.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TfIdfArtifact {
    pub vocabulary: AHashMap<String, usize>,
    pub idf: Vec<f64>,
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default = "default_norm")]
    pub norm: Option<Norm>,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    #[serde(default = "default_min_token_len")]
    pub min_token_len: usize,
}

/// A serialized, fitted vectorizer.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VectorizerArtifact {
    Count(CountArtifact),
    Tfidf(TfIdfArtifact),
}

/// Build a vectorizer from its fitted artifact.
pub fn from_artifact(artifact: VectorizerArtifact) -> Result<Arc<dyn Vectorizer>> {
    Ok(match artifact {
        VectorizerArtifact::Count(a) => Arc::new(count::CountVectorizer::from_artifact(a)?),
        VectorizerArtifact::Tfidf(a) => Arc::new(tfidf::TfIdfVectorizer::from_artifact(a)?),
    })
}

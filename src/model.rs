//! Sentiment classifiers.
//!
//! Every classifier implements [`SentimentModel`]: a hard label for a feature
//! vector and, where the model supports it, a probability distribution over
//! its classes. Three families are provided:
//!
//! - [`svm::LinearSvc`] - Linear support vector machine (labels only)
//! - [`naive_bayes::MultinomialNb`] - Multinomial naive Bayes
//! - [`logistic::LogisticRegression`] - Logistic regression
//!
//! Models are immutable after loading; inference is pure computation, so a
//! single instance can be shared across threads behind an `Arc`.

pub mod artifact;
pub mod kind;
pub mod label;
pub mod linear;
pub mod logistic;
mod math;
pub mod naive_bayes;
pub mod registry;
pub mod svm;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{PalateError, Result};
use crate::vectorizer::FeatureVector;

pub use artifact::ModelArtifact;
pub use kind::ModelKind;
pub use label::Label;
pub use registry::{Availability, ModelRegistry};

/// Tolerance on the total probability mass of a distribution.
const DISTRIBUTION_TOLERANCE: f64 = 1e-6;

/// Sentiment classifier trait.
pub trait SentimentModel: Send + Sync + std::fmt::Debug {
    /// Predict the label for a feature vector.
    fn predict(&self, features: &FeatureVector) -> Result<Label>;

    /// Class probabilities, or `None` when the model cannot provide them.
    fn predict_distribution(&self, features: &FeatureVector) -> Result<Option<ClassDistribution>>;

    /// Dimension of the feature vectors this model accepts.
    fn n_features(&self) -> usize;

    /// Classes the model can emit, in its internal order.
    fn classes(&self) -> &[Label];

    /// Get the name of this model for debugging and logging.
    fn name(&self) -> &'static str;
}

/// Probability per label, each in `[0, 1]`, summing to one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassDistribution(BTreeMap<Label, f64>);

impl ClassDistribution {
    /// Validate and collect `(label, probability)` pairs.
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Label, f64)>,
    {
        let mut probabilities = BTreeMap::new();
        for (label, p) in pairs {
            if !p.is_finite() || !(0.0..=1.0).contains(&p) {
                return Err(PalateError::model(format!(
                    "probability {p} for '{label}' is outside [0, 1]"
                )));
            }
            if probabilities.insert(label, p).is_some() {
                return Err(PalateError::model(format!("label '{label}' appears twice")));
            }
        }
        if probabilities.is_empty() {
            return Err(PalateError::model("empty probability distribution"));
        }
        let total: f64 = probabilities.values().sum();
        if (total - 1.0).abs() > DISTRIBUTION_TOLERANCE {
            return Err(PalateError::model(format!(
                "probabilities sum to {total}, expected 1"
            )));
        }
        Ok(Self(probabilities))
    }

    /// Probability of a label (zero if the model does not know it).
    pub fn get(&self, label: Label) -> f64 {
        self.0.get(&label).copied().unwrap_or(0.0)
    }

    /// The most probable label and its probability.
    pub fn max(&self) -> Option<(Label, f64)> {
        self.0
            .iter()
            .fold(None, |best: Option<(Label, f64)>, (&label, &p)| match best {
                Some((_, best_p)) if best_p >= p => best,
                _ => Some((label, p)),
            })
    }

    /// Iterate over `(label, probability)` in label order.
    pub fn iter(&self) -> impl Iterator<Item = (Label, f64)> + '_ {
        self.0.iter().map(|(&label, &p)| (label, p))
    }

    /// Number of labels in the distribution.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the distribution is empty (never true for a validated one).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

//! Logistic regression.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::label::Label;
use crate::model::linear::LinearWeights;
use crate::model::math::{sigmoid, softmax};
use crate::model::{ClassDistribution, SentimentModel};
use crate::vectorizer::FeatureVector;

/// How a multiclass logistic regression turns scores into probabilities.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MultiClass {
    /// Softmax over all rows.
    #[default]
    Multinomial,
    /// Independent sigmoids, renormalized.
    Ovr,
}

/// A logistic regression classifier with calibrated class probabilities.
#[derive(Clone, Debug)]
pub struct LogisticRegression {
    weights: LinearWeights,
    multi_class: MultiClass,
}

impl LogisticRegression {
    /// Wrap validated weights.
    pub fn new(weights: LinearWeights, multi_class: MultiClass) -> Self {
        Self {
            weights,
            multi_class,
        }
    }

    fn probabilities(&self, scores: &[f64]) -> Vec<f64> {
        if self.weights.is_binary() {
            let p = sigmoid(scores[0]);
            return vec![1.0 - p, p];
        }
        match self.multi_class {
            MultiClass::Multinomial => softmax(scores),
            MultiClass::Ovr => {
                let raw: Vec<f64> = scores.iter().map(|s| sigmoid(*s)).collect();
                let sum: f64 = raw.iter().sum();
                raw.into_iter().map(|p| p / sum).collect()
            }
        }
    }
}

impl SentimentModel for LogisticRegression {
    fn predict(&self, features: &FeatureVector) -> Result<Label> {
        let scores = self.weights.decision_function(features)?;
        Ok(self.weights.winner(&scores))
    }

    fn predict_distribution(&self, features: &FeatureVector) -> Result<Option<ClassDistribution>> {
        let scores = self.weights.decision_function(features)?;
        let probabilities = self.probabilities(&scores);
        ClassDistribution::from_pairs(
            self.weights.classes().iter().copied().zip(probabilities),
        )
        .map(Some)
    }

    fn n_features(&self) -> usize {
        self.weights.n_features()
    }

    fn classes(&self) -> &[Label] {
        self.weights.classes()
    }

    fn name(&self) -> &'static str {
        "logistic_regression"
    }
}

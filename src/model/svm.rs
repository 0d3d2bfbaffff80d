//! Linear support vector machine.

use crate::error::Result;
use crate::model::label::Label;
use crate::model::linear::LinearWeights;
use crate::model::{ClassDistribution, SentimentModel};
use crate::vectorizer::FeatureVector;

/// A linear SVM. It produces hard labels only; margins are not calibrated
/// probabilities, so no distribution is reported.
#[derive(Clone, Debug)]
pub struct LinearSvc {
    weights: LinearWeights,
}

impl LinearSvc {
    /// Wrap validated weights.
    pub fn new(weights: LinearWeights) -> Self {
        Self { weights }
    }

    /// Signed distances to the decision boundary.
    pub fn decision_function(&self, features: &FeatureVector) -> Result<Vec<f64>> {
        self.weights.decision_function(features)
    }
}

impl SentimentModel for LinearSvc {
    fn predict(&self, features: &FeatureVector) -> Result<Label> {
        let scores = self.weights.decision_function(features)?;
        Ok(self.weights.winner(&scores))
    }

    fn predict_distribution(&self, _features: &FeatureVector) -> Result<Option<ClassDistribution>> {
        Ok(None)
    }

    fn n_features(&self) -> usize {
        self.weights.n_features()
    }

    fn classes(&self) -> &[Label] {
        self.weights.classes()
    }

    fn name(&self) -> &'static str {
        "linear_svc"
    }
}

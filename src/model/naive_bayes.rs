//! Multinomial naive Bayes.

use crate::error::{PalateError, Result};
use crate::model::label::Label;
use crate::model::linear::{check_dimension, validate_classes, validate_matrix};
use crate::model::math::{argmax, softmax};
use crate::model::{ClassDistribution, SentimentModel};
use crate::vectorizer::FeatureVector;

/// Multinomial naive Bayes over count or TF-IDF features.
///
/// The joint log likelihood of class `c` is
/// `class_log_prior[c] + sum_i x_i * feature_log_prob[c][i]`; probabilities
/// are its softmax.
#[derive(Clone, Debug)]
pub struct MultinomialNb {
    classes: Vec<Label>,
    class_log_prior: Vec<f64>,
    feature_log_prob: Vec<Vec<f64>>,
    n_features: usize,
}

impl MultinomialNb {
    /// Validate fitted parameters.
    pub fn new(
        classes: Vec<Label>,
        class_log_prior: Vec<f64>,
        feature_log_prob: Vec<Vec<f64>>,
    ) -> Result<Self> {
        validate_classes(&classes)?;
        if class_log_prior.len() != classes.len() {
            return Err(PalateError::artifact(format!(
                "expected {} class log priors, found {}",
                classes.len(),
                class_log_prior.len()
            )));
        }
        if class_log_prior.iter().any(|p| !p.is_finite()) {
            return Err(PalateError::artifact("class_log_prior contains a non-finite value"));
        }
        if feature_log_prob.len() != classes.len() {
            return Err(PalateError::artifact(format!(
                "expected {} feature_log_prob rows, found {}",
                classes.len(),
                feature_log_prob.len()
            )));
        }
        let n_features = validate_matrix(&feature_log_prob, "feature_log_prob")?;

        Ok(Self {
            classes,
            class_log_prior,
            feature_log_prob,
            n_features,
        })
    }

    /// Joint log likelihood per class.
    pub fn joint_log_likelihood(&self, features: &FeatureVector) -> Result<Vec<f64>> {
        check_dimension(self.n_features, features)?;
        Ok(self
            .class_log_prior
            .iter()
            .zip(&self.feature_log_prob)
            .map(|(prior, row)| prior + features.dot(row))
            .collect())
    }
}

impl SentimentModel for MultinomialNb {
    fn predict(&self, features: &FeatureVector) -> Result<Label> {
        let jll = self.joint_log_likelihood(features)?;
        Ok(self.classes[argmax(&jll)])
    }

    fn predict_distribution(&self, features: &FeatureVector) -> Result<Option<ClassDistribution>> {
        let jll = self.joint_log_likelihood(features)?;
        ClassDistribution::from_pairs(self.classes.iter().copied().zip(softmax(&jll))).map(Some)
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn classes(&self) -> &[Label] {
        &self.classes
    }

    fn name(&self) -> &'static str {
        "multinomial_nb"
    }
}

//! Serialized classifier artifacts.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::kind::ModelKind;
use crate::model::label::Label;
use crate::model::linear::LinearWeights;
use crate::model::logistic::{LogisticRegression, MultiClass};
use crate::model::naive_bayes::MultinomialNb;
use crate::model::svm::LinearSvc;
use crate::model::SentimentModel;

/// Fitted parameters of one classifier, as exported by the training process.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelArtifact {
    LinearSvc {
        classes: Vec<Label>,
        coef: Vec<Vec<f64>>,
        intercept: Vec<f64>,
    },
    MultinomialNb {
        classes: Vec<Label>,
        class_log_prior: Vec<f64>,
        feature_log_prob: Vec<Vec<f64>>,
    },
    LogisticRegression {
        classes: Vec<Label>,
        coef: Vec<Vec<f64>>,
        intercept: Vec<f64>,
        #[serde(default)]
        multi_class: MultiClass,
    },
}

impl ModelArtifact {
    /// The registry slot this artifact fills.
    pub fn kind(&self) -> ModelKind {
        match self {
            ModelArtifact::LinearSvc { .. } => ModelKind::SupportVectorMachine,
            ModelArtifact::MultinomialNb { .. } => ModelKind::MultinomialNaiveBayes,
            ModelArtifact::LogisticRegression { .. } => ModelKind::LogisticRegression,
        }
    }

    /// Validate the parameters and build the classifier.
    pub fn into_model(self) -> Result<Arc<dyn SentimentModel>> {
        Ok(match self {
            ModelArtifact::LinearSvc {
                classes,
                coef,
                intercept,
            } => Arc::new(LinearSvc::new(LinearWeights::new(classes, coef, intercept)?)),
            ModelArtifact::MultinomialNb {
                classes,
                class_log_prior,
                feature_log_prob,
            } => Arc::new(MultinomialNb::new(classes, class_log_prior, feature_log_prob)?),
            ModelArtifact::LogisticRegression {
                classes,
                coef,
                intercept,
                multi_class,
            } => Arc::new(LogisticRegression::new(
                LinearWeights::new(classes, coef, intercept)?,
                multi_class,
            )),
        })
    }
}

//! Single-model prediction with confidence derivation.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::analysis::normalizer::NormalizedText;
use crate::error::{PalateError, Result};
use crate::model::{ClassDistribution, Label, ModelKind, SentimentModel};
use crate::sentiment::heuristic::KeywordHeuristic;
use crate::vectorizer::FeatureVector;

/// How a model slot produces its verdict.
#[derive(Clone)]
pub enum Strategy {
    /// A loaded, trained classifier.
    Trained(Arc<dyn SentimentModel>),
    /// Degraded mode: keyword counting over the normalized text.
    HeuristicKeywordCount,
}

impl fmt::Debug for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Trained(model) => f.debug_tuple("Trained").field(&model.name()).finish(),
            Strategy::HeuristicKeywordCount => f.write_str("HeuristicKeywordCount"),
        }
    }
}

/// Where a prediction came from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum PredictionSource {
    Trained {
        model: &'static str,
    },
    Heuristic {
        positive_hits: u32,
        negative_hits: u32,
        jittered: bool,
    },
}

/// One model's verdict on one review.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Prediction {
    pub label: Label,
    /// Probability of the most likely class; `None` when the model cannot
    /// supply probabilities. Never a substitute for zero.
    pub confidence: Option<f64>,
    pub source: PredictionSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distribution: Option<ClassDistribution>,
}

impl Prediction {
    /// Whether this verdict came from the keyword heuristic.
    pub fn is_heuristic(&self) -> bool {
        matches!(self.source, PredictionSource::Heuristic { .. })
    }
}

/// A review after the shared stages: normalized once, vectorized once.
#[derive(Clone, Debug)]
pub struct PreparedReview {
    pub text: NormalizedText,
    /// Absent only in a pipeline running without a vectorizer.
    pub features: Option<FeatureVector>,
}

/// Binds a model kind to the strategy that serves it.
#[derive(Clone, Debug)]
pub struct SentimentPredictor {
    kind: ModelKind,
    strategy: Strategy,
}

impl SentimentPredictor {
    /// Serve `kind` with a trained model.
    pub fn trained(kind: ModelKind, model: Arc<dyn SentimentModel>) -> Self {
        Self {
            kind,
            strategy: Strategy::Trained(model),
        }
    }

    /// Serve `kind` with the keyword heuristic.
    pub fn heuristic(kind: ModelKind) -> Self {
        Self {
            kind,
            strategy: Strategy::HeuristicKeywordCount,
        }
    }

    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    /// Predict a label for a prepared review.
    ///
    /// A failing distribution call on a trained model degrades to an absent
    /// confidence; only a failing label call is an error.
    pub fn predict(
        &self,
        review: &PreparedReview,
        heuristic: &KeywordHeuristic,
    ) -> Result<Prediction> {
        let prediction = match &self.strategy {
            Strategy::Trained(model) => {
                let features = review.features.as_ref().ok_or_else(|| {
                    PalateError::model(format!("model '{}' needs a feature vector", self.kind))
                })?;
                predict_trained(self.kind, model.as_ref(), features)?
            }
            Strategy::HeuristicKeywordCount => {
                let verdict = heuristic.classify(&review.text)?;
                tracing::warn!(
                    model = %self.kind,
                    label = %verdict.label,
                    jittered = verdict.jittered,
                    "serving heuristic verdict in place of a trained model"
                );
                Prediction {
                    label: verdict.label,
                    confidence: Some(verdict.confidence),
                    source: PredictionSource::Heuristic {
                        positive_hits: verdict.counts.positive,
                        negative_hits: verdict.counts.negative,
                        jittered: verdict.jittered,
                    },
                    distribution: None,
                }
            }
        };

        tracing::debug!(
            model = %self.kind,
            label = %prediction.label,
            confidence = ?prediction.confidence,
            "prediction"
        );
        Ok(prediction)
    }
}

fn predict_trained(
    kind: ModelKind,
    model: &dyn SentimentModel,
    features: &FeatureVector,
) -> Result<Prediction> {
    let label = model.predict(features)?;
    let distribution = match model.predict_distribution(features) {
        Ok(distribution) => distribution,
        Err(e) => {
            tracing::warn!(
                model = %kind,
                error = %e,
                "probability distribution failed; confidence unreported"
            );
            None
        }
    };
    let confidence = distribution.as_ref().and_then(|d| d.max()).map(|(_, p)| p);

    Ok(Prediction {
        label,
        confidence,
        source: PredictionSource::Trained { model: model.name() },
        distribution,
    })
}

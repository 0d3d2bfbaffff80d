//! Multi-model comparison and consensus.
//!
//! Every served model sees the same [`PreparedReview`]: the review is
//! normalized and vectorized once before the fan-out. Per-model predictions
//! are independent, so running them on a thread pool gives the same report
//! as running them in order.

use std::collections::BTreeMap;

use rayon::ThreadPool;
use rayon::prelude::*;
use serde::Serialize;

use crate::analysis::normalizer::NormalizedText;
use crate::model::{Label, ModelKind};
use crate::sentiment::heuristic::KeywordHeuristic;
use crate::sentiment::predictor::{Prediction, PreparedReview, SentimentPredictor};

/// Whether the models agree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Consensus {
    Unanimous,
    Split,
}

/// Per-model verdicts on one review, folded into a consensus.
#[derive(Clone, Debug, Serialize)]
pub struct ComparisonReport {
    pub normalized_text: NormalizedText,
    pub per_model: BTreeMap<ModelKind, Prediction>,
    /// Kinds that produced no verdict, with the reason.
    pub skipped: BTreeMap<ModelKind, String>,
    pub consensus: Consensus,
    pub unanimous_label: Option<Label>,
    pub majority_label: Option<Label>,
}

impl ComparisonReport {
    /// Fold per-model results into a report.
    pub fn new(
        normalized_text: NormalizedText,
        per_model: BTreeMap<ModelKind, Prediction>,
        skipped: BTreeMap<ModelKind, String>,
    ) -> Self {
        let labels: Vec<Label> = per_model.values().map(|p| p.label).collect();
        let unanimous_label = unanimous(&labels);
        Self {
            normalized_text,
            consensus: if unanimous_label.is_some() {
                Consensus::Unanimous
            } else {
                Consensus::Split
            },
            unanimous_label,
            majority_label: majority(&labels),
            per_model,
            skipped,
        }
    }

    /// Whether any verdict came from the keyword heuristic.
    pub fn is_degraded(&self) -> bool {
        self.per_model.values().any(Prediction::is_heuristic)
    }
}

/// The shared label, if there is at least one and they all agree.
fn unanimous(labels: &[Label]) -> Option<Label> {
    let first = *labels.first()?;
    labels.iter().all(|&l| l == first).then_some(first)
}

/// The most frequent label; a tie for first place is neutral.
fn majority(labels: &[Label]) -> Option<Label> {
    let mut votes: BTreeMap<Label, usize> = BTreeMap::new();
    for &label in labels {
        *votes.entry(label).or_default() += 1;
    }
    let top = *votes.values().max()?;
    let mut leaders = votes.iter().filter(|&(_, &n)| n == top).map(|(&l, _)| l);
    match (leaders.next(), leaders.next()) {
        (Some(label), None) => Some(label),
        _ => Some(Label::Neutral),
    }
}

/// Run every predictor on the same prepared review.
///
/// A predictor whose label call fails lands in `skipped` next to the kinds
/// that were never served.
pub fn compare(
    predictors: &[SentimentPredictor],
    review: &PreparedReview,
    heuristic: &KeywordHeuristic,
    unavailable: &BTreeMap<ModelKind, String>,
    pool: Option<&ThreadPool>,
) -> ComparisonReport {
    let run = |predictor: &SentimentPredictor| {
        (predictor.kind(), predictor.predict(review, heuristic))
    };
    let results: Vec<_> = match pool {
        Some(pool) => pool.install(|| predictors.par_iter().map(run).collect()),
        None => predictors.iter().map(run).collect(),
    };

    let mut per_model = BTreeMap::new();
    let mut skipped = unavailable.clone();
    for (kind, result) in results {
        match result {
            Ok(prediction) => {
                per_model.insert(kind, prediction);
            }
            Err(e) => {
                tracing::warn!(model = %kind, error = %e, "prediction failed during comparison");
                skipped.insert(kind, e.to_string());
            }
        }
    }

    let report = ComparisonReport::new(review.text.clone(), per_model, skipped);
    tracing::debug!(
        consensus = ?report.consensus,
        models = report.per_model.len(),
        skipped = report.skipped.len(),
        "comparison"
    );
    report
}

//! Classifier kinds known to the registry.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PalateError, Result};

/// The classifier families a registry can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ModelKind {
    #[serde(rename = "svm")]
    SupportVectorMachine,
    #[serde(rename = "mnb")]
    MultinomialNaiveBayes,
    #[serde(rename = "logreg")]
    LogisticRegression,
}

impl ModelKind {
    /// Every kind, in registry order.
    pub const ALL: [ModelKind; 3] = [
        ModelKind::SupportVectorMachine,
        ModelKind::MultinomialNaiveBayes,
        ModelKind::LogisticRegression,
    ];

    /// Short identifier used in CLI flags, JSON output and logs.
    pub fn id(&self) -> &'static str {
        match self {
            ModelKind::SupportVectorMachine => "svm",
            ModelKind::MultinomialNaiveBayes => "mnb",
            ModelKind::LogisticRegression => "logreg",
        }
    }

    /// Human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            ModelKind::SupportVectorMachine => "Support Vector Machine",
            ModelKind::MultinomialNaiveBayes => "Naive Bayes",
            ModelKind::LogisticRegression => "Logistic Regression",
        }
    }

    /// File stem of this kind's artifact.
    pub fn artifact_stem(&self) -> &'static str {
        match self {
            ModelKind::SupportVectorMachine => "svm_model",
            ModelKind::MultinomialNaiveBayes => "mnb_model",
            ModelKind::LogisticRegression => "log_reg_model",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ModelKind {
    type Err = PalateError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        ModelKind::ALL
            .into_iter()
            .find(|kind| {
                wanted == kind.id()
                    || wanted == kind.artifact_stem()
                    || wanted == kind.display_name().to_ascii_lowercase()
            })
            .ok_or_else(|| {
                PalateError::other(format!(
                    "unknown model '{s}' (expected one of: svm, mnb, logreg)"
                ))
            })
    }
}

//! Registry of loaded classifiers.
//!
//! Loading is one pass over [`ModelKind::ALL`]. A kind whose artifact is
//! missing, corrupt, or incompatible with the loaded vectorizer is recorded as
//! unavailable with the reason; the other kinds are unaffected.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PalateError, Result};
use crate::model::{ModelKind, SentimentModel};
use crate::provider::ArtifactProvider;

/// Whether a model kind can be selected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "lowercase")]
pub enum Availability {
    Available,
    Unavailable(String),
}

impl Availability {
    /// Whether the kind loaded successfully.
    pub fn is_available(&self) -> bool {
        matches!(self, Availability::Available)
    }
}

/// Immutable set of loaded classifiers plus the reasons others failed.
#[derive(Clone)]
pub struct ModelRegistry {
    models: BTreeMap<ModelKind, Arc<dyn SentimentModel>>,
    failures: BTreeMap<ModelKind, String>,
    loaded_at: DateTime<Utc>,
}

impl fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelRegistry")
            .field("available", &self.models.keys().collect::<Vec<_>>())
            .field("failures", &self.failures)
            .field("loaded_at", &self.loaded_at)
            .finish()
    }
}

impl ModelRegistry {
    /// Load every model kind from `provider`, checking each against the
    /// vectorizer dimension `n_features`.
    pub fn load(provider: &dyn ArtifactProvider, n_features: usize) -> Self {
        let mut models = BTreeMap::new();
        let mut failures = BTreeMap::new();

        for kind in ModelKind::ALL {
            match Self::load_one(provider, kind, n_features) {
                Ok(model) => {
                    tracing::debug!(model = %kind, name = model.name(), "model loaded");
                    models.insert(kind, model);
                }
                Err(e) => {
                    tracing::warn!(
                        model = %kind,
                        provider = provider.name(),
                        error = %e,
                        "model unavailable"
                    );
                    failures.insert(kind, e.to_string());
                }
            }
        }

        Self {
            models,
            failures,
            loaded_at: Utc::now(),
        }
    }

    fn load_one(
        provider: &dyn ArtifactProvider,
        kind: ModelKind,
        n_features: usize,
    ) -> Result<Arc<dyn SentimentModel>> {
        let artifact = provider.model(kind)?;
        if artifact.kind() != kind {
            return Err(PalateError::artifact(format!(
                "artifact holds a '{}' model",
                artifact.kind()
            )));
        }
        let model = artifact.into_model()?;
        if model.n_features() != n_features {
            return Err(PalateError::DimensionMismatch {
                expected: n_features,
                actual: model.n_features(),
            });
        }
        Ok(model)
    }

    /// Build a registry from models constructed elsewhere.
    ///
    /// Kinds not supplied are recorded as unavailable.
    pub fn from_models<I>(models: I) -> Self
    where
        I: IntoIterator<Item = (ModelKind, Arc<dyn SentimentModel>)>,
    {
        let models: BTreeMap<_, _> = models.into_iter().collect();
        let failures = ModelKind::ALL
            .into_iter()
            .filter(|kind| !models.contains_key(kind))
            .map(|kind| (kind, "not supplied".to_string()))
            .collect();
        Self {
            models,
            failures,
            loaded_at: Utc::now(),
        }
    }

    /// A registry in which every kind is unavailable for the same reason.
    pub fn empty<S: Into<String>>(reason: S) -> Self {
        let reason = reason.into();
        Self {
            models: BTreeMap::new(),
            failures: ModelKind::ALL
                .into_iter()
                .map(|kind| (kind, reason.clone()))
                .collect(),
            loaded_at: Utc::now(),
        }
    }

    /// The model for a kind, or why it cannot be selected.
    pub fn get(&self, kind: ModelKind) -> Result<&Arc<dyn SentimentModel>> {
        self.models.get(&kind).ok_or_else(|| {
            PalateError::unavailable(
                kind,
                self.failures
                    .get(&kind)
                    .cloned()
                    .unwrap_or_else(|| "not loaded".to_string()),
            )
        })
    }

    /// Loaded models in kind order.
    pub fn available(&self) -> impl Iterator<Item = (ModelKind, &Arc<dyn SentimentModel>)> {
        self.models.iter().map(|(kind, model)| (*kind, model))
    }

    /// Why each unavailable kind failed.
    pub fn failures(&self) -> &BTreeMap<ModelKind, String> {
        &self.failures
    }

    /// Availability of every kind, in kind order.
    pub fn availability(&self) -> Vec<(ModelKind, Availability)> {
        ModelKind::ALL
            .into_iter()
            .map(|kind| {
                let status = if self.models.contains_key(&kind) {
                    Availability::Available
                } else {
                    Availability::Unavailable(
                        self.failures
                            .get(&kind)
                            .cloned()
                            .unwrap_or_else(|| "not loaded".to_string()),
                    )
                };
                (kind, status)
            })
            .collect()
    }

    /// Number of loaded models.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Whether no model loaded.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// When the registry was built.
    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Label, ModelArtifact};
    use crate::provider::MemoryProvider;

    fn svm(n_features: usize) -> ModelArtifact {
        ModelArtifact::LinearSvc {
            classes: vec![Label::Negative, Label::Positive],
            coef: vec![vec![1.0; n_features]],
            intercept: vec![0.0],
        }
    }

    fn logreg(n_features: usize) -> ModelArtifact {
        ModelArtifact::LogisticRegression {
            classes: vec![Label::Negative, Label::Positive],
            coef: vec![vec![1.0; n_features]],
            intercept: vec![0.0],
            multi_class: Default::default(),
        }
    }

    #[test]
    fn test_partial_availability() {
        let provider = MemoryProvider::new()
            .with_model(ModelKind::SupportVectorMachine, svm(3))
            .with_model(ModelKind::LogisticRegression, logreg(3));

        let registry = ModelRegistry::load(&provider, 3);
        assert_eq!(registry.len(), 2);
        assert!(registry.get(ModelKind::SupportVectorMachine).is_ok());

        let err = registry.get(ModelKind::MultinomialNaiveBayes).unwrap_err();
        assert!(matches!(
            err,
            PalateError::ModelUnavailable {
                kind: ModelKind::MultinomialNaiveBayes,
                ..
            }
        ));
        assert!(registry.failures().contains_key(&ModelKind::MultinomialNaiveBayes));
    }

    #[test]
    fn test_dimension_mismatch_disables_one_kind() {
        let provider = MemoryProvider::new()
            .with_model(ModelKind::SupportVectorMachine, svm(3))
            .with_model(ModelKind::LogisticRegression, logreg(5));

        let registry = ModelRegistry::load(&provider, 3);
        let availability = registry.availability();
        assert_eq!(availability[0], (ModelKind::SupportVectorMachine, Availability::Available));
        match &availability[2].1 {
            Availability::Unavailable(reason) => assert!(reason.contains("dimension mismatch")),
            other => panic!("unexpected availability: {other:?}"),
        }
    }

    #[test]
    fn test_artifact_in_wrong_slot() {
        let provider = MemoryProvider::new().with_model(ModelKind::LogisticRegression, svm(2));
        let registry = ModelRegistry::load(&provider, 2);
        assert!(registry.is_empty());
        assert!(registry.failures()[&ModelKind::LogisticRegression].contains("svm"));
    }

    #[test]
    fn test_from_models() {
        let model = svm(2).into_model().unwrap();
        let registry = ModelRegistry::from_models([(ModelKind::SupportVectorMachine, model)]);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.failures().len(), 2);
        assert_eq!(
            registry.available().map(|(kind, _)| kind).collect::<Vec<_>>(),
            vec![ModelKind::SupportVectorMachine]
        );
    }

    #[test]
    fn test_empty_registry() {
        let registry = ModelRegistry::empty("no vectorizer");
        assert!(registry.is_empty());
        assert!(
            registry
                .availability()
                .iter()
                .all(|(_, a)| *a == Availability::Unavailable("no vectorizer".into()))
        );
    }

    #[test]
    fn test_availability_json() {
        let json = serde_json::to_string(&Availability::Unavailable("missing".into())).unwrap();
        assert_eq!(json, r#"{"status":"unavailable","reason":"missing"}"#);
    }
}

//! Artifacts held in memory.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::{PalateError, Result};
use crate::model::{ModelArtifact, ModelKind};
use crate::provider::ArtifactProvider;
use crate::vectorizer::VectorizerArtifact;

/// A provider over artifacts that were obtained some other way.
#[derive(Clone, Debug, Default)]
pub struct MemoryProvider {
    vectorizers: HashMap<String, VectorizerArtifact>,
    models: HashMap<ModelKind, ModelArtifact>,
}

impl MemoryProvider {
    /// Create an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a vectorizer artifact under a stem.
    pub fn with_vectorizer<S: Into<String>>(
        mut self,
        stem: S,
        artifact: VectorizerArtifact,
    ) -> Self {
        self.vectorizers.insert(stem.into(), artifact);
        self
    }

    /// Register a model artifact for a kind.
    pub fn with_model(mut self, kind: ModelKind, artifact: ModelArtifact) -> Self {
        self.models.insert(kind, artifact);
        self
    }
}

impl ArtifactProvider for MemoryProvider {
    fn vectorizer(&self, stem: &str) -> Result<Option<VectorizerArtifact>> {
        Ok(self.vectorizers.get(stem).cloned())
    }

    fn model(&self, kind: ModelKind) -> Result<ModelArtifact> {
        self.models
            .get(&kind)
            .cloned()
            .ok_or_else(|| PalateError::artifact(format!("no in-memory artifact for '{kind}'")))
    }

    fn locations(&self, stem: &str) -> Vec<PathBuf> {
        vec![PathBuf::from(format!("memory://{stem}"))]
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

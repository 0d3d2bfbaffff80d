//! Artifacts stored as files in one directory.

use std::path::{Path, PathBuf};

use crate::error::{PalateError, Result};
use crate::model::{ModelArtifact, ModelKind};
use crate::provider::ArtifactProvider;
use crate::provider::format::{ArtifactFormat, read_artifact};
use crate::vectorizer::VectorizerArtifact;

/// Resolves `<stem>.json`, then `<stem>.bin`, under a root directory.
#[derive(Clone, Debug)]
pub struct DirectoryProvider {
    root: PathBuf,
}

impl DirectoryProvider {
    /// Create a provider rooted at `root`.
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// The directory being probed.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, stem: &str) -> Option<PathBuf> {
        self.locations(stem).into_iter().find(|path| path.is_file())
    }
}

impl ArtifactProvider for DirectoryProvider {
    fn vectorizer(&self, stem: &str) -> Result<Option<VectorizerArtifact>> {
        match self.resolve(stem) {
            Some(path) => read_artifact(&path).map(Some),
            None => Ok(None),
        }
    }

    fn model(&self, kind: ModelKind) -> Result<ModelArtifact> {
        let stem = kind.artifact_stem();
        match self.resolve(stem) {
            Some(path) => read_artifact(&path),
            None => Err(PalateError::artifact(format!(
                "no artifact found (tried {})",
                self.locations(stem)
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            ))),
        }
    }

    fn locations(&self, stem: &str) -> Vec<PathBuf> {
        ArtifactFormat::ALL
            .iter()
            .map(|format| self.root.join(format!("{stem}.{}", format.extension())))
            .collect()
    }

    fn name(&self) -> &'static str {
        "directory"
    }
}

//! Sources of fitted artifacts.
//!
//! The pipeline does not care how artifacts were produced or where they live;
//! it asks an [`ArtifactProvider`] for a vectorizer under a list of candidate
//! names and for one model per [`ModelKind`].
//!
//! - [`directory::DirectoryProvider`] - `<stem>.json` / `<stem>.bin` files in a directory
//! - [`memory::MemoryProvider`] - artifacts handed over in memory

pub mod directory;
pub mod format;
pub mod memory;

use std::path::PathBuf;
use std::sync::Arc;

use crate::error::{PalateError, Result};
use crate::model::{ModelArtifact, ModelKind};
use crate::vectorizer::{self, Vectorizer, VectorizerArtifact};

pub use directory::DirectoryProvider;
pub use memory::MemoryProvider;

/// Artifact source trait.
pub trait ArtifactProvider: Send + Sync {
    /// The vectorizer stored under `stem`, or `None` if nothing resolves.
    ///
    /// An artifact that exists but cannot be decoded is an error.
    fn vectorizer(&self, stem: &str) -> Result<Option<VectorizerArtifact>>;

    /// The artifact for one model kind.
    fn model(&self, kind: ModelKind) -> Result<ModelArtifact>;

    /// Where `stem` is looked up, for error reporting.
    fn locations(&self, stem: &str) -> Vec<PathBuf>;

    /// Get the name of this provider for debugging and logging.
    fn name(&self) -> &'static str;
}

/// Probe vectorizer candidates in order and load the first that resolves.
///
/// Returns the winning stem with the loaded vectorizer. A candidate that
/// resolves but fails to decode ends the search with
/// [`PalateError::VectorizerCorrupt`].
pub fn load_vectorizer(
    provider: &dyn ArtifactProvider,
    candidates: &[String],
) -> Result<(String, Arc<dyn Vectorizer>)> {
    let mut searched = Vec::new();
    for stem in candidates {
        let corrupt = |e: PalateError| PalateError::VectorizerCorrupt {
            stem: stem.clone(),
            reason: e.to_string(),
        };
        if let Some(artifact) = provider.vectorizer(stem).map_err(corrupt)? {
            let loaded = vectorizer::from_artifact(artifact).map_err(corrupt)?;
            return Ok((stem.clone(), loaded));
        }
        searched.extend(provider.locations(stem));
    }
    Err(PalateError::VectorizerNotFound { searched })
}

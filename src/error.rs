//! Error types for the Palate library.
//!
//! All errors are represented by the [`PalateError`] enum. Variants fall into
//! three groups:
//!
//! - fatal initialization failures ([`PalateError::VectorizerNotFound`],
//!   [`PalateError::VectorizerCorrupt`], [`PalateError::NoModelsAvailable`])
//!   that stop the pipeline from serving,
//! - per-model problems ([`PalateError::ModelUnavailable`],
//!   [`PalateError::Artifact`], [`PalateError::DimensionMismatch`],
//!   [`PalateError::Model`]) that are contained to a single model kind,
//! - plumbing errors converted from I/O and serialization crates.
//!
//! Malformed review input never produces an error; it normalizes to the empty
//! string and flows through the normal path.
//!
//! # Examples
//!
//! ```
//! use palate::error::{PalateError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(PalateError::invalid_config("confidence ceiling must be >= 0.5"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::model::ModelKind;

/// The main error type for Palate operations.
#[derive(Error, Debug)]
pub enum PalateError {
    /// I/O errors (artifact files, config files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// No vectorizer artifact resolved under any candidate name.
    #[error(
        "could not find a vectorizer artifact (searched: {}); export the fitted vectorizer next to the model artifacts",
        display_paths(.searched)
    )]
    VectorizerNotFound { searched: Vec<PathBuf> },

    /// A vectorizer artifact was found but could not be decoded or validated.
    #[error("vectorizer artifact '{stem}' is unusable: {reason}")]
    VectorizerCorrupt { stem: String, reason: String },

    /// Every model kind failed to load.
    #[error("no sentiment model could be loaded: {}", .reasons.join("; "))]
    NoModelsAvailable { reasons: Vec<String> },

    /// The requested model kind failed to load and cannot be selected.
    #[error("model '{kind}' is unavailable: {reason}")]
    ModelUnavailable { kind: ModelKind, reason: String },

    /// A model's weights do not line up with the loaded vectorizer.
    #[error("dimension mismatch: expected {expected} features, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// An artifact file failed its integrity check.
    #[error("checksum mismatch in {path}: stored {stored:#010x}, computed {computed:#010x}")]
    ChecksumMismatch {
        path: PathBuf,
        stored: u32,
        computed: u32,
    },

    /// Artifact content errors (bad shape, unknown labels, wrong kind)
    #[error("Artifact error: {0}")]
    Artifact(String),

    /// Computation failures inside a classifier
    #[error("Model error: {0}")]
    Model(String),

    /// Invalid configuration values
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Binary artifact decoding errors
    #[error("Serialization error: {0}")]
    Bincode(#[from] bincode::Error),

    /// Regex compilation errors
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with PalateError.
pub type Result<T> = std::result::Result<T, PalateError>;

impl PalateError {
    /// Create a new artifact error.
    pub fn artifact<S: Into<String>>(msg: S) -> Self {
        PalateError::Artifact(msg.into())
    }

    /// Create a new model computation error.
    pub fn model<S: Into<String>>(msg: S) -> Self {
        PalateError::Model(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        PalateError::InvalidConfig(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        PalateError::Other(msg.into())
    }

    /// Create a new model unavailable error.
    pub fn unavailable<S: Into<String>>(kind: ModelKind, reason: S) -> Self {
        PalateError::ModelUnavailable {
            kind,
            reason: reason.into(),
        }
    }

    /// Whether this error prevents the pipeline from serving any request.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            PalateError::VectorizerNotFound { .. }
                | PalateError::VectorizerCorrupt { .. }
                | PalateError::NoModelsAvailable { .. }
        )
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

//! # Palate
//!
//! Sentiment inference for food reviews.
//!
//! A review flows through a fixed pipeline:
//!
//! - [`analysis`] normalizes the raw text
//! - [`vectorizer`] maps it to a fixed-dimension feature vector using a fitted
//!   vocabulary
//! - [`model`] holds the trained classifiers (linear SVM, multinomial naive
//!   Bayes, logistic regression) loaded from a [`provider`]
//! - [`sentiment`] predicts with one model, or compares all of them and
//!   reports a consensus
//!
//! When trained artifacts are missing the pipeline can run in a degraded mode
//! that serves clearly tagged keyword-count verdicts instead.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod sentiment;
pub mod vectorizer;

pub mod prelude {
    pub use crate::analysis::normalizer::{NormalizedText, normalize};
    pub use crate::config::{FallbackPolicy, PipelineConfig};
    pub use crate::error::{PalateError, Result};
    pub use crate::model::{Label, ModelKind};
    pub use crate::provider::{ArtifactProvider, DirectoryProvider, MemoryProvider};
    pub use crate::sentiment::{ComparisonReport, Consensus, Prediction, SentimentPipeline};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

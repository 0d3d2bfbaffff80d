//! Sentiment prediction and multi-model comparison.
//!
//! # Examples
//!
//! ```
//! use palate::config::{FallbackPolicy, PipelineConfig};
//! use palate::model::{Label, ModelKind};
//! use palate::sentiment::SentimentPipeline;
//!
//! let config = PipelineConfig::default().with_fallback(FallbackPolicy::Heuristic);
//! let pipeline = SentimentPipeline::heuristic_only(&config).unwrap();
//!
//! let prediction = pipeline
//!     .predict("Rich flavor and perfect texture.", ModelKind::LogisticRegression)
//!     .unwrap();
//! assert_eq!(prediction.label, Label::Positive);
//! assert!(prediction.is_heuristic());
//! ```

pub mod comparator;
pub mod heuristic;
pub mod pipeline;
pub mod predictor;

pub use comparator::{ComparisonReport, Consensus};
pub use heuristic::{HeuristicConfig, JitterConfig, KeywordHeuristic};
pub use pipeline::{SentimentPipeline, shared};
pub use predictor::{Prediction, PredictionSource, SentimentPredictor, Strategy};

//! Configuration for the sentiment pipeline.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PalateError, Result};
use crate::sentiment::heuristic::HeuristicConfig;

/// What to do when trained artifacts are missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackPolicy {
    /// Missing artifacts are reported; nothing is substituted.
    #[default]
    Disabled,
    /// Serve clearly tagged keyword-count verdicts where no trained model is
    /// available.
    Heuristic,
}

/// Configuration for [`SentimentPipeline`](crate::sentiment::SentimentPipeline).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Directory probed by the directory artifact provider.
    pub artifact_dir: PathBuf,

    /// Vectorizer artifact stems, probed in order.
    pub vectorizer_candidates: Vec<String>,

    /// Degraded-mode policy.
    pub fallback: FallbackPolicy,

    /// Keyword-count heuristic settings.
    pub heuristic: HeuristicConfig,

    /// Run the per-model predictions of a comparison in parallel.
    pub parallel_compare: bool,

    /// Thread pool size for parallel work.
    /// If None, uses the number of CPU cores.
    pub thread_pool_size: Option<usize>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            artifact_dir: PathBuf::from("./models"),
            vectorizer_candidates: vec![
                "vectorizer".to_string(),
                "cv".to_string(),
                "tfidf".to_string(),
            ],
            fallback: FallbackPolicy::Disabled,
            heuristic: HeuristicConfig::default(),
            parallel_compare: true,
            thread_pool_size: None,
        }
    }
}

impl PipelineConfig {
    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path.as_ref())?);
        let config: PipelineConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if self.vectorizer_candidates.is_empty() {
            return Err(PalateError::invalid_config(
                "vectorizer_candidates must name at least one artifact",
            ));
        }
        if self.thread_pool_size == Some(0) {
            return Err(PalateError::invalid_config("thread_pool_size must be positive"));
        }
        self.heuristic.validate()
    }

    /// Set the artifact directory.
    pub fn with_artifact_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.artifact_dir = dir.into();
        self
    }

    /// Set the fallback policy.
    pub fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = fallback;
        self
    }
}

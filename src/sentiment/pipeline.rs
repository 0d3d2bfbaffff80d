//! The loaded pipeline: normalizer, vectorizer, models and heuristic bundled
//! into one immutable handle.
//!
//! [`SentimentPipeline::load`] is the explicit initialization step. It either
//! returns a pipeline ready to serve or a fatal error; nothing is loaded per
//! request afterwards. [`shared`] caches one pipeline per artifact directory
//! for processes that want a single global instance.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::Arc;

use lazy_static::lazy_static;
use parking_lot::Mutex;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::analysis::normalizer::{NormalizedText, ReviewInput, TextNormalizer};
use crate::config::{FallbackPolicy, PipelineConfig};
use crate::error::{PalateError, Result};
use crate::model::{Availability, ModelKind, ModelRegistry};
use crate::provider::{self, ArtifactProvider, DirectoryProvider};
use crate::sentiment::comparator::{self, ComparisonReport};
use crate::sentiment::heuristic::KeywordHeuristic;
use crate::sentiment::predictor::{Prediction, PreparedReview, SentimentPredictor, Strategy};
use crate::vectorizer::Vectorizer;

lazy_static! {
    static ref SHARED: Mutex<HashMap<PathBuf, Arc<SentimentPipeline>>> = Mutex::new(HashMap::new());
}

/// The process-wide pipeline for `config.artifact_dir`.
///
/// The first call for a directory loads it while holding the cache lock, so
/// concurrent first callers wait for one load instead of repeating it. Later
/// calls return the cached instance, whatever the rest of `config` says.
/// Failed loads are not cached.
pub fn shared(config: &PipelineConfig) -> Result<Arc<SentimentPipeline>> {
    let mut cache = SHARED.lock();
    if let Some(pipeline) = cache.get(&config.artifact_dir) {
        return Ok(Arc::clone(pipeline));
    }
    let provider = DirectoryProvider::new(config.artifact_dir.clone());
    let pipeline = Arc::new(SentimentPipeline::load(config, &provider)?);
    cache.insert(config.artifact_dir.clone(), Arc::clone(&pipeline));
    Ok(pipeline)
}

/// Immutable bundle of everything a prediction needs.
pub struct SentimentPipeline {
    normalizer: TextNormalizer,
    vectorizer: Option<(String, Arc<dyn Vectorizer>)>,
    registry: ModelRegistry,
    predictors: Vec<SentimentPredictor>,
    unserved: BTreeMap<ModelKind, String>,
    heuristic: KeywordHeuristic,
    fallback: FallbackPolicy,
    thread_pool: Option<Arc<ThreadPool>>,
}

impl std::fmt::Debug for SentimentPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentimentPipeline")
            .field("vectorizer", &self.vectorizer_name())
            .field("registry", &self.registry)
            .field("predictors", &self.predictors)
            .field("fallback", &self.fallback)
            .field("parallel", &self.thread_pool.is_some())
            .finish()
    }
}

impl SentimentPipeline {
    /// Load the vectorizer and every model kind from `provider`.
    ///
    /// A missing vectorizer, or no loadable model at all, is fatal unless
    /// `config.fallback` is [`FallbackPolicy::Heuristic`].
    pub fn load(config: &PipelineConfig, provider: &dyn ArtifactProvider) -> Result<Self> {
        config.validate()?;

        let vectorizer = match provider::load_vectorizer(provider, &config.vectorizer_candidates) {
            Ok(loaded) => loaded,
            Err(e @ PalateError::VectorizerNotFound { .. })
                if config.fallback == FallbackPolicy::Heuristic =>
            {
                tracing::warn!(provider = provider.name(), error = %e, "running heuristic-only");
                return Self::heuristic_only(config);
            }
            Err(e) => return Err(e),
        };

        let registry = ModelRegistry::load(provider, vectorizer.1.dimension());
        Self::from_parts(config, vectorizer, registry)
    }

    /// Assemble a pipeline from an already loaded vectorizer and registry.
    pub fn from_parts(
        config: &PipelineConfig,
        vectorizer: (String, Arc<dyn Vectorizer>),
        registry: ModelRegistry,
    ) -> Result<Self> {
        config.validate()?;

        let dimension = vectorizer.1.dimension();
        for (_, model) in registry.available() {
            if model.n_features() != dimension {
                return Err(PalateError::DimensionMismatch {
                    expected: dimension,
                    actual: model.n_features(),
                });
            }
        }

        if registry.is_empty() && config.fallback == FallbackPolicy::Disabled {
            return Err(PalateError::NoModelsAvailable {
                reasons: registry
                    .failures()
                    .iter()
                    .map(|(kind, reason)| format!("{kind}: {reason}"))
                    .collect(),
            });
        }

        let pipeline = Self::assemble(config, Some(vectorizer), registry)?;
        tracing::info!(
            vectorizer = pipeline.vectorizer_name().unwrap_or_default(),
            dimension,
            loaded = ?pipeline.registry.available().map(|(kind, _)| kind.id()).collect::<Vec<_>>(),
            degraded = pipeline.is_degraded(),
            "sentiment pipeline ready"
        );
        Ok(pipeline)
    }

    /// A pipeline that serves every kind with the keyword heuristic.
    ///
    /// Requires [`FallbackPolicy::Heuristic`].
    pub fn heuristic_only(config: &PipelineConfig) -> Result<Self> {
        if config.fallback != FallbackPolicy::Heuristic {
            return Err(PalateError::invalid_config(
                "a heuristic-only pipeline requires the heuristic fallback policy",
            ));
        }
        config.validate()?;
        let pipeline = Self::assemble(
            config,
            None,
            ModelRegistry::empty("no vectorizer artifact loaded"),
        )?;
        tracing::info!(
            jittered = pipeline.heuristic.is_jittered(),
            "heuristic-only sentiment pipeline ready"
        );
        Ok(pipeline)
    }

    fn assemble(
        config: &PipelineConfig,
        vectorizer: Option<(String, Arc<dyn Vectorizer>)>,
        registry: ModelRegistry,
    ) -> Result<Self> {
        let mut predictors = Vec::new();
        let mut unserved = BTreeMap::new();
        for kind in ModelKind::ALL {
            match registry.get(kind) {
                Ok(model) => predictors.push(SentimentPredictor::trained(kind, Arc::clone(model))),
                Err(_) if config.fallback == FallbackPolicy::Heuristic => {
                    predictors.push(SentimentPredictor::heuristic(kind));
                }
                Err(_) => {
                    let reason = registry
                        .failures()
                        .get(&kind)
                        .cloned()
                        .unwrap_or_else(|| "not loaded".to_string());
                    unserved.insert(kind, reason);
                }
            }
        }

        let thread_pool = if config.parallel_compare {
            let thread_pool_size = config.thread_pool_size.unwrap_or_else(num_cpus::get);
            let pool = ThreadPoolBuilder::new()
                .num_threads(thread_pool_size)
                .thread_name(|i| format!("palate-worker-{i}"))
                .build()
                .map_err(|e| PalateError::other(format!("Failed to create thread pool: {e}")))?;
            Some(Arc::new(pool))
        } else {
            None
        };

        Ok(Self {
            normalizer: TextNormalizer::new(),
            vectorizer,
            registry,
            predictors,
            unserved,
            heuristic: KeywordHeuristic::new(&config.heuristic)?,
            fallback: config.fallback,
            thread_pool,
        })
    }

    /// Normalize a review.
    pub fn normalize<T: ReviewInput + ?Sized>(&self, input: &T) -> NormalizedText {
        self.normalizer.normalize(input)
    }

    /// Normalize and vectorize a review once, for use by any number of models.
    pub fn prepare<T: ReviewInput + ?Sized>(&self, input: &T) -> PreparedReview {
        let text = self.normalize(input);
        let features = self.vectorizer.as_ref().map(|(_, v)| v.vectorize(&text));
        PreparedReview { text, features }
    }

    fn predictor(&self, kind: ModelKind) -> Result<&SentimentPredictor> {
        match self.predictors.iter().find(|p| p.kind() == kind) {
            Some(predictor) => Ok(predictor),
            None => Err(self.registry.get(kind).err().unwrap_or_else(|| {
                PalateError::unavailable(kind, "not served by this pipeline")
            })),
        }
    }

    /// Predict with one model kind.
    ///
    /// Fails only when `kind` cannot be served; malformed input is never an
    /// error.
    pub fn predict<T: ReviewInput + ?Sized>(
        &self,
        input: &T,
        kind: ModelKind,
    ) -> Result<Prediction> {
        let predictor = self.predictor(kind)?;
        predictor.predict(&self.prepare(input), &self.heuristic)
    }

    /// Predict many reviews with one model kind. Output order matches input.
    pub fn predict_batch<T: ReviewInput + Sync>(
        &self,
        inputs: &[T],
        kind: ModelKind,
    ) -> Result<Vec<Prediction>> {
        let predictor = self.predictor(kind)?;
        let run = |input: &T| predictor.predict(&self.prepare(input), &self.heuristic);
        match &self.thread_pool {
            Some(pool) => pool.install(|| inputs.par_iter().map(run).collect()),
            None => inputs.iter().map(run).collect(),
        }
    }

    /// Run every served model on the same prepared review.
    pub fn compare<T: ReviewInput + ?Sized>(&self, input: &T) -> ComparisonReport {
        comparator::compare(
            &self.predictors,
            &self.prepare(input),
            &self.heuristic,
            &self.unserved,
            self.thread_pool.as_deref(),
        )
    }

    /// Availability of every model kind.
    pub fn availability(&self) -> Vec<(ModelKind, Availability)> {
        self.registry.availability()
    }

    /// Kinds this pipeline can answer for, in kind order.
    pub fn served_kinds(&self) -> Vec<ModelKind> {
        self.predictors.iter().map(SentimentPredictor::kind).collect()
    }

    /// Whether any kind is served by the keyword heuristic.
    pub fn is_degraded(&self) -> bool {
        self.predictors
            .iter()
            .any(|p| matches!(p.strategy(), Strategy::HeuristicKeywordCount))
    }

    /// Stem of the loaded vectorizer artifact.
    pub fn vectorizer_name(&self) -> Option<&str> {
        self.vectorizer.as_ref().map(|(stem, _)| stem.as_str())
    }

    /// Feature dimension, if a vectorizer is loaded.
    pub fn dimension(&self) -> Option<usize> {
        self.vectorizer.as_ref().map(|(_, v)| v.dimension())
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    pub fn fallback(&self) -> FallbackPolicy {
        self.fallback
    }
}

//! Command implementations for the Palate CLI.

use std::sync::Arc;

use crate::analysis::normalizer::normalize;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::sentiment::{self, SentimentPipeline};

/// Execute a CLI command.
pub fn execute_command(args: PalateArgs) -> Result<()> {
    match &args.command {
        Command::Normalize(normalize_args) => normalize_review(normalize_args, &args),
        Command::Predict(predict_args) => predict_review(predict_args, &args),
        Command::Compare(compare_args) => compare_review(compare_args, &args),
        Command::Models => list_models(&args),
    }
}

/// Resolve the pipeline configuration: file first, then flag overrides.
pub fn resolve_config(args: &PalateArgs) -> Result<PipelineConfig> {
    let mut config = match &args.config {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading configuration");
            PipelineConfig::from_file(path)?
        }
        None => PipelineConfig::default(),
    };
    if let Some(dir) = &args.artifacts {
        config.artifact_dir = dir.clone();
    }
    if let Some(mode) = args.fallback {
        config.fallback = mode.into();
    }
    config.validate()?;
    Ok(config)
}

fn load_pipeline(args: &PalateArgs) -> Result<(PipelineConfig, Arc<SentimentPipeline>)> {
    let config = resolve_config(args)?;
    let pipeline = sentiment::shared(&config)?;
    Ok((config, pipeline))
}

/// Print the normalized form of a review.
fn normalize_review(args: &NormalizeArgs, cli_args: &PalateArgs) -> Result<()> {
    output_result(
        &NormalizeResult {
            input: args.text.clone(),
            normalized: normalize(&args.text).into_string(),
        },
        cli_args,
    )
}

/// Predict with one model.
fn predict_review(args: &PredictArgs, cli_args: &PalateArgs) -> Result<()> {
    let (_, pipeline) = load_pipeline(cli_args)?;
    let prediction = pipeline.predict(&args.text, args.model)?;
    output_result(
        &PredictionResult {
            model: args.model,
            model_name: args.model.display_name(),
            prediction,
        },
        cli_args,
    )
}

/// Compare every served model.
fn compare_review(args: &CompareArgs, cli_args: &PalateArgs) -> Result<()> {
    let (_, pipeline) = load_pipeline(cli_args)?;
    let report = pipeline.compare(&args.text);
    output_result(&report, cli_args)
}

/// List model availability.
fn list_models(cli_args: &PalateArgs) -> Result<()> {
    let (config, pipeline) = load_pipeline(cli_args)?;
    let models = pipeline
        .availability()
        .into_iter()
        .map(|(kind, availability)| ModelStatus {
            model: kind,
            model_name: kind.display_name(),
            artifact: kind.artifact_stem(),
            availability,
        })
        .collect();

    output_result(
        &ModelListing {
            artifact_dir: config.artifact_dir.display().to_string(),
            vectorizer: pipeline.vectorizer_name().map(str::to_string),
            dimension: pipeline.dimension(),
            degraded: pipeline.is_degraded(),
            models,
        },
        cli_args,
    )
}

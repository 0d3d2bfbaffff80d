//! Command line argument parsing for the Palate CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::FallbackPolicy;
use crate::model::ModelKind;

/// Palate - sentiment of food reviews
#[derive(Parser, Debug, Clone)]
#[command(name = "palate")]
#[command(about = "Classify the sentiment of food reviews with trained models")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct PalateArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Directory holding the vectorizer and model artifacts
    #[arg(long, value_name = "DIR", env = "PALATE_ARTIFACTS")]
    pub artifacts: Option<PathBuf>,

    /// Pipeline configuration file (JSON)
    #[arg(long, value_name = "FILE", env = "PALATE_CONFIG")]
    pub config: Option<PathBuf>,

    /// What to do when trained artifacts are missing
    #[arg(long, value_name = "POLICY")]
    pub fallback: Option<FallbackMode>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl PalateArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the normalized form of a review
    Normalize(NormalizeArgs),

    /// Predict the sentiment of a review with one model
    Predict(PredictArgs),

    /// Run every available model on a review and report the consensus
    Compare(CompareArgs),

    /// List model kinds and whether they loaded
    Models,
}

impl Command {
    /// Subcommand name as typed on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Normalize(_) => "normalize",
            Command::Predict(_) => "predict",
            Command::Compare(_) => "compare",
            Command::Models => "models",
        }
    }
}

/// Arguments for normalizing
#[derive(Parser, Debug, Clone)]
pub struct NormalizeArgs {
    /// Review text
    #[arg(value_name = "TEXT")]
    pub text: String,
}

/// Arguments for predicting
#[derive(Parser, Debug, Clone)]
pub struct PredictArgs {
    /// Review text
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Model to use (svm, mnb, logreg)
    #[arg(short, long, default_value = "svm")]
    pub model: ModelKind,
}

/// Arguments for comparing
#[derive(Parser, Debug, Clone)]
pub struct CompareArgs {
    /// Review text
    #[arg(value_name = "TEXT")]
    pub text: String,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

/// Fallback policy as a command line value
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackMode {
    /// Report missing artifacts, substitute nothing
    Disabled,
    /// Serve tagged keyword-count verdicts for missing models
    Heuristic,
}

impl From<FallbackMode> for FallbackPolicy {
    fn from(mode: FallbackMode) -> Self {
        match mode {
            FallbackMode::Disabled => FallbackPolicy::Disabled,
            FallbackMode::Heuristic => FallbackPolicy::Heuristic,
        }
    }
}

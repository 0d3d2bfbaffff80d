//! Output formatting for CLI commands.

use serde::Serialize;

use crate::cli::args::{OutputFormat, PalateArgs};
use crate::error::Result;
use crate::model::{Availability, ModelKind};
use crate::sentiment::{ComparisonReport, Prediction, PredictionSource};

/// Result structure for normalization.
#[derive(Debug, Serialize)]
pub struct NormalizeResult {
    pub input: String,
    pub normalized: String,
}

/// Result structure for a single prediction.
#[derive(Debug, Serialize)]
pub struct PredictionResult {
    pub model: ModelKind,
    pub model_name: &'static str,
    #[serde(flatten)]
    pub prediction: Prediction,
}

/// One row of the model listing.
#[derive(Debug, Serialize)]
pub struct ModelStatus {
    pub model: ModelKind,
    pub model_name: &'static str,
    pub artifact: &'static str,
    #[serde(flatten)]
    pub availability: Availability,
}

/// Result structure for the model listing.
#[derive(Debug, Serialize)]
pub struct ModelListing {
    pub artifact_dir: String,
    pub vectorizer: Option<String>,
    pub dimension: Option<usize>,
    pub degraded: bool,
    pub models: Vec<ModelStatus>,
}

/// Human-readable rendering of a result.
pub trait HumanOutput {
    fn render_human(&self) -> Vec<String>;
}

impl HumanOutput for NormalizeResult {
    fn render_human(&self) -> Vec<String> {
        vec![self.normalized.clone()]
    }
}

impl HumanOutput for PredictionResult {
    fn render_human(&self) -> Vec<String> {
        vec![
            format!("Model: {}", self.model_name),
            format!("Sentiment: {}", self.prediction.label),
            format!("Confidence: {}", format_confidence(self.prediction.confidence)),
            format!("Source: {}", format_source(&self.prediction.source)),
        ]
    }
}

impl HumanOutput for ComparisonReport {
    fn render_human(&self) -> Vec<String> {
        let mut lines = vec![
            "Model Comparison:".to_string(),
            "═════════════════".to_string(),
        ];
        for (kind, prediction) in &self.per_model {
            lines.push(format!(
                "{:<24} {:<9} {:>10}  {}",
                kind.display_name(),
                prediction.label.as_str(),
                format_confidence(prediction.confidence),
                format_source(&prediction.source)
            ));
        }
        for (kind, reason) in &self.skipped {
            lines.push(format!("{:<24} skipped: {reason}", kind.display_name()));
        }
        lines.push(String::new());
        let consensus = match self.unanimous_label {
            Some(label) => format!("Consensus: unanimous ({label})"),
            None => format!(
                "Consensus: split (majority: {})",
                self.majority_label
                    .map(|l| l.as_str())
                    .unwrap_or("none")
            ),
        };
        lines.push(consensus);
        lines
    }
}

impl HumanOutput for ModelListing {
    fn render_human(&self) -> Vec<String> {
        let mut lines = vec![format!("Artifacts: {}", self.artifact_dir)];
        match (&self.vectorizer, self.dimension) {
            (Some(stem), Some(dimension)) => {
                lines.push(format!("Vectorizer: {stem} ({dimension} features)"))
            }
            _ => lines.push("Vectorizer: none (heuristic only)".to_string()),
        }
        lines.push(String::new());
        for status in &self.models {
            let state = match &status.availability {
                Availability::Available => "available".to_string(),
                Availability::Unavailable(reason) => format!("unavailable: {reason}"),
            };
            lines.push(format!(
                "{:<7} {:<24} {state}",
                status.model.id(),
                status.model_name
            ));
        }
        if self.degraded {
            lines.push(String::new());
            lines.push("Missing models are served by the keyword heuristic.".to_string());
        }
        lines
    }
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize + HumanOutput>(result: &T, args: &PalateArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: HumanOutput>(result: &T, args: &PalateArgs) -> Result<()> {
    let lines = result.render_human();
    // Quiet mode keeps only the first line.
    let keep = if args.verbosity() == 0 { 1 } else { lines.len() };
    for line in lines.iter().take(keep) {
        println!("{line}");
    }
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &PalateArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Format a confidence as a percentage.
pub fn format_confidence(confidence: Option<f64>) -> String {
    match confidence {
        Some(c) => format!("{:.2}%", c * 100.0),
        None => "unreported".to_string(),
    }
}

/// Describe where a prediction came from.
pub fn format_source(source: &PredictionSource) -> String {
    match source {
        PredictionSource::Trained { model } => format!("trained ({model})"),
        PredictionSource::Heuristic {
            positive_hits,
            negative_hits,
            jittered,
        } => {
            let mut text = format!(
                "heuristic keyword count ({positive_hits} positive, {negative_hits} negative)"
            );
            if *jittered {
                text.push_str(", jittered");
            }
            text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Label;

    #[test]
    fn test_format_confidence() {
        assert_eq!(format_confidence(Some(0.8723)), "87.23%");
        assert_eq!(format_confidence(None), "unreported");
    }

    #[test]
    fn test_format_source() {
        assert_eq!(
            format_source(&PredictionSource::Trained { model: "multinomial_nb" }),
            "trained (multinomial_nb)"
        );
        let source = PredictionSource::Heuristic {
            positive_hits: 2,
            negative_hits: 0,
            jittered: true,
        };
        assert_eq!(
            format_source(&source),
            "heuristic keyword count (2 positive, 0 negative), jittered"
        );
    }

    #[test]
    fn test_prediction_result_json_is_flat() {
        let result = PredictionResult {
            model: ModelKind::LogisticRegression,
            model_name: ModelKind::LogisticRegression.display_name(),
            prediction: Prediction {
                label: Label::Positive,
                confidence: Some(0.9),
                source: PredictionSource::Trained {
                    model: "logistic_regression",
                },
                distribution: None,
            },
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["model"], "logreg");
        assert_eq!(value["label"], "positive");
        assert_eq!(value["confidence"], 0.9);
        assert_eq!(value["source"]["strategy"], "trained");

        let lines = result.render_human();
        assert_eq!(lines[1], "Sentiment: positive");
        assert_eq!(lines[2], "Confidence: 90.00%");
    }

    #[test]
    fn test_model_status_json() {
        let status = ModelStatus {
            model: ModelKind::MultinomialNaiveBayes,
            model_name: ModelKind::MultinomialNaiveBayes.display_name(),
            artifact: ModelKind::MultinomialNaiveBayes.artifact_stem(),
            availability: Availability::Unavailable("missing".to_string()),
        };
        let value = serde_json::to_value(&status).unwrap();
        assert_eq!(value["status"], "unavailable");
        assert_eq!(value["reason"], "missing");
        assert_eq!(value["artifact"], "mnb_model");
    }
}

use std::path::Path;
use std::sync::Arc;

use palate::config::{FallbackPolicy, PipelineConfig};
use palate::error::{PalateError, Result};
use palate::model::{Availability, Label, ModelArtifact, ModelKind};
use palate::provider::format::write_artifact;
use palate::provider::{DirectoryProvider, MemoryProvider};
use palate::sentiment::{self, Consensus, PredictionSource, SentimentPipeline};
use palate::vectorizer::VectorizerArtifact;

const VOCABULARY: [&str; 8] = [
    "good",
    "great",
    "delicious",
    "perfect",
    "bad",
    "cold",
    "slow",
    "disappointing",
];

const CAKE_REVIEW: &str =
    "The chocolate cake was absolutely divine! Rich flavor and perfect texture.";
const COLD_REVIEW: &str =
    "Disappointing experience. The food was cold and service was extremely slow.";

fn tfidf_vectorizer() -> VectorizerArtifact {
    let vocabulary: serde_json::Map<String, serde_json::Value> = VOCABULARY
        .iter()
        .enumerate()
        .map(|(i, term)| (term.to_string(), i.into()))
        .collect();
    serde_json::from_value(serde_json::json!({
        "tfidf": {
            "vocabulary": vocabulary,
            "idf": [1.2, 1.0, 1.5, 1.7, 1.1, 1.4, 1.6, 1.9],
        }
    }))
    .unwrap()
}

fn sentiment_weights() -> Vec<f64> {
    vec![1.0, 1.0, 1.0, 1.0, -1.0, -1.0, -1.0, -1.0]
}

fn svm_artifact() -> ModelArtifact {
    ModelArtifact::LinearSvc {
        classes: vec![Label::Negative, Label::Positive],
        coef: vec![sentiment_weights()],
        intercept: vec![-0.1],
    }
}

fn mnb_artifact() -> ModelArtifact {
    let pos = 0.2f64.ln();
    let neg = 0.05f64.ln();
    ModelArtifact::MultinomialNb {
        classes: vec![Label::Negative, Label::Positive],
        class_log_prior: vec![0.5f64.ln(), 0.5f64.ln()],
        feature_log_prob: vec![
            vec![neg, neg, neg, neg, pos, pos, pos, pos],
            vec![pos, pos, pos, pos, neg, neg, neg, neg],
        ],
    }
}

fn logreg_artifact() -> ModelArtifact {
    ModelArtifact::LogisticRegression {
        classes: vec![Label::Negative, Label::Positive],
        coef: vec![sentiment_weights().into_iter().map(|w| w * 3.0).collect()],
        intercept: vec![-0.2],
        multi_class: Default::default(),
    }
}

fn write_all_artifacts(dir: &Path, extension: &str) -> Result<()> {
    write_artifact(&dir.join(format!("vectorizer.{extension}")), &tfidf_vectorizer())?;
    write_artifact(&dir.join(format!("svm_model.{extension}")), &svm_artifact())?;
    write_artifact(&dir.join(format!("mnb_model.{extension}")), &mnb_artifact())?;
    write_artifact(&dir.join(format!("log_reg_model.{extension}")), &logreg_artifact())?;
    Ok(())
}

fn config_for(dir: &Path) -> PipelineConfig {
    PipelineConfig::default().with_artifact_dir(dir)
}

fn load_from(dir: &Path) -> Result<SentimentPipeline> {
    SentimentPipeline::load(&config_for(dir), &DirectoryProvider::new(dir))
}

#[test]
fn positive_review_is_unanimous() -> Result<()> {
    let dir = tempfile::tempdir()?;
    write_all_artifacts(dir.path(), "json")?;
    let pipeline = load_from(dir.path())?;

    let report = pipeline.compare(CAKE_REVIEW);
    assert_eq!(
        report.normalized_text.as_str(),
        "the chocolate cake was absolutely divine rich flavor and perfect texture"
    );
    assert_eq!(report.per_model.len(), 3);
    assert!(report.skipped.is_empty());
    assert_eq!(report.consensus, Consensus::Unanimous);
    assert_eq!(report.unanimous_label, Some(Label::Positive));
    assert!(!report.is_degraded());

    let svm = &report.per_model[&ModelKind::SupportVectorMachine];
    assert_eq!(svm.confidence, None);
    for kind in [ModelKind::MultinomialNaiveBayes, ModelKind::LogisticRegression] {
        let confidence = report.per_model[&kind].confidence.unwrap();
        assert!((0.5..=1.0).contains(&confidence));
    }
    Ok(())
}

#[test]
fn negative_review_from_binary_artifacts() -> Result<()> {
    let dir = tempfile::tempdir()?;
    write_all_artifacts(dir.path(), "bin")?;
    let pipeline = load_from(dir.path())?;

    for kind in ModelKind::ALL {
        let prediction = pipeline.predict(COLD_REVIEW, kind)?;
        assert_eq!(prediction.label, Label::Negative, "{kind}");
        assert!(matches!(prediction.source, PredictionSource::Trained { .. }));
    }
    Ok(())
}

#[test]
fn vectorizer_candidates_are_probed_in_order() -> Result<()> {
    let dir = tempfile::tempdir()?;
    write_all_artifacts(dir.path(), "json")?;
    std::fs::rename(dir.path().join("vectorizer.json"), dir.path().join("tfidf.json"))?;

    let pipeline = load_from(dir.path())?;
    assert_eq!(pipeline.vectorizer_name(), Some("tfidf"));
    assert_eq!(pipeline.dimension(), Some(VOCABULARY.len()));
    Ok(())
}

#[test]
fn missing_vectorizer_refuses_to_serve() -> Result<()> {
    let dir = tempfile::tempdir()?;
    write_all_artifacts(dir.path(), "json")?;
    std::fs::remove_file(dir.path().join("vectorizer.json"))?;

    let err = load_from(dir.path()).unwrap_err();
    assert!(err.is_fatal());
    let message = err.to_string();
    for stem in ["vectorizer", "cv", "tfidf"] {
        assert!(message.contains(&format!("{stem}.json")), "{message}");
    }
    Ok(())
}

#[test]
fn unreadable_vectorizer_refuses_to_serve() -> Result<()> {
    let dir = tempfile::tempdir()?;
    write_all_artifacts(dir.path(), "json")?;
    std::fs::write(dir.path().join("vectorizer.json"), "{ not json")?;

    let err = load_from(dir.path()).unwrap_err();
    assert!(err.is_fatal());
    assert!(matches!(
        &err,
        PalateError::VectorizerCorrupt { stem, .. } if stem == "vectorizer"
    ));

    let config = config_for(dir.path()).with_fallback(FallbackPolicy::Heuristic);
    let provider = DirectoryProvider::new(dir.path());
    let err = SentimentPipeline::load(&config, &provider).unwrap_err();
    assert!(err.is_fatal());
    Ok(())
}

#[test]
fn missing_model_is_reported_not_fatal() -> Result<()> {
    let dir = tempfile::tempdir()?;
    write_all_artifacts(dir.path(), "json")?;
    std::fs::remove_file(dir.path().join("log_reg_model.json"))?;

    let pipeline = load_from(dir.path())?;
    let err = pipeline
        .predict(CAKE_REVIEW, ModelKind::LogisticRegression)
        .unwrap_err();
    assert!(matches!(
        err,
        PalateError::ModelUnavailable {
            kind: ModelKind::LogisticRegression,
            ..
        }
    ));
    assert!(!err.is_fatal());

    let report = pipeline.compare(CAKE_REVIEW);
    assert_eq!(report.per_model.len(), 2);
    assert!(report.skipped[&ModelKind::LogisticRegression].contains("log_reg_model"));

    let availability = pipeline.availability();
    assert_eq!(availability[0].1, Availability::Available);
    assert!(!availability[2].1.is_available());
    Ok(())
}

#[test]
fn corrupt_binary_artifact_disables_one_kind() -> Result<()> {
    let dir = tempfile::tempdir()?;
    write_all_artifacts(dir.path(), "bin")?;
    let path = dir.path().join("mnb_model.bin");
    let mut bytes = std::fs::read(&path)?;
    bytes[4] ^= 0xff;
    std::fs::write(&path, bytes)?;

    let pipeline = load_from(dir.path())?;
    let report = pipeline.compare(COLD_REVIEW);
    assert_eq!(report.per_model.len(), 2);
    assert!(report.skipped[&ModelKind::MultinomialNaiveBayes].contains("checksum mismatch"));
    assert_eq!(report.unanimous_label, Some(Label::Negative));
    Ok(())
}

#[test]
fn empty_review_flows_through_the_pipeline() -> Result<()> {
    let dir = tempfile::tempdir()?;
    write_all_artifacts(dir.path(), "json")?;
    let pipeline = load_from(dir.path())?;

    let missing: Option<&str> = None;
    for kind in ModelKind::ALL {
        let empty = pipeline.predict("", kind)?;
        let symbols = pipeline.predict("!!! :-( 123", kind)?;
        let nothing = pipeline.predict(&missing, kind)?;
        assert_eq!(empty, symbols);
        assert_eq!(empty, nothing);
    }
    // Negative intercepts make the zero vector negative.
    assert_eq!(
        pipeline.predict("", ModelKind::SupportVectorMachine)?.label,
        Label::Negative
    );
    Ok(())
}

#[test]
fn vector_dimension_is_constant() -> Result<()> {
    let dir = tempfile::tempdir()?;
    write_all_artifacts(dir.path(), "json")?;
    let pipeline = load_from(dir.path())?;

    for review in ["", CAKE_REVIEW, COLD_REVIEW, "zzz qqq", "good good good good"] {
        let prepared = pipeline.prepare(review);
        assert_eq!(
            prepared.features.map(|f| f.dimension()),
            Some(VOCABULARY.len())
        );
    }
    Ok(())
}

#[test]
fn compare_is_reflexive() -> Result<()> {
    let dir = tempfile::tempdir()?;
    write_all_artifacts(dir.path(), "json")?;
    let pipeline = load_from(dir.path())?;

    for review in [CAKE_REVIEW, COLD_REVIEW, "good but bad", ""] {
        let first = pipeline.compare(review);
        let second = pipeline.compare(review);
        assert_eq!(first.per_model, second.per_model);
        assert_eq!(first.consensus, second.consensus);
    }
    Ok(())
}

#[test]
fn integer_class_codes_are_accepted() -> Result<()> {
    let dir = tempfile::tempdir()?;
    write_all_artifacts(dir.path(), "json")?;
    std::fs::write(
        dir.path().join("svm_model.json"),
        r#"{"linear_svc": {"classes": [0, 1], "coef": [[1, 1, 1, 1, -1, -1, -1, -1]], "intercept": [0]}}"#,
    )?;

    let pipeline = load_from(dir.path())?;
    let prediction = pipeline.predict("great", ModelKind::SupportVectorMachine)?;
    assert_eq!(prediction.label, Label::Positive);
    Ok(())
}

#[test]
fn heuristic_fallback_without_artifacts() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let config = config_for(dir.path()).with_fallback(FallbackPolicy::Heuristic);
    let pipeline = SentimentPipeline::load(&config, &DirectoryProvider::new(dir.path()))?;
    assert!(pipeline.is_degraded());

    let cake = pipeline.predict(CAKE_REVIEW, ModelKind::SupportVectorMachine)?;
    assert_eq!(cake.label, Label::Positive);
    assert!(cake.confidence.unwrap() >= 0.5);
    assert!(cake.is_heuristic());

    let cold = pipeline.predict(COLD_REVIEW, ModelKind::SupportVectorMachine)?;
    assert_eq!(cold.label, Label::Negative);

    let mixed = pipeline.compare("good but bad");
    assert_eq!(mixed.unanimous_label, Some(Label::Neutral));
    assert!(mixed.is_degraded());

    let empty = pipeline.predict("", ModelKind::MultinomialNaiveBayes)?;
    assert_eq!(empty.label, Label::Neutral);
    Ok(())
}

#[test]
fn heuristic_fills_only_missing_kinds() -> Result<()> {
    let provider = MemoryProvider::new()
        .with_vectorizer("cv", tfidf_vectorizer())
        .with_model(ModelKind::LogisticRegression, logreg_artifact());
    let config = PipelineConfig::default().with_fallback(FallbackPolicy::Heuristic);
    let pipeline = SentimentPipeline::load(&config, &provider)?;

    let report = pipeline.compare(CAKE_REVIEW);
    assert_eq!(report.per_model.len(), 3);
    assert!(!report.per_model[&ModelKind::LogisticRegression].is_heuristic());
    assert!(report.per_model[&ModelKind::SupportVectorMachine].is_heuristic());
    assert!(report.per_model[&ModelKind::MultinomialNaiveBayes].is_heuristic());
    Ok(())
}

#[test]
fn shared_pipeline_loads_once_per_directory() -> Result<()> {
    let dir = tempfile::tempdir()?;
    write_all_artifacts(dir.path(), "json")?;
    let config = config_for(dir.path());

    let first = sentiment::shared(&config)?;
    // Later loads come from the cache even if the files disappear.
    std::fs::remove_file(dir.path().join("vectorizer.json"))?;
    let second = sentiment::shared(&config)?;
    assert!(Arc::ptr_eq(&first, &second));
    Ok(())
}

#[test]
fn json_report_shape() -> Result<()> {
    let dir = tempfile::tempdir()?;
    write_all_artifacts(dir.path(), "json")?;
    std::fs::remove_file(dir.path().join("mnb_model.json"))?;
    let pipeline = load_from(dir.path())?;

    let value = serde_json::to_value(pipeline.compare(COLD_REVIEW))?;
    assert_eq!(value["consensus"], "unanimous");
    assert_eq!(value["per_model"]["svm"]["label"], "negative");
    assert!(value["per_model"]["svm"]["confidence"].is_null());
    assert_eq!(value["per_model"]["logreg"]["source"]["strategy"], "trained");
    assert!(value["skipped"]["mnb"].is_string());
    Ok(())
}

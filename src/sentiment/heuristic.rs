//! Keyword-count sentiment heuristic.
//!
//! Used only in degraded mode, when a trained model is not available. Tokens
//! of the normalized review are matched against a positive and a negative cue
//! list; the side with strictly more matches wins. A tie, or two non-zero
//! counts that differ by one, is [`Label::Neutral`]. Confidence grows by
//! `confidence_step` per match of difference above 0.5 and is clamped to
//! `confidence_ceiling`.

use std::fmt;
use std::sync::Arc;

use ahash::AHashSet;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::NormalizedText;
use crate::analysis::tokenizer::Tokenizer;
use crate::analysis::tokenizer::whitespace::WhitespaceTokenizer;
use crate::error::{PalateError, Result};
use crate::model::Label;

/// Confidence of a neutral verdict.
pub const NEUTRAL_CONFIDENCE: f64 = 0.5;

const POSITIVE_CUES: &[&str] = &[
    "amazing", "awesome", "best", "crispy", "delicious", "delightful", "divine", "excellent",
    "fantastic", "flavorful", "fresh", "friendly", "good", "great", "incredible", "juicy", "love",
    "loved", "nice", "outstanding", "perfect", "perfectly", "recommend", "rich", "superb",
    "tasty", "tender", "wonderful", "yummy",
];

const NEGATIVE_CUES: &[&str] = &[
    "awful", "bad", "bland", "burnt", "cold", "dirty", "disappointed", "disappointing",
    "disgusting", "dry", "greasy", "gross", "hate", "horrible", "inedible", "mediocre",
    "overcooked", "overpriced", "poor", "raw", "rude", "salty", "slow", "soggy", "stale",
    "terrible", "undercooked", "worst",
];

fn default_positive_words() -> Vec<String> {
    POSITIVE_CUES.iter().map(|w| w.to_string()).collect()
}

fn default_negative_words() -> Vec<String> {
    NEGATIVE_CUES.iter().map(|w| w.to_string()).collect()
}

/// Random perturbation of keyword counts.
///
/// Makes heuristic verdicts non-deterministic. Never applied to trained
/// models; every verdict it touches is tagged as jittered.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JitterConfig {
    /// Each count is raised by a random amount in `0..=max_delta`.
    pub max_delta: u32,
    /// Fixed seed for reproducible demos. If None, seeds from the OS.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Settings for [`KeywordHeuristic`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicConfig {
    pub positive_words: Vec<String>,
    pub negative_words: Vec<String>,
    /// Confidence added per match of difference.
    pub confidence_step: f64,
    /// Upper bound on heuristic confidence.
    pub confidence_ceiling: f64,
    /// Demo-only count perturbation. Off by default.
    pub jitter: Option<JitterConfig>,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            positive_words: default_positive_words(),
            negative_words: default_negative_words(),
            confidence_step: 0.1,
            confidence_ceiling: 0.95,
            jitter: None,
        }
    }
}

impl HeuristicConfig {
    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if !self.confidence_step.is_finite() || self.confidence_step <= 0.0 {
            return Err(PalateError::invalid_config(format!(
                "confidence_step must be positive, got {}",
                self.confidence_step
            )));
        }
        if !(NEUTRAL_CONFIDENCE..=1.0).contains(&self.confidence_ceiling) {
            return Err(PalateError::invalid_config(format!(
                "confidence_ceiling must be within [0.5, 1.0], got {}",
                self.confidence_ceiling
            )));
        }
        if self.positive_words.is_empty() || self.negative_words.is_empty() {
            return Err(PalateError::invalid_config(
                "heuristic word lists must not be empty",
            ));
        }
        Ok(())
    }
}

/// Matches per cue list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCounts {
    pub positive: u32,
    pub negative: u32,
}

impl KeywordCounts {
    pub fn new(positive: u32, negative: u32) -> Self {
        Self { positive, negative }
    }

    /// Absolute difference between the two counts.
    pub fn difference(&self) -> u32 {
        self.positive.abs_diff(self.negative)
    }

    /// Add extra matches to each side, saturating at `u32::MAX`.
    pub fn perturbed(self, positive: u32, negative: u32) -> Self {
        Self {
            positive: self.positive.saturating_add(positive),
            negative: self.negative.saturating_add(negative),
        }
    }
}

/// Outcome of one heuristic classification.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HeuristicVerdict {
    pub label: Label,
    pub confidence: f64,
    pub counts: KeywordCounts,
    pub jittered: bool,
}

/// Keyword-count classifier over normalized text.
pub struct KeywordHeuristic {
    positive: AHashSet<String>,
    negative: AHashSet<String>,
    confidence_step: f64,
    confidence_ceiling: f64,
    tokenizer: Arc<dyn Tokenizer>,
    jitter: Option<(u32, Mutex<StdRng>)>,
}

impl fmt::Debug for KeywordHeuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeywordHeuristic")
            .field("positive", &self.positive.len())
            .field("negative", &self.negative.len())
            .field("confidence_step", &self.confidence_step)
            .field("confidence_ceiling", &self.confidence_ceiling)
            .field("tokenizer", &self.tokenizer.name())
            .field("jitter", &self.jitter.as_ref().map(|(delta, _)| delta))
            .finish()
    }
}

impl Default for KeywordHeuristic {
    fn default() -> Self {
        Self::build(&HeuristicConfig::default())
    }
}

impl KeywordHeuristic {
    /// Create a heuristic from validated settings.
    pub fn new(config: &HeuristicConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: &HeuristicConfig) -> Self {
        let lowered = |words: &[String]| -> AHashSet<String> {
            words.iter().map(|w| w.trim().to_ascii_lowercase()).collect()
        };
        let jitter = config.jitter.as_ref().map(|j| {
            let rng = match j.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            (j.max_delta, Mutex::new(rng))
        });

        Self {
            positive: lowered(&config.positive_words),
            negative: lowered(&config.negative_words),
            confidence_step: config.confidence_step,
            confidence_ceiling: config.confidence_ceiling,
            tokenizer: Arc::new(WhitespaceTokenizer::new()),
            jitter,
        }
    }

    /// Whether verdicts are randomly perturbed.
    pub fn is_jittered(&self) -> bool {
        self.jitter.is_some()
    }

    /// Count cue matches among the tokens of `text`.
    pub fn count(&self, text: &NormalizedText) -> Result<KeywordCounts> {
        let mut counts = KeywordCounts::default();
        for token in self.tokenizer.tokenize(text.as_str())? {
            if self.positive.contains(&token.text) {
                counts.positive += 1;
            }
            if self.negative.contains(&token.text) {
                counts.negative += 1;
            }
        }
        Ok(counts)
    }

    /// Decide a label and confidence from counts.
    pub fn judge(&self, counts: KeywordCounts) -> (Label, f64) {
        let diff = counts.difference();
        let close_call = counts.positive > 0 && counts.negative > 0 && diff <= 1;
        if diff == 0 || close_call {
            return (Label::Neutral, NEUTRAL_CONFIDENCE);
        }

        let label = if counts.positive > counts.negative {
            Label::Positive
        } else {
            Label::Negative
        };
        let confidence = (NEUTRAL_CONFIDENCE + self.confidence_step * f64::from(diff))
            .min(self.confidence_ceiling);
        (label, confidence)
    }

    /// Count, optionally perturb, and judge.
    pub fn classify(&self, text: &NormalizedText) -> Result<HeuristicVerdict> {
        let mut counts = self.count(text)?;
        if let Some((max_delta, rng)) = &self.jitter {
            let mut rng = rng.lock();
            let positive = rng.random_range(0..=*max_delta);
            let negative = rng.random_range(0..=*max_delta);
            counts = counts.perturbed(positive, negative);
        }
        let (label, confidence) = self.judge(counts);
        Ok(HeuristicVerdict {
            label,
            confidence,
            counts,
            jittered: self.is_jittered(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::normalizer::normalize;

    #[test]
    fn test_positive_review() {
        let heuristic = KeywordHeuristic::default();
        let verdict = heuristic
            .classify(&normalize(
                "The chocolate cake was absolutely divine! Rich flavor and perfect texture.",
            ))
            .unwrap();
        assert_eq!(verdict.label, Label::Positive);
        assert_eq!(verdict.counts, KeywordCounts::new(3, 0));
        assert!(verdict.confidence >= 0.5);
        assert!(!verdict.jittered);
    }

    #[test]
    fn test_negative_review() {
        let heuristic = KeywordHeuristic::default();
        let verdict = heuristic
            .classify(&normalize(
                "Disappointing experience. The food was cold and service was extremely slow.",
            ))
            .unwrap();
        assert_eq!(verdict.label, Label::Negative);
        assert_eq!(verdict.counts.positive, 0);
        assert!(verdict.counts.negative >= 1);
    }

    #[test]
    fn test_ties_are_neutral() {
        let heuristic = KeywordHeuristic::default();
        let verdict = heuristic.classify(&normalize("good but bad")).unwrap();
        assert_eq!(verdict.label, Label::Neutral);
        assert_eq!(verdict.confidence, NEUTRAL_CONFIDENCE);

        let verdict = heuristic.classify(&normalize("")).unwrap();
        assert_eq!(verdict.label, Label::Neutral);
        assert_eq!(verdict.counts, KeywordCounts::default());
    }

    #[test]
    fn test_close_call_is_neutral() {
        let heuristic = KeywordHeuristic::default();
        assert_eq!(heuristic.judge(KeywordCounts::new(2, 1)).0, Label::Neutral);
        assert_eq!(heuristic.judge(KeywordCounts::new(3, 1)).0, Label::Positive);
        // One-sided difference of one still wins.
        assert_eq!(heuristic.judge(KeywordCounts::new(0, 1)).0, Label::Negative);
    }

    #[test]
    fn test_confidence_scale_and_ceiling() {
        let heuristic = KeywordHeuristic::default();
        let (_, one) = heuristic.judge(KeywordCounts::new(1, 0));
        let (_, three) = heuristic.judge(KeywordCounts::new(3, 0));
        let (_, many) = heuristic.judge(KeywordCounts::new(40, 0));
        assert!((one - 0.6).abs() < 1e-12);
        assert!((three - 0.8).abs() < 1e-12);
        assert_eq!(many, 0.95);
    }

    #[test]
    fn test_custom_words_are_lowercased() {
        let config = HeuristicConfig {
            positive_words: vec!["Umami".to_string()],
            negative_words: vec!["meh".to_string()],
            ..Default::default()
        };
        let heuristic = KeywordHeuristic::new(&config).unwrap();
        assert_eq!(
            heuristic.count(&normalize("UMAMI bomb")).unwrap(),
            KeywordCounts::new(1, 0)
        );
    }

    #[test]
    fn test_invalid_config() {
        let config = HeuristicConfig {
            confidence_ceiling: 0.4,
            ..Default::default()
        };
        assert!(KeywordHeuristic::new(&config).is_err());

        let config = HeuristicConfig {
            confidence_step: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_seeded_jitter_is_tagged_and_reproducible() {
        let config = HeuristicConfig {
            jitter: Some(JitterConfig {
                max_delta: 3,
                seed: Some(7),
            }),
            ..Default::default()
        };
        let a = KeywordHeuristic::new(&config).unwrap();
        let b = KeywordHeuristic::new(&config).unwrap();
        let text = normalize("great food");

        for _ in 0..5 {
            let va = a.classify(&text).unwrap();
            let vb = b.classify(&text).unwrap();
            assert!(va.jittered);
            assert_eq!(va, vb);
            assert!(va.counts.positive >= 1 && va.counts.positive <= 4);
            assert!(va.counts.negative <= 3);
        }
    }

    #[test]
    fn test_jitter_counts_saturate() {
        let counts = KeywordCounts::new(3, 1).perturbed(u32::MAX, 0);
        assert_eq!(counts, KeywordCounts::new(u32::MAX, 1));

        let heuristic = KeywordHeuristic::default();
        let (label, confidence) = heuristic.judge(counts);
        assert_eq!(label, Label::Positive);
        assert_eq!(confidence, 0.95);

        let config = HeuristicConfig {
            jitter: Some(JitterConfig {
                max_delta: u32::MAX,
                seed: Some(11),
            }),
            ..Default::default()
        };
        let heuristic = KeywordHeuristic::new(&config).unwrap();
        let text = normalize("great great great food, perfect and rich");
        for _ in 0..50 {
            let verdict = heuristic.classify(&text).unwrap();
            assert!((0.5..=0.95).contains(&verdict.confidence));
        }
    }
}

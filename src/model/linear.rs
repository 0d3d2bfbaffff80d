//! Linear decision functions shared by the SVM and logistic regression.

use crate::error::{PalateError, Result};
use crate::model::label::Label;
use crate::model::math::argmax;
use crate::vectorizer::FeatureVector;

/// Weights of a linear classifier: one row per class, or a single row for a
/// binary problem where a positive score selects `classes[1]`.
#[derive(Clone, Debug)]
pub struct LinearWeights {
    classes: Vec<Label>,
    coef: Vec<Vec<f64>>,
    intercept: Vec<f64>,
    n_features: usize,
}

impl LinearWeights {
    /// Validate the shape of fitted weights.
    pub fn new(classes: Vec<Label>, coef: Vec<Vec<f64>>, intercept: Vec<f64>) -> Result<Self> {
        validate_classes(&classes)?;

        let expected_rows = if classes.len() == 2 { 1 } else { classes.len() };
        if coef.len() != expected_rows {
            return Err(PalateError::artifact(format!(
                "{} classes need {expected_rows} coefficient row(s), found {}",
                classes.len(),
                coef.len()
            )));
        }
        if intercept.len() != expected_rows {
            return Err(PalateError::artifact(format!(
                "expected {expected_rows} intercept(s), found {}",
                intercept.len()
            )));
        }

        let n_features = validate_matrix(&coef, "coef")?;
        if intercept.iter().any(|b| !b.is_finite()) {
            return Err(PalateError::artifact("intercept contains a non-finite value"));
        }

        Ok(Self {
            classes,
            coef,
            intercept,
            n_features,
        })
    }

    /// Class order of the weights.
    pub fn classes(&self) -> &[Label] {
        &self.classes
    }

    /// Number of features each row expects.
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Whether this is a single-row binary model.
    pub fn is_binary(&self) -> bool {
        self.coef.len() == 1
    }

    /// Raw scores: one per row.
    pub fn decision_function(&self, features: &FeatureVector) -> Result<Vec<f64>> {
        check_dimension(self.n_features, features)?;
        Ok(self
            .coef
            .iter()
            .zip(&self.intercept)
            .map(|(row, bias)| features.dot(row) + bias)
            .collect())
    }

    /// The label selected by a set of decision scores.
    pub fn winner(&self, scores: &[f64]) -> Label {
        if self.is_binary() {
            if scores[0] > 0.0 {
                self.classes[1]
            } else {
                self.classes[0]
            }
        } else {
            self.classes[argmax(scores)]
        }
    }
}

pub(crate) fn validate_classes(classes: &[Label]) -> Result<()> {
    if classes.len() < 2 {
        return Err(PalateError::artifact(format!(
            "a classifier needs at least two classes, found {}",
            classes.len()
        )));
    }
    for (i, label) in classes.iter().enumerate() {
        if classes[..i].contains(label) {
            return Err(PalateError::artifact(format!("class '{label}' listed twice")));
        }
    }
    Ok(())
}

/// Check that every row has the same width and only finite values. Returns the width.
pub(crate) fn validate_matrix(rows: &[Vec<f64>], what: &str) -> Result<usize> {
    let width = rows.first().map(Vec::len).unwrap_or(0);
    for (i, row) in rows.iter().enumerate() {
        if row.len() != width {
            return Err(PalateError::artifact(format!(
                "{what} row {i} has {} columns, expected {width}",
                row.len()
            )));
        }
        if row.iter().any(|v| !v.is_finite()) {
            return Err(PalateError::artifact(format!(
                "{what} row {i} contains a non-finite value"
            )));
        }
    }
    Ok(width)
}

pub(crate) fn check_dimension(expected: usize, features: &FeatureVector) -> Result<()> {
    if features.dimension() != expected {
        return Err(PalateError::DimensionMismatch {
            expected,
            actual: features.dimension(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_decision() {
        let weights = LinearWeights::new(
            vec![Label::Negative, Label::Positive],
            vec![vec![1.0, -1.0]],
            vec![0.0],
        )
        .unwrap();
        assert!(weights.is_binary());

        let scores = weights
            .decision_function(&FeatureVector::from_dense(&[2.0, 0.0]))
            .unwrap();
        assert_eq!(scores, vec![2.0]);
        assert_eq!(weights.winner(&scores), Label::Positive);
        assert_eq!(weights.winner(&[0.0]), Label::Negative);
    }

    #[test]
    fn test_multiclass_decision() {
        let weights = LinearWeights::new(
            vec![Label::Negative, Label::Neutral, Label::Positive],
            vec![vec![1.0, 0.0], vec![0.0, 0.0], vec![0.0, 1.0]],
            vec![0.0, 0.1, 0.0],
        )
        .unwrap();
        let features = FeatureVector::from_dense(&[0.0, 0.0]);
        let scores = weights.decision_function(&features).unwrap();
        assert_eq!(weights.winner(&scores), Label::Neutral);
    }

    #[test]
    fn test_shape_errors() {
        let classes = vec![Label::Negative, Label::Positive];
        assert!(
            LinearWeights::new(classes.clone(), vec![vec![1.0], vec![1.0]], vec![0.0, 0.0]).is_err()
        );
        assert!(LinearWeights::new(classes.clone(), vec![vec![1.0]], vec![]).is_err());
        assert!(LinearWeights::new(classes.clone(), vec![vec![f64::NAN]], vec![0.0]).is_err());
        assert!(LinearWeights::new(vec![Label::Positive], vec![vec![1.0]], vec![0.0]).is_err());
        assert!(
            LinearWeights::new(vec![Label::Positive, Label::Positive], vec![vec![1.0]], vec![0.0])
                .is_err()
        );
    }

    #[test]
    fn test_dimension_mismatch() {
        let weights = LinearWeights::new(
            vec![Label::Negative, Label::Positive],
            vec![vec![1.0, 1.0]],
            vec![0.0],
        )
        .unwrap();
        let err = weights
            .decision_function(&FeatureVector::zeros(3))
            .unwrap_err();
        assert!(matches!(
            err,
            PalateError::DimensionMismatch {
                expected: 2,
                actual: 3
            }
        ));
    }
}

use std::fmt;
use ndarray::Array1;
use crate::error::PredictorError;

/// Classification scores for a set of predictions, with label 1 (`true`)
/// treated as the positive class.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
}

impl Evaluation {
    pub fn compute(
        y_true: &Array1<bool>,
        y_pred: &Array1<bool>,
    ) -> Result<Self, PredictorError> {
        if y_true.is_empty() || y_pred.is_empty() {
            return Err(PredictorError::InvalidInput(
                "label vectors must not be empty".to_string(),
            ));
        }
        if y_true.len() != y_pred.len() {
            return Err(PredictorError::InvalidInput(format!(
                "label vectors are misaligned: {} true labels vs {} predictions",
                y_true.len(),
                y_pred.len()
            )));
        }

        let mut true_positives = 0usize;
        let mut true_negatives = 0usize;
        let mut false_positives = 0usize;
        let mut false_negatives = 0usize;

        for (&truth, &predicted) in y_true.iter().zip(y_pred.iter()) {
            match (truth, predicted) {
                (true, true) => true_positives += 1,
                (false, false) => true_negatives += 1,
                (false, true) => false_positives += 1,
                (true, false) => false_negatives += 1,
            }
        }

        let total = y_true.len() as f64;
        let accuracy = (true_positives + true_negatives) as f64 / total;
        let precision = ratio_or_zero(true_positives, true_positives + false_positives);
        let recall = ratio_or_zero(true_positives, true_positives + false_negatives);

        Ok(Self {
            accuracy,
            precision,
            recall,
        })
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Accuracy: {:.4}, Precision: {:.4}, Recall: {:.4}",
            self.accuracy, self.precision, self.recall
        )
    }
}

fn ratio_or_zero(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

use ndarray::{ArrayView1, Zip};

use crate::{MlErr, Result};

/// Probabilities are clamped to `[PROBABILITY_EPS, 1 - PROBABILITY_EPS]` before taking
/// logarithms.
pub const PROBABILITY_EPS: f32 = 1e-7;

/// Negative average log-likelihood of binary labels (binary cross entropy).
#[derive(Default, Clone, Copy, Debug)]
pub struct LogLoss;

impl LogLoss {
    /// Returns a new `LogLoss`.
    pub fn new() -> Self {
        Self
    }

    /// Computes `-mean(y·ln p + (1 - y)·ln(1 - p))`.
    ///
    /// # Arguments
    /// * `y_pred` - The predicted probabilities.
    /// * `y` - The true labels.
    ///
    /// # Returns
    /// The loss, or an error if the vectors differ in length or are empty.
    pub fn loss(&self, y_pred: ArrayView1<f32>, y: ArrayView1<f32>) -> Result<f32> {
        if y_pred.len() != y.len() {
            return Err(MlErr::SizeMismatch {
                what: "labels",
                got: y.len(),
                expected: y_pred.len(),
            });
        }

        if y.is_empty() {
            return Err(MlErr::EmptyDataset);
        }

        // f64 accumulator, an f32 sum loses precision over millions of rows.
        let total = Zip::from(&y_pred).and(&y).fold(0f64, |acc, &p, &y| {
            let p = p.clamp(PROBABILITY_EPS, 1. - PROBABILITY_EPS);
            acc + (y * p.ln() + (1. - y) * (1. - p).ln()) as f64
        });

        Ok((-total / y.len() as f64) as f32)
    }
}

use ndarray::{ArrayView1, ArrayViewMut1};

use super::Optimizer;
use crate::{MlErr, Result};

/// Gradient descent optimization algorithm.
#[derive(Debug, Clone, Copy)]
pub struct GradientDescent {
    learning_rate: f32,
}

impl GradientDescent {
    /// Returns a new `GradientDescent`.
    ///
    /// # Arguments
    /// * `learning_rate` - The *length* of the steps taken on `update_params`.
    ///
    /// # Returns
    /// An error if the learning rate isn't a finite positive number.
    pub fn new(learning_rate: f32) -> Result<Self> {
        if !learning_rate.is_finite() || learning_rate <= 0. {
            return Err(MlErr::InvalidHyperparameter {
                name: "learning_rate",
                value: learning_rate,
            });
        }

        Ok(Self { learning_rate })
    }

    pub fn learning_rate(&self) -> f32 {
        self.learning_rate
    }
}

impl Optimizer for GradientDescent {
    /// Makes a step in the opposite direction of the gradient, with a length of
    /// `learning_rate`.
    fn update_params(&mut self, grad: ArrayView1<f32>, mut params: ArrayViewMut1<f32>) -> Result<()> {
        if grad.len() != params.len() {
            return Err(MlErr::SizeMismatch {
                what: "gradient",
                got: grad.len(),
                expected: params.len(),
            });
        }

        params.scaled_add(-self.learning_rate, &grad);
        Ok(())
    }
}

use std::num::NonZeroUsize;

use rand::Rng;

use super::{DescentMode, Trainer};
use crate::{MlErr, Result, arch::Regularization, optimization::GradientDescent};

/// Builds gradient descent `Trainer`s, validating the hyperparameters on `build`.
#[derive(Debug, Clone)]
pub struct TrainerBuilder {
    learning_rate: f32,
    iterations: usize,
    regularization: Regularization,
    mode: DescentMode,
}

impl Default for TrainerBuilder {
    fn default() -> Self {
        Self {
            learning_rate: 0.05,
            iterations: 100,
            regularization: Regularization::None,
            mode: DescentMode::FullBatch,
        }
    }
}

impl TrainerBuilder {
    /// Creates a new `TrainerBuilder` with a learning rate of 0.05, 100 iterations, no
    /// regularization and full batch descent.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn learning_rate(mut self, learning_rate: f32) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn regularization(mut self, regularization: Regularization) -> Self {
        self.regularization = regularization;
        self
    }

    pub fn mode(mut self, mode: DescentMode) -> Self {
        self.mode = mode;
        self
    }

    /// Builds a new `Trainer`.
    ///
    /// # Arguments
    /// * `rng` - The random number generator the trainer will own.
    ///
    /// # Errors
    /// Returns an `MlErr` if the learning rate isn't a finite positive number, if there are
    /// no iterations or if the regularization strength is negative or not finite.
    pub fn build<R: Rng>(&self, rng: R) -> Result<Trainer<GradientDescent, R>> {
        let optimizer = GradientDescent::new(self.learning_rate)?;

        let iterations =
            NonZeroUsize::new(self.iterations).ok_or(MlErr::InvalidHyperparameter {
                name: "iterations",
                value: 0.,
            })?;

        self.regularization.validate()?;

        Ok(Trainer::new(
            optimizer,
            self.regularization,
            iterations,
            self.mode,
            rng,
        ))
    }
}

use std::num::NonZeroUsize;

use log::{debug, info, warn};
use ndarray::Array1;
use rand::{Rng, seq::SliceRandom};

use super::{IterationMetrics, TrainingHistory};
use crate::{
    MlErr, Result,
    arch::{Regularization, ops},
    data::Dataset,
    initialization::ParamGen,
    optimization::Optimizer,
};

/// How the training rows are used on each iteration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DescentMode {
    /// One update per iteration with the gradient over the whole training set.
    #[default]
    FullBatch,
    /// One update per training row per iteration, visiting the rows in a fresh random order.
    Stochastic,
}

/// The result of a training run.
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    pub weights: Array1<f32>,
    pub history: TrainingHistory,
}

/// A logistic regression `Trainer`. Contains the relevant components for running gradient
/// descent on the weights of a model.
pub struct Trainer<O, R>
where
    O: Optimizer,
    R: Rng,
{
    optimizer: O,
    regularization: Regularization,
    iterations: NonZeroUsize,
    mode: DescentMode,
    rng: R,
}

impl<O, R> Trainer<O, R>
where
    O: Optimizer,
    R: Rng,
{
    /// Returns a new `Trainer`.
    ///
    /// # Arguments
    /// * `optimizer` - The rule used to update the weights given a gradient.
    /// * `regularization` - The penalty added to the loss and its gradient.
    /// * `iterations` - The fixed amount of iterations to run, there's no early stopping.
    /// * `mode` - Whether to take full batch or single row steps.
    /// * `rng` - A random number generator, used for ordering rows in stochastic mode.
    pub fn new(
        optimizer: O,
        regularization: Regularization,
        iterations: NonZeroUsize,
        mode: DescentMode,
        rng: R,
    ) -> Self {
        Self {
            optimizer,
            regularization,
            iterations,
            mode,
            rng,
        }
    }

    pub fn regularization(&self) -> Regularization {
        self.regularization
    }

    pub fn iterations(&self) -> usize {
        self.iterations.get()
    }

    pub fn mode(&self) -> DescentMode {
        self.mode
    }

    /// Trains fresh weights on `train`, recording the loss and accuracy on both `train` and
    /// `validation` after every iteration. The validation set never takes part in the
    /// updates.
    ///
    /// # Arguments
    /// * `train` - The training set.
    /// * `validation` - The validation set, with the same amount of features.
    /// * `param_gen` - The generator for the initial weights.
    ///
    /// # Returns
    /// The final weights and the history of metrics.
    ///
    /// # Errors
    /// Returns an `MlErr` if the datasets disagree on the amount of features or the
    /// generator doesn't produce one weight per feature.
    pub fn train<G: ParamGen>(
        &mut self,
        train: &Dataset,
        validation: &Dataset,
        mut param_gen: G,
    ) -> Result<TrainingOutcome> {
        let nfeatures = train.nfeatures();
        if validation.nfeatures() != nfeatures {
            return Err(MlErr::SizeMismatch {
                what: "validation features",
                got: validation.nfeatures(),
                expected: nfeatures,
            });
        }

        let mut w = param_gen.sample(nfeatures);
        if w.len() != nfeatures {
            return Err(MlErr::SizeMismatch {
                what: "initial weights",
                got: w.len(),
                expected: nfeatures,
            });
        }

        let iterations = self.iterations.get();
        let mut history = TrainingHistory::with_capacity(iterations);

        info!(
            "training {nfeatures} weights for {iterations} iterations ({:?}, {:?}) on {} rows",
            self.mode,
            self.regularization,
            train.len()
        );

        for iteration in 0..iterations {
            self.step(train, &mut w)?;

            let metrics = self.evaluate(train, validation, &w)?;
            debug!(
                iteration = iteration,
                train_loss = metrics.train_loss,
                train_accuracy = metrics.train_accuracy,
                validation_accuracy = metrics.validation_accuracy;
                "iteration finished"
            );
            history.push(metrics);
        }

        if !w.iter().all(|w| w.is_finite()) {
            warn!("training finished with non finite weights, try a smaller learning rate");
        }

        if let Some(last) = history.last() {
            info!(
                "training finished: train accuracy {:.4}, validation accuracy {:.4}",
                last.train_accuracy, last.validation_accuracy
            );
        }

        Ok(TrainingOutcome {
            weights: w,
            history,
        })
    }

    fn step(&mut self, train: &Dataset, w: &mut Array1<f32>) -> Result<()> {
        let reg = self.regularization;

        match self.mode {
            DescentMode::FullBatch => {
                let grad = ops::gradient(train.x(), train.y(), w.view(), reg)?;
                self.optimizer.update_params(grad.view(), w.view_mut())?;
            }
            DescentMode::Stochastic => {
                let mut order: Vec<usize> = (0..train.len()).collect();
                order.shuffle(&mut self.rng);

                let (x, y) = (train.x(), train.y());
                for i in order {
                    let grad = ops::point_gradient(x.row(i), y[i], w.view(), reg)?;
                    self.optimizer.update_params(grad.view(), w.view_mut())?;
                }
            }
        }

        Ok(())
    }

    fn evaluate(
        &self,
        train: &Dataset,
        validation: &Dataset,
        w: &Array1<f32>,
    ) -> Result<IterationMetrics> {
        let reg = self.regularization;
        let w = w.view();

        Ok(IterationMetrics {
            train_loss: ops::loss(train.x(), train.y(), w, reg)?,
            train_accuracy: ops::accuracy(train.x(), train.y(), w)?,
            validation_loss: ops::loss(validation.x(), validation.y(), w, reg)?,
            validation_accuracy: ops::accuracy(validation.x(), validation.y(), w)?,
        })
    }
}

use log::info;
use machine_learning::{
    arch::Regularization,
    data::Dataset,
    initialization::RandParamGen,
    training::{IterationMetrics, TrainingOutcome},
};
use ndarray::Array1;
use rand::{SeedableRng, rngs::StdRng};

use crate::{
    config::{ExperimentConfig, Norm},
    error::{AppErr, Result},
};

/// The outcome of a single training run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub seed: u64,
    pub regularization: Regularization,
    pub outcome: TrainingOutcome,
}

/// The final state of one run of a sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepPoint {
    pub lambda: f32,
    pub weights_norm: f32,
    pub metrics: IterationMetrics,
}

#[derive(Debug, Clone)]
pub struct SweepReport {
    pub seed: u64,
    pub norm: Norm,
    pub points: Vec<SweepPoint>,
}

/// An experiment composes loading, splitting and training from a validated configuration.
///
/// Every source of randomness derives from a single seed, so an experiment is reproducible
/// given its configuration and [`Experiment::seed`].
#[derive(Debug)]
pub struct Experiment {
    config: ExperimentConfig,
    seed: u64,
}

impl Experiment {
    /// Creates a new `Experiment`, drawing a random seed if the configuration has none.
    ///
    /// # Errors
    /// Returns `AppErr::InvalidConfig` if the configuration doesn't validate.
    pub fn new(config: ExperimentConfig) -> Result<Self> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(rand::random);
        info!(seed = seed; "experiment configured");

        Ok(Self { config, seed })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    /// Loads the dataset and splits it into training and validation subsets.
    pub fn prepare(&self) -> Result<(Dataset, Dataset)> {
        let dataset = &self.config.dataset;
        let path = dataset
            .path
            .as_ref()
            .ok_or_else(|| AppErr::InvalidConfig("missing dataset.path".into()))?;

        let mut data = Dataset::load(path, &self.config.load_options())?;
        if dataset.intercept {
            data = data.with_intercept();
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        Ok(data.split(self.config.split.holdout, &mut rng)?)
    }

    /// Trains a single model with the configured hyperparameters.
    pub fn run(&self) -> Result<RunReport> {
        let (train, validation) = self.prepare()?;
        self.run_on(&train, &validation)
    }

    /// Trains a single model on an already prepared split.
    pub fn run_on(&self, train: &Dataset, validation: &Dataset) -> Result<RunReport> {
        let regularization = self.config.training.regularization.resolve()?;
        let outcome = self.train(train, validation, regularization)?;

        Ok(RunReport {
            seed: self.seed,
            regularization,
            outcome,
        })
    }

    /// Trains one model per configured regularization strength.
    pub fn sweep(&self) -> Result<SweepReport> {
        let (train, validation) = self.prepare()?;
        self.sweep_on(&train, &validation)
    }

    /// Trains one model per configured regularization strength on an already prepared
    /// split. Every run starts from the same initial weights.
    ///
    /// # Errors
    /// Returns `AppErr::InvalidConfig` if the configured norm is `none`.
    pub fn sweep_on(&self, train: &Dataset, validation: &Dataset) -> Result<SweepReport> {
        let norm = self.config.training.regularization.norm;
        if norm == Norm::None {
            return Err(AppErr::InvalidConfig(
                "a sweep needs an l1 or l2 regularization norm".into(),
            ));
        }

        let base = self.config.training.regularization.resolve()?;
        let lambdas = &self.config.sweep.lambdas;
        let mut points = Vec::with_capacity(lambdas.len());

        for &lambda in lambdas {
            let regularization = base.with_lambda(lambda)?;

            info!("sweep run with {regularization:?}");
            let outcome = self.train(train, validation, regularization)?;

            let Some(metrics) = outcome.history.last() else {
                continue;
            };

            points.push(SweepPoint {
                lambda,
                weights_norm: l2_norm(&outcome.weights),
                metrics,
            });
        }

        Ok(SweepReport {
            seed: self.seed,
            norm,
            points,
        })
    }

    fn train(
        &self,
        train: &Dataset,
        validation: &Dataset,
        regularization: Regularization,
    ) -> Result<TrainingOutcome> {
        let init_rng = StdRng::seed_from_u64(self.seed.wrapping_add(1));
        let train_rng = StdRng::seed_from_u64(self.seed.wrapping_add(2));

        let param_gen = RandParamGen::standard(init_rng)?;
        let mut trainer = self
            .config
            .trainer_builder()?
            .regularization(regularization)
            .build(train_rng)?;

        Ok(trainer.train(train, validation, param_gen)?)
    }
}

pub fn l2_norm(w: &Array1<f32>) -> f32 {
    w.dot(w).sqrt()
}

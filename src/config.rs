use std::{
    fs,
    path::{Path, PathBuf},
};

use clap::ValueEnum;
use machine_learning::{
    arch::Regularization,
    data::{DEFAULT_HOLDOUT, LoadOptions},
    training::{DescentMode, TrainerBuilder},
};
use serde::{Deserialize, Serialize};

use crate::error::{AppErr, Result};

/// Which penalty to put on the weights.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Norm {
    #[default]
    None,
    L1,
    L2,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    FullBatch,
    Stochastic,
}

impl From<Mode> for DescentMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::FullBatch => DescentMode::FullBatch,
            Mode::Stochastic => DescentMode::Stochastic,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatasetConfig {
    pub path: Option<PathBuf>,
    pub delimiter: char,
    pub label_column: usize,
    pub max_rows: Option<usize>,
    pub intercept: bool,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        let options = LoadOptions::default();

        Self {
            path: None,
            delimiter: options.delimiter,
            label_column: options.label_column,
            max_rows: options.max_rows,
            intercept: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SplitConfig {
    pub holdout: usize,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            holdout: DEFAULT_HOLDOUT,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegularizationConfig {
    pub norm: Norm,
    pub lambda: f32,
}

impl RegularizationConfig {
    /// Resolves the configured norm and strength into a `Regularization`.
    pub fn resolve(&self) -> Result<Regularization> {
        let reg = match self.norm {
            Norm::None => Regularization::None,
            Norm::L1 => Regularization::l1(self.lambda)?,
            Norm::L2 => Regularization::l2(self.lambda)?,
        };

        Ok(reg)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrainingConfig {
    pub learning_rate: f32,
    pub iterations: usize,
    pub mode: Mode,
    pub regularization: RegularizationConfig,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.05,
            iterations: 100,
            mode: Mode::FullBatch,
            regularization: RegularizationConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SweepConfig {
    pub lambdas: Vec<f32>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            lambdas: vec![0., 0.01, 0.1, 1., 10.],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Where to write the training history (or the sweep results) as JSON.
    pub history: Option<PathBuf>,
}

/// The whole description of an experiment. Every field has a default, so an empty JSON
/// object is a valid configuration file (though a dataset path must still be given).
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExperimentConfig {
    pub dataset: DatasetConfig,
    pub split: SplitConfig,
    pub training: TrainingConfig,
    pub sweep: SweepConfig,
    pub seed: Option<u64>,
    pub output: OutputConfig,
}

impl ExperimentConfig {
    /// Reads an `ExperimentConfig` from a JSON file.
    ///
    /// # Errors
    /// Returns an `AppErr` if the file can't be read or isn't a valid configuration.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Checks every setting that can be checked without touching the data.
    ///
    /// # Errors
    /// Returns `AppErr::InvalidConfig` describing the first invalid setting.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(AppErr::InvalidConfig(msg));

        if self.dataset.path.is_none() {
            return invalid("missing dataset.path".into());
        }

        if self.split.holdout == 0 {
            return invalid("split.holdout must be greater than 0".into());
        }

        let training = &self.training;
        if training.iterations == 0 {
            return invalid("training.iterations must be greater than 0".into());
        }

        if !training.learning_rate.is_finite() || training.learning_rate <= 0. {
            return invalid(format!(
                "training.learning_rate must be a positive number, got {}",
                training.learning_rate
            ));
        }

        let lambda = training.regularization.lambda;
        if !lambda.is_finite() || lambda < 0. {
            return invalid(format!(
                "training.regularization.lambda must be a non negative number, got {lambda}"
            ));
        }

        if self.sweep.lambdas.is_empty() {
            return invalid("sweep.lambdas must not be empty".into());
        }

        if let Some(bad) = self
            .sweep
            .lambdas
            .iter()
            .find(|l| !l.is_finite() || **l < 0.)
        {
            return invalid(format!("sweep.lambdas contains an invalid value: {bad}"));
        }

        Ok(())
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            delimiter: self.dataset.delimiter,
            label_column: self.dataset.label_column,
            max_rows: self.dataset.max_rows,
        }
    }

    /// Returns a builder for trainers with the configured hyperparameters.
    pub fn trainer_builder(&self) -> Result<TrainerBuilder> {
        let training = &self.training;

        Ok(TrainerBuilder::new()
            .learning_rate(training.learning_rate)
            .iterations(training.iterations)
            .regularization(training.regularization.resolve()?)
            .mode(training.mode.into()))
    }
}

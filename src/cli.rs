use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{ExperimentConfig, Mode, Norm};

/// Logistic regression with gradient descent on the SUSY dataset.
#[derive(Parser, Debug)]
#[command(name = "susy-logreg", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Trains a single model and reports its final accuracies and weights.
    Train(TrainArgs),
    /// Trains one model per regularization strength on the same split.
    Sweep(SweepArgs),
}

/// Flags shared by every command. Each one overrides its configuration file counterpart.
#[derive(Args, Debug, Default)]
pub struct CommonArgs {
    /// JSON configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Delimited data file, label in the first column.
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    #[arg(long)]
    pub learning_rate: Option<f32>,

    #[arg(short = 'n', long)]
    pub iterations: Option<usize>,

    /// Rows held out for validation.
    #[arg(long)]
    pub holdout: Option<usize>,

    #[arg(long)]
    pub seed: Option<u64>,

    /// Read at most this many rows.
    #[arg(long)]
    pub max_rows: Option<usize>,

    /// Prepend a constant column so the model learns a bias. `--intercept=false` turns off
    /// an intercept enabled in the configuration file.
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub intercept: Option<bool>,

    /// Update the weights once per row instead of once per iteration. `--stochastic=false`
    /// switches back to full batch descent.
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub stochastic: Option<bool>,
}

#[derive(Args, Debug)]
pub struct TrainArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    #[arg(long, value_enum)]
    pub norm: Option<Norm>,

    /// Regularization strength.
    #[arg(long)]
    pub lambda: Option<f32>,

    /// Write the per iteration history as JSON.
    #[arg(long)]
    pub history: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct SweepArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    #[arg(long, value_enum)]
    pub norm: Option<Norm>,

    /// Comma separated regularization strengths.
    #[arg(long, value_delimiter = ',')]
    pub lambdas: Option<Vec<f32>>,

    /// Write the sweep results as JSON.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl CommonArgs {
    /// Overrides the fields of `config` that were given on the command line.
    pub fn apply(&self, config: &mut ExperimentConfig) {
        if let Some(data) = &self.data {
            config.dataset.path = Some(data.clone());
        }
        if let Some(lr) = self.learning_rate {
            config.training.learning_rate = lr;
        }
        if let Some(iterations) = self.iterations {
            config.training.iterations = iterations;
        }
        if let Some(holdout) = self.holdout {
            config.split.holdout = holdout;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(max_rows) = self.max_rows {
            config.dataset.max_rows = Some(max_rows);
        }
        if let Some(intercept) = self.intercept {
            config.dataset.intercept = intercept;
        }
        if let Some(stochastic) = self.stochastic {
            config.training.mode = if stochastic {
                Mode::Stochastic
            } else {
                Mode::FullBatch
            };
        }
    }
}

impl TrainArgs {
    pub fn apply(&self, config: &mut ExperimentConfig) {
        self.common.apply(config);

        if let Some(norm) = self.norm {
            config.training.regularization.norm = norm;
        }
        if let Some(lambda) = self.lambda {
            config.training.regularization.lambda = lambda;
        }
        if let Some(history) = &self.history {
            config.output.history = Some(history.clone());
        }
    }
}

impl SweepArgs {
    pub fn apply(&self, config: &mut ExperimentConfig) {
        self.common.apply(config);

        if let Some(norm) = self.norm {
            config.training.regularization.norm = norm;
        }
        if let Some(lambdas) = &self.lambdas {
            config.sweep.lambdas = lambdas.clone();
        }
        if let Some(output) = &self.output {
            config.output.history = Some(output.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn train_flags_override_the_config() {
        let cli = Cli::try_parse_from([
            "susy-logreg",
            "train",
            "--data",
            "SUSY.csv",
            "--learning-rate",
            "0.2",
            "-n",
            "15",
            "--norm",
            "l1",
            "--lambda",
            "0.3",
            "--stochastic",
        ])
        .unwrap();

        let Command::Train(args) = cli.command else {
            panic!("expected train");
        };

        let mut config = ExperimentConfig::default();
        config.split.holdout = 10;
        args.apply(&mut config);

        assert_eq!(config.dataset.path, Some(PathBuf::from("SUSY.csv")));
        assert_eq!(config.training.learning_rate, 0.2);
        assert_eq!(config.training.iterations, 15);
        assert_eq!(config.training.regularization.norm, Norm::L1);
        assert_eq!(config.training.regularization.lambda, 0.3);
        assert_eq!(config.training.mode, Mode::Stochastic);
        assert_eq!(config.split.holdout, 10);
    }

    #[test]
    fn sweep_parses_a_lambda_list() {
        let cli = Cli::try_parse_from([
            "susy-logreg",
            "sweep",
            "--norm",
            "l2",
            "--lambdas",
            "0,0.5,2",
        ])
        .unwrap();

        let Command::Sweep(args) = cli.command else {
            panic!("expected sweep");
        };

        let mut config = ExperimentConfig::default();
        args.apply(&mut config);

        assert_eq!(config.sweep.lambdas, vec![0., 0.5, 2.]);
        assert_eq!(config.training.regularization.norm, Norm::L2);
    }

    #[test]
    fn switches_can_turn_config_settings_off() {
        let cli = Cli::try_parse_from([
            "susy-logreg",
            "train",
            "--intercept=false",
            "--stochastic=false",
        ])
        .unwrap();

        let Command::Train(args) = cli.command else {
            panic!("expected train");
        };

        let mut config = ExperimentConfig::default();
        config.dataset.intercept = true;
        config.training.mode = Mode::Stochastic;
        args.apply(&mut config);

        assert!(!config.dataset.intercept);
        assert_eq!(config.training.mode, Mode::FullBatch);
    }

    #[test]
    fn absent_switches_keep_config_settings() {
        let cli = Cli::try_parse_from(["susy-logreg", "sweep", "--intercept"]).unwrap();

        let Command::Sweep(args) = cli.command else {
            panic!("expected sweep");
        };

        let mut config = ExperimentConfig::default();
        config.training.mode = Mode::Stochastic;
        args.apply(&mut config);

        assert!(config.dataset.intercept);
        assert_eq!(config.training.mode, Mode::Stochastic);
    }

    #[test]
    fn unknown_norm_is_rejected() {
        assert!(Cli::try_parse_from(["susy-logreg", "train", "--norm", "l3"]).is_err());
    }
}

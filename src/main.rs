use std::io;

use anyhow::Context;
use clap::Parser;
use log::info;

use susy_logreg::{
    Experiment,
    cli::{Cli, Command, CommonArgs},
    config::ExperimentConfig,
    report,
};

fn load_config(common: &CommonArgs) -> anyhow::Result<ExperimentConfig> {
    let Some(path) = &common.config else {
        return Ok(ExperimentConfig::default());
    };

    info!("reading configuration from {}", path.display());
    ExperimentConfig::from_path(path)
        .with_context(|| format!("cannot load configuration '{}'", path.display()))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut stdout = io::stdout().lock();

    match cli.command {
        Command::Train(args) => {
            let mut config = load_config(&args.common)?;
            args.apply(&mut config);

            let history = config.output.history.clone();
            let experiment = Experiment::new(config)?;
            let run = experiment.run().context("training failed")?;

            report::print_run(&run, &mut stdout)?;
            if let Some(path) = history {
                report::write_json(&report::run_json(&run)?, &path)
                    .with_context(|| format!("cannot write history to '{}'", path.display()))?;
            }
        }
        Command::Sweep(args) => {
            let mut config = load_config(&args.common)?;
            args.apply(&mut config);

            let output = config.output.history.clone();
            let experiment = Experiment::new(config)?;
            let sweep = experiment.sweep().context("sweep failed")?;

            report::print_sweep(&sweep, &mut stdout)?;
            if let Some(path) = output {
                report::write_json(&report::sweep_json(&sweep)?, &path)
                    .with_context(|| format!("cannot write sweep to '{}'", path.display()))?;
            }
        }
    }

    Ok(())
}

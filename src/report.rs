use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use log::info;
use machine_learning::arch::Regularization;
use serde::Serialize;

use crate::{
    config::{Norm, RegularizationConfig},
    error::Result,
    experiment::{RunReport, SweepReport, l2_norm},
};

#[derive(Serialize)]
struct RunRecord<'a> {
    seed: u64,
    regularization: RegularizationConfig,
    weights: Vec<f32>,
    train_loss: &'a [f32],
    train_accuracy: &'a [f32],
    validation_loss: &'a [f32],
    validation_accuracy: &'a [f32],
}

#[derive(Serialize)]
struct SweepRecord {
    lambda: f32,
    weights_norm: f32,
    train_loss: f32,
    train_accuracy: f32,
    validation_loss: f32,
    validation_accuracy: f32,
}

#[derive(Serialize)]
struct SweepRecords {
    seed: u64,
    norm: Norm,
    runs: Vec<SweepRecord>,
}

fn describe(reg: Regularization) -> RegularizationConfig {
    let norm = match reg {
        Regularization::None => Norm::None,
        Regularization::L1 { .. } => Norm::L1,
        Regularization::L2 { .. } => Norm::L2,
    };

    RegularizationConfig {
        norm,
        lambda: reg.lambda(),
    }
}

/// Writes a human readable summary of a run: final accuracies and the final weights.
pub fn print_run<W: Write>(report: &RunReport, out: &mut W) -> Result<()> {
    let outcome = &report.outcome;

    writeln!(out, "seed: {}", report.seed)?;
    writeln!(out, "regularization: {:?}", report.regularization)?;
    writeln!(out, "iterations: {}", outcome.history.len())?;

    if let Some(last) = outcome.history.last() {
        writeln!(out, "final training loss: {:.6}", last.train_loss)?;
        writeln!(out, "final training accuracy: {:.4}", last.train_accuracy)?;
        writeln!(out, "final validation loss: {:.6}", last.validation_loss)?;
        writeln!(out, "final validation accuracy: {:.4}", last.validation_accuracy)?;
    }

    writeln!(out, "weights norm: {:.6}", l2_norm(&outcome.weights))?;
    writeln!(out, "weights: {:?}", outcome.weights.to_vec())?;
    Ok(())
}

/// Writes one line per regularization strength of a sweep.
pub fn print_sweep<W: Write>(report: &SweepReport, out: &mut W) -> Result<()> {
    writeln!(out, "seed: {}", report.seed)?;
    writeln!(
        out,
        "{:>10} {:>10} {:>10} {:>10} {:>10}",
        "lambda", "|w|", "train_loss", "train_acc", "val_acc"
    )?;

    for point in &report.points {
        writeln!(
            out,
            "{:>10} {:>10.4} {:>10.4} {:>10.4} {:>10.4}",
            point.lambda,
            point.weights_norm,
            point.metrics.train_loss,
            point.metrics.train_accuracy,
            point.metrics.validation_accuracy
        )?;
    }

    Ok(())
}

/// Serializes a run, including its full history, as JSON.
pub fn run_json(report: &RunReport) -> Result<String> {
    let history = &report.outcome.history;

    let record = RunRecord {
        seed: report.seed,
        regularization: describe(report.regularization),
        weights: report.outcome.weights.to_vec(),
        train_loss: history.train_loss(),
        train_accuracy: history.train_accuracy(),
        validation_loss: history.validation_loss(),
        validation_accuracy: history.validation_accuracy(),
    };

    Ok(serde_json::to_string_pretty(&record)?)
}

/// Serializes the final metrics of every run of a sweep as JSON.
pub fn sweep_json(report: &SweepReport) -> Result<String> {
    let runs = report
        .points
        .iter()
        .map(|p| SweepRecord {
            lambda: p.lambda,
            weights_norm: p.weights_norm,
            train_loss: p.metrics.train_loss,
            train_accuracy: p.metrics.train_accuracy,
            validation_loss: p.metrics.validation_loss,
            validation_accuracy: p.metrics.validation_accuracy,
        })
        .collect();

    let records = SweepRecords {
        seed: report.seed,
        norm: report.norm,
        runs,
    };

    Ok(serde_json::to_string_pretty(&records)?)
}

/// Writes `json` to `path`, replacing any previous file.
pub fn write_json<P: AsRef<Path>>(json: &str, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut out = BufWriter::new(File::create(path)?);

    out.write_all(json.as_bytes())?;
    out.flush()?;

    info!("wrote {}", path.display());
    Ok(())
}

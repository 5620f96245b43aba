//! Writers for training results.
//!
//! - Error file: `epoch,train_error,test_error` per epoch, epoch 1-based.
//! - Clustering file: `row,col,label` per neuron, row-major, with
//!   [`UNSET_LABEL`] for unlabeled neurons.
//! - Summary: the configuration and full report as JSON.

use crate::config::MapConfig;
use crate::error::Result;
use crate::som::{LabelGrid, TrainingReport, UNSET_LABEL};
use csv::WriterBuilder;
use log::info;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes the per-epoch error traces as CSV.
///
/// Only epochs present in both traces are written.
pub fn write_errors<W: Write>(writer: W, train: &[f64], test: &[f64]) -> Result<()> {
    let mut w = WriterBuilder::new().has_headers(false).from_writer(writer);
    for (epoch, (train_error, test_error)) in train.iter().zip(test).enumerate() {
        w.write_record([
            (epoch + 1).to_string(),
            train_error.to_string(),
            test_error.to_string(),
        ])?;
    }
    w.flush()?;
    Ok(())
}

/// Writes the label grid as CSV.
pub fn write_clustering<W: Write>(writer: W, labels: &LabelGrid) -> Result<()> {
    let mut w = WriterBuilder::new().has_headers(false).from_writer(writer);
    for (row, col, label) in labels.iter() {
        w.write_record([
            row.to_string(),
            col.to_string(),
            label.unwrap_or(UNSET_LABEL).to_string(),
        ])?;
    }
    w.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct RunSummary<'a> {
    config: &'a MapConfig,
    report: &'a TrainingReport,
}

/// Writes the configuration and report as pretty-printed JSON.
pub fn write_summary<W: Write>(writer: W, config: &MapConfig, report: &TrainingReport) -> Result<()> {
    serde_json::to_writer_pretty(writer, &RunSummary { config, report })?;
    Ok(())
}

/// Writes the error file to `path`.
pub fn save_errors<P: AsRef<Path>>(path: P, report: &TrainingReport) -> Result<()> {
    let path = path.as_ref();
    let file = BufWriter::new(File::create(path)?);
    write_errors(file, &report.train_errors, &report.test_errors)?;
    info!("Wrote {} epochs of error data to {}", report.train_errors.len(), path.display());
    Ok(())
}

/// Writes the clustering file to `path`.
pub fn save_clustering<P: AsRef<Path>>(path: P, report: &TrainingReport) -> Result<()> {
    let path = path.as_ref();
    let file = BufWriter::new(File::create(path)?);
    write_clustering(file, &report.labels)?;
    info!("Wrote label grid to {}", path.display());
    Ok(())
}

/// Writes the JSON summary to `path`.
pub fn save_summary<P: AsRef<Path>>(path: P, config: &MapConfig, report: &TrainingReport) -> Result<()> {
    let path = path.as_ref();
    let mut file = BufWriter::new(File::create(path)?);
    write_summary(&mut file, config, report)?;
    file.flush()?;
    info!("Wrote run summary to {}", path.display());
    Ok(())
}

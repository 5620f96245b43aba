//! CSV dataset loading.
//!
//! Each record is `label,f1,...,fD` with no header row. The label is the
//! first character of the first field.

use crate::data::Dataset;
use crate::error::{KohonenError, Result};
use csv::{ReaderBuilder, Trim};
use log::{debug, warn};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Loads a dataset of `dimension`-feature samples from a CSV file.
pub fn load_dataset<P: AsRef<Path>>(path: P, dimension: usize) -> Result<Dataset> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(KohonenError::FileNotFound(path.to_path_buf()));
    }

    let file = File::open(path)?;
    let dataset = read_dataset(file, dimension, &path.display().to_string())?;
    debug!("Loaded {} samples from {}", dataset.len(), path.display());
    Ok(dataset)
}

/// Reads a dataset from any CSV source.
///
/// `source` names the input in error messages.
pub fn read_dataset<R: Read>(reader: R, dimension: usize, source: &str) -> Result<Dataset> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut dataset = Dataset::new(dimension);

    for result in reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if record.len() == 1 && record.get(0).map_or(true, str::is_empty) {
            continue;
        }

        if record.len() != dimension + 1 {
            return Err(KohonenError::Data(format!(
                "{}:{}: expected {} fields, found {}",
                source,
                line,
                dimension + 1,
                record.len()
            )));
        }

        let label = record
            .get(0)
            .and_then(|field| field.chars().next())
            .ok_or_else(|| KohonenError::Data(format!("{}:{}: missing label", source, line)))?;

        let features = record
            .iter()
            .skip(1)
            .map(|field| {
                let value = field.parse::<f64>().map_err(|_| {
                    KohonenError::Data(format!(
                        "{}:{}: invalid feature value `{}`",
                        source, line, field
                    ))
                })?;
                if !value.is_finite() {
                    return Err(KohonenError::Data(format!(
                        "{}:{}: non-finite feature value `{}`",
                        source, line, field
                    )));
                }
                Ok(value)
            })
            .collect::<Result<Vec<f64>>>()?;

        if dataset.insert(label, features)?.is_some() {
            warn!(
                "{}:{}: label '{}' seen again, replacing its earlier sample",
                source, line, label
            );
        }
    }

    Ok(dataset)
}

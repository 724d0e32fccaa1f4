use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use log::{debug, info};
use ndarray::{Array1, Array2};

use super::Dataset;
use crate::{MlErr, Result};

/// How to read a delimited text file of numeric rows.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// The field separator.
    pub delimiter: char,
    /// The column holding the label, every other column is a feature.
    pub label_column: usize,
    /// Stop reading after this many rows.
    pub max_rows: Option<usize>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            label_column: 0,
            max_rows: None,
        }
    }
}

impl Dataset {
    /// Loads a `Dataset` from a delimited text file without a header row.
    ///
    /// # Errors
    /// Returns an `MlErr` if the file can't be read or any of its rows is malformed.
    pub fn load<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let dataset = Self::from_reader(BufReader::new(file), options)?;

        info!(
            "loaded {} rows with {} features from {}",
            dataset.len(),
            dataset.nfeatures(),
            path.display()
        );
        Ok(dataset)
    }

    /// Reads a `Dataset` from delimited text. Blank lines are skipped.
    ///
    /// # Errors
    /// Returns an `MlErr` on I/O failures, fields that aren't numbers, rows with a different
    /// amount of columns than the first one and labels other than 0 or 1.
    pub fn from_reader<B: BufRead>(reader: B, options: &LoadOptions) -> Result<Self> {
        let mut xs = Vec::new();
        let mut ys = Vec::new();
        let mut ncols = None;

        for (i, line) in reader.lines().enumerate() {
            if options.max_rows.is_some_and(|max| ys.len() >= max) {
                debug!("stopping after {} rows", ys.len());
                break;
            }

            let line = line?;
            // Fields are trimmed one by one, so whitespace delimiters keep empty fields.
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }

            let lineno = i + 1;
            let values = line
                .split(options.delimiter)
                .map(|v| {
                    v.trim().parse::<f32>().map_err(|_| MlErr::Parse {
                        line: lineno,
                        value: v.trim().to_string(),
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            let expected = *ncols.get_or_insert(values.len());
            if values.len() != expected {
                return Err(MlErr::RaggedRow {
                    line: lineno,
                    got: values.len(),
                    expected,
                });
            }

            if options.label_column >= expected {
                return Err(MlErr::SizeMismatch {
                    what: "label column",
                    got: options.label_column,
                    expected,
                });
            }

            let label = values[options.label_column];
            if label != 0. && label != 1. {
                return Err(MlErr::InvalidLabel {
                    line: lineno,
                    value: label,
                });
            }

            ys.push(label);
            xs.extend(
                values
                    .iter()
                    .enumerate()
                    .filter(|&(j, _)| j != options.label_column)
                    .map(|(_, &v)| v),
            );
        }

        let Some(ncols) = ncols else {
            return Err(MlErr::EmptyDataset);
        };

        let x = Array2::from_shape_vec((ys.len(), ncols - 1), xs)?;
        Self::new(x, Array1::from(ys))
    }
}

use std::{
    error::Error,
    fmt::{self, Display},
    io,
};

use ndarray::ShapeError;
use rand_distr::NormalError;

/// The result type used in the entire machine learning module.
pub type Result<T> = std::result::Result<T, MlErr>;

/// The machine learning module's error type.
#[derive(Debug)]
pub enum MlErr {
    SizeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    EmptyDataset,
    InvalidHoldout {
        holdout: usize,
        rows: usize,
    },
    Parse {
        line: usize,
        value: String,
    },
    RaggedRow {
        line: usize,
        got: usize,
        expected: usize,
    },
    InvalidLabel {
        line: usize,
        value: f32,
    },
    InvalidHyperparameter {
        name: &'static str,
        value: f32,
    },
    Distribution(String),
    Shape(String),
    Io(io::Error),
}

impl Display for MlErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MlErr::SizeMismatch {
                what,
                got,
                expected,
            } => format!("There's a size mismatch for {what}, got {got} and expected {expected}"),
            MlErr::EmptyDataset => "The dataset has no rows".to_string(),
            MlErr::InvalidHoldout { holdout, rows } => format!(
                "Can't hold out {holdout} rows for validation from a dataset of {rows} rows"
            ),
            MlErr::Parse { line, value } => {
                format!("Failed to parse '{value}' as a number at line {line}")
            }
            MlErr::RaggedRow {
                line,
                got,
                expected,
            } => format!("The row at line {line} has {got} columns, expected {expected}"),
            MlErr::InvalidLabel { line, value } => {
                format!("The label at line {line} must be 0 or 1, got {value}")
            }
            MlErr::InvalidHyperparameter { name, value } => {
                format!("The value {value} is invalid for {name}")
            }
            MlErr::Distribution(msg) => format!("Failed to build the distribution: {msg}"),
            MlErr::Shape(msg) => format!("The array has an invalid shape: {msg}"),
            MlErr::Io(e) => format!("An io error occurred: {e}"),
        };

        write!(f, "{s}")
    }
}

impl Error for MlErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MlErr::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for MlErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<NormalError> for MlErr {
    fn from(value: NormalError) -> Self {
        Self::Distribution(value.to_string())
    }
}

impl From<ShapeError> for MlErr {
    fn from(value: ShapeError) -> Self {
        Self::Shape(value.to_string())
    }
}

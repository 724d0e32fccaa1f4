use std::{fmt, io};

use machine_learning::MlErr;

/// The application's result type.
pub type Result<T> = std::result::Result<T, AppErr>;

/// All errors that can occur while running an experiment.
#[derive(Debug)]
pub enum AppErr {
    /// Invalid configuration, caught before reading any data.
    InvalidConfig(String),
    /// The configuration file or a report couldn't be (de)serialized.
    Json(serde_json::Error),
    /// An underlying I/O error.
    Io(io::Error),
    /// Loading, splitting or training failed.
    Ml(MlErr),
}

impl fmt::Display for AppErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Self::Json(e) => write!(f, "json error: {e}"),
            Self::Io(e) => write!(f, "io error: {e}"),
            Self::Ml(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for AppErr {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::Ml(e) => Some(e),
            Self::InvalidConfig(_) => None,
        }
    }
}

impl From<io::Error> for AppErr {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for AppErr {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<MlErr> for AppErr {
    fn from(e: MlErr) -> Self {
        Self::Ml(e)
    }
}

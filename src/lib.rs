pub mod cli;
pub mod config;
pub mod error;
pub mod experiment;
pub mod report;

pub use error::AppErr;
pub use experiment::Experiment;

mod builder;
mod history;
mod trainer;

pub use builder::TrainerBuilder;
pub use history::{IterationMetrics, TrainingHistory};
pub use trainer::{DescentMode, Trainer, TrainingOutcome};

mod log_loss;

pub use log_loss::{LogLoss, PROBABILITY_EPS};

pub mod activations;
pub mod loss;
pub mod ops;
mod regularization;

pub use regularization::Regularization;

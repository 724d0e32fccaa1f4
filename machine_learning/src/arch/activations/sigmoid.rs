use ndarray::{Array1, ArrayView1, ArrayView2};

use crate::{MlErr, Result};

/// The logistic function.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sigmoid;

impl Sigmoid {
    /// Returns a new `Sigmoid`.
    pub fn new() -> Self {
        Self
    }

    /// Evaluates the logistic function on a single score.
    ///
    /// The exponential is only ever taken of a non-positive number, so large magnitudes
    /// saturate towards 0 or 1 instead of overflowing.
    pub fn f(&self, z: f32) -> f32 {
        if z >= 0. {
            1. / (1. + (-z).exp())
        } else {
            let e = z.exp();
            e / (1. + e)
        }
    }

    /// Computes the elementwise logistic function of the product `x · w`.
    ///
    /// # Arguments
    /// * `x` - The design matrix, one row per example.
    /// * `w` - The weight vector, one entry per column of `x`.
    ///
    /// # Returns
    /// A vector with one probability per row of `x`, or an error if the sizes don't match.
    pub fn forward(&self, x: ArrayView2<f32>, w: ArrayView1<f32>) -> Result<Array1<f32>> {
        if x.ncols() != w.len() {
            return Err(MlErr::SizeMismatch {
                what: "weights",
                got: w.len(),
                expected: x.ncols(),
            });
        }

        Ok(x.dot(&w).mapv_into(|z| self.f(z)))
    }
}

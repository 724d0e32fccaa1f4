use ndarray::Array1;
use ndarray_rand::RandomExt;
use rand::Rng;
use rand_distr::{Distribution, Normal};

use super::ParamGen;
use crate::Result;

/// Standard deviation of the default weight initialization.
pub const INIT_STD_DEV: f32 = 0.1;

/// A parameter generator that follows a certain probabilistic distribution.
pub struct RandParamGen<R: Rng, D: Distribution<f32>> {
    rng: R,
    distribution: D,
}

impl<R: Rng, D: Distribution<f32>> RandParamGen<R, D> {
    /// Creates a new `RandParamGen` parameter generator.
    ///
    /// # Arguments
    /// * `rng` - A random number generator.
    /// * `distribution` - The distribution to sample the random numbers from.
    pub fn new(rng: R, distribution: D) -> Self {
        Self { rng, distribution }
    }
}

impl<R: Rng> RandParamGen<R, Normal<f32>> {
    /// Creates a new `RandParamGen` parameter generator with a normal distribution.
    ///
    /// # Arguments
    /// * `rng` - A random number generator.
    /// * `mean` - The mean of the distribution.
    /// * `std_dev` - The standard deviation of the distribution.
    ///
    /// # Returns
    /// An error if `std_dev` is not finite (Nan or infinite).
    pub fn normal(rng: R, mean: f32, std_dev: f32) -> Result<Self> {
        Ok(Self::new(rng, Normal::new(mean, std_dev)?))
    }

    /// Creates the default generator: a normal distribution centered at zero with a
    /// standard deviation of [`INIT_STD_DEV`].
    pub fn standard(rng: R) -> Result<Self> {
        Self::normal(rng, 0., INIT_STD_DEV)
    }
}

impl<R: Rng, D: Distribution<f32> + Clone> ParamGen for RandParamGen<R, D> {
    fn sample(&mut self, n: usize) -> Array1<f32> {
        Array1::random_using(n, self.distribution.clone(), &mut self.rng)
    }
}

use ndarray::{ArrayView1, ArrayViewMut1};

use crate::Result;

/// Defines the strategy for updating the model's weights based on a computed gradient.
pub trait Optimizer {
    /// Updates the weights in place using the given gradient.
    ///
    /// # Arguments
    /// * `grad` - The gradient of the loss with respect to `params`.
    /// * `params` - The weights to update.
    ///
    /// # Returns
    /// An error if there's a mismatch in the sizes of `grad` and `params`.
    fn update_params(&mut self, grad: ArrayView1<f32>, params: ArrayViewMut1<f32>) -> Result<()>;
}

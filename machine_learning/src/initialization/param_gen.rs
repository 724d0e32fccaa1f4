use ndarray::Array1;

/// A `ParamGen` generates values for the initial state of the model's weights.
pub trait ParamGen {
    /// Samples `n` weights.
    ///
    /// # Arguments
    /// * `n` - The amount of weights to generate.
    fn sample(&mut self, n: usize) -> Array1<f32>;
}

impl<G: ParamGen + ?Sized> ParamGen for &mut G {
    fn sample(&mut self, n: usize) -> Array1<f32> {
        (**self).sample(n)
    }
}

use ndarray::Array1;

use super::ParamGen;

/// A parameter generator that always generates the same value.
#[derive(Debug, Clone, Copy)]
pub struct ConstParamGen {
    value: f32,
}

impl ConstParamGen {
    /// Creates a new `ConstParamGen` parameter generator.
    ///
    /// # Arguments
    /// * `value` - The value to always generate.
    pub fn new(value: f32) -> Self {
        Self { value }
    }
}

impl ParamGen for ConstParamGen {
    fn sample(&mut self, n: usize) -> Array1<f32> {
        Array1::from_elem(n, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeats_the_value() {
        let mut param_gen = ConstParamGen::new(0.25);

        assert_eq!(param_gen.sample(3).to_vec(), vec![0.25; 3]);
        assert!(param_gen.sample(0).is_empty());
    }
}

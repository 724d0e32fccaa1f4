use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis, concatenate};
use rand::{Rng, seq::SliceRandom};

use crate::{MlErr, Result};

/// A labeled dataset: a design matrix with one row per example and a label in {0, 1} per
/// row.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    x: Array2<f32>,
    y: Array1<f32>,
}

impl Dataset {
    /// Creates a new `Dataset`.
    ///
    /// # Arguments
    /// * `x` - The design matrix.
    /// * `y` - The labels, one per row of `x`.
    ///
    /// # Returns
    /// An error if the amount of rows and labels differ, if there are no rows, or if a
    /// label is neither 0 nor 1.
    pub fn new(x: Array2<f32>, y: Array1<f32>) -> Result<Self> {
        if x.nrows() != y.len() {
            return Err(MlErr::SizeMismatch {
                what: "labels",
                got: y.len(),
                expected: x.nrows(),
            });
        }

        if y.is_empty() {
            return Err(MlErr::EmptyDataset);
        }

        if let Some((line, &value)) = y
            .iter()
            .enumerate()
            .find(|&(_, &label)| label != 0. && label != 1.)
        {
            return Err(MlErr::InvalidLabel {
                line: line + 1,
                value,
            });
        }

        Ok(Self { x, y })
    }

    /// Returns the amount of examples.
    #[inline]
    pub fn len(&self) -> usize {
        self.y.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    /// Returns the amount of features per example.
    #[inline]
    pub fn nfeatures(&self) -> usize {
        self.x.ncols()
    }

    #[inline]
    pub fn x(&self) -> ArrayView2<'_, f32> {
        self.x.view()
    }

    #[inline]
    pub fn y(&self) -> ArrayView1<'_, f32> {
        self.y.view()
    }

    /// Prepends a constant column of ones so the model can learn a bias.
    pub fn with_intercept(self) -> Self {
        let ones = Array2::<f32>::ones((self.x.nrows(), 1));
        // Both operands have the same amount of rows.
        let x = concatenate![Axis(1), ones, self.x];
        Self { x, y: self.y }
    }

    /// Permutes the examples, keeping each row with its label.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut order: Vec<usize> = (0..self.len()).collect();
        order.shuffle(rng);
        *self = self.select(&order);
    }

    /// Returns a new dataset with the rows at `indices`, in that order.
    pub(super) fn select(&self, indices: &[usize]) -> Self {
        Self {
            x: self.x.select(Axis(0), indices),
            y: self.y.select(Axis(0), indices),
        }
    }
}

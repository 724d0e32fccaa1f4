use log::info;
use rand::{Rng, seq::SliceRandom};

use super::Dataset;
use crate::{MlErr, Result};

/// Rows held out for validation by default.
pub const DEFAULT_HOLDOUT: usize = 1000;

impl Dataset {
    /// Randomly splits the dataset into a training and a validation subset.
    ///
    /// The subsets are disjoint and together contain every row.
    ///
    /// # Arguments
    /// * `holdout` - The amount of rows for the validation subset.
    /// * `rng` - The source of randomness for shuffling the rows.
    ///
    /// # Returns
    /// `(train, validation)`, or an error if `holdout` is zero or leaves no training rows.
    pub fn split<R: Rng + ?Sized>(&self, holdout: usize, rng: &mut R) -> Result<(Self, Self)> {
        let rows = self.len();
        if holdout == 0 || holdout >= rows {
            return Err(MlErr::InvalidHoldout { holdout, rows });
        }

        let mut order: Vec<usize> = (0..rows).collect();
        order.shuffle(rng);
        let (validation, train) = order.split_at(holdout);

        info!(
            "split {rows} rows into {} training and {holdout} validation rows",
            train.len()
        );
        Ok((self.select(train), self.select(validation)))
    }
}

use ndarray::{ArrayView1, ArrayViewMut1, Zip};

use crate::{MlErr, Result};

/// An additive penalty on the magnitude of the weights.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Regularization {
    #[default]
    None,
    /// Penalizes `lambda · Σ|w|`.
    L1 { lambda: f32 },
    /// Penalizes `lambda · ‖w‖²`.
    L2 { lambda: f32 },
}

impl Regularization {
    /// Creates an L1 regularization.
    ///
    /// # Returns
    /// An error if `lambda` is negative or not finite.
    pub fn l1(lambda: f32) -> Result<Self> {
        Ok(Self::L1 {
            lambda: check_lambda(lambda)?,
        })
    }

    /// Creates an L2 regularization.
    ///
    /// # Returns
    /// An error if `lambda` is negative or not finite.
    pub fn l2(lambda: f32) -> Result<Self> {
        Ok(Self::L2 {
            lambda: check_lambda(lambda)?,
        })
    }

    /// Returns the strength of the penalty, zero when there's none.
    pub fn lambda(&self) -> f32 {
        match *self {
            Self::None => 0.,
            Self::L1 { lambda } | Self::L2 { lambda } => lambda,
        }
    }

    /// Returns the same kind of regularization with a different strength.
    pub fn with_lambda(&self, lambda: f32) -> Result<Self> {
        match self {
            Self::None => Ok(Self::None),
            Self::L1 { .. } => Self::l1(lambda),
            Self::L2 { .. } => Self::l2(lambda),
        }
    }

    /// Checks the strength of a regularization, including one built from the variants
    /// directly.
    ///
    /// # Returns
    /// An error if the strength is negative or not finite.
    pub fn validate(&self) -> Result<()> {
        check_lambda(self.lambda()).map(|_| ())
    }

    /// The penalty added to the loss for the weights `w`.
    ///
    /// # Returns
    /// An error if the strength is negative or not finite.
    pub fn penalty(&self, w: ArrayView1<f32>) -> Result<f32> {
        self.validate()?;

        let penalty = match *self {
            Self::None => 0.,
            Self::L1 { lambda } => lambda * w.iter().map(|w| w.abs()).sum::<f32>(),
            Self::L2 { lambda } => lambda * w.dot(&w),
        };

        Ok(penalty)
    }

    /// Adds the gradient of the penalty with respect to `w` into `grad`.
    ///
    /// # Arguments
    /// * `w` - The weights.
    /// * `grad` - The gradient being accumulated.
    ///
    /// # Returns
    /// An error if `w` and `grad` differ in length or the strength is invalid.
    pub fn add_gradient(&self, w: ArrayView1<f32>, mut grad: ArrayViewMut1<f32>) -> Result<()> {
        self.validate()?;

        if w.len() != grad.len() {
            return Err(MlErr::SizeMismatch {
                what: "gradient",
                got: grad.len(),
                expected: w.len(),
            });
        }

        match *self {
            Self::None => {}
            Self::L1 { lambda } => {
                Zip::from(&mut grad)
                    .and(&w)
                    .for_each(|g, &w| *g += lambda * sign(w));
            }
            Self::L2 { lambda } => grad.scaled_add(2. * lambda, &w),
        }

        Ok(())
    }
}

/// `f32::signum` maps zero to one; the subgradient of `|w|` at zero is taken as zero here.
fn sign(w: f32) -> f32 {
    if w > 0. {
        1.
    } else if w < 0. {
        -1.
    } else {
        0.
    }
}

fn check_lambda(lambda: f32) -> Result<f32> {
    if !lambda.is_finite() || lambda < 0. {
        return Err(MlErr::InvalidHyperparameter {
            name: "lambda",
            value: lambda,
        });
    }

    Ok(lambda)
}

#[cfg(test)]
mod tests {
    use ndarray::{Array1, array};

    use super::*;

    #[test]
    fn penalties() {
        let w = array![1., -2., 0., 3.];

        assert_eq!(Regularization::None.penalty(w.view()).unwrap(), 0.);
        assert_eq!(Regularization::l1(0.5).unwrap().penalty(w.view()).unwrap(), 3.);
        assert_eq!(Regularization::l2(0.5).unwrap().penalty(w.view()).unwrap(), 7.);
    }

    #[test]
    fn l1_gradient_ignores_zero_weights() {
        let w = array![1.5, -0.2, 0., -0.];
        let mut grad = Array1::zeros(4);

        Regularization::l1(2.)
            .unwrap()
            .add_gradient(w.view(), grad.view_mut())
            .unwrap();

        assert_eq!(grad, array![2., -2., 0., 0.]);
    }

    #[test]
    fn l2_gradient_is_twice_lambda_w() {
        let w = array![1., -2., 0.5];
        let mut grad = array![1., 1., 1.];

        Regularization::l2(0.25)
            .unwrap()
            .add_gradient(w.view(), grad.view_mut())
            .unwrap();

        assert_eq!(grad, array![1.5, 0., 1.25]);
    }

    #[test]
    fn zero_strength_l2_changes_nothing() {
        let w = array![0.3, -0.7, 1.1];
        let base = array![0.01, -0.02, 0.03];
        let mut grad = base.clone();

        Regularization::l2(0.)
            .unwrap()
            .add_gradient(w.view(), grad.view_mut())
            .unwrap();

        assert_eq!(grad, base);
    }

    #[test]
    fn rejects_invalid_lambdas() {
        assert!(Regularization::l1(-0.1).is_err());
        assert!(Regularization::l2(f32::NAN).is_err());
        assert!(Regularization::l2(f32::INFINITY).is_err());
    }

    #[test]
    fn invalid_strengths_from_the_variants_are_caught_on_use() {
        let w = array![1., -1.];
        let mut grad = Array1::zeros(2);

        for reg in [
            Regularization::L1 { lambda: -1. },
            Regularization::L2 { lambda: f32::NAN },
        ] {
            assert!(matches!(
                reg.penalty(w.view()),
                Err(MlErr::InvalidHyperparameter { name: "lambda", .. })
            ));
            assert!(reg.add_gradient(w.view(), grad.view_mut()).is_err());
            assert!(reg.validate().is_err());
        }

        assert_eq!(grad, array![0., 0.]);
    }

    #[test]
    fn with_lambda_keeps_the_norm() {
        let reg = Regularization::l1(0.1).unwrap().with_lambda(3.).unwrap();
        assert_eq!(reg, Regularization::L1 { lambda: 3. });
        assert_eq!(Regularization::None.with_lambda(3.).unwrap().lambda(), 0.);
    }

    #[test]
    fn gradient_size_mismatch() {
        let w = array![1., 2.];
        let mut grad = Array1::zeros(3);

        assert!(Regularization::None
            .add_gradient(w.view(), grad.view_mut())
            .is_err());
    }
}

//! Logistic regression kernels over a design matrix `x`, labels `y` and weights `w`.
use ndarray::{Array1, ArrayView1, ArrayView2, Zip};

use super::{Regularization, activations::Sigmoid, loss::LogLoss};
use crate::{MlErr, Result};

/// Probabilities strictly above this value are classified as 1. A probability of exactly
/// one half is classified as 0, which is what rounding half to even gives.
pub const DECISION_THRESHOLD: f32 = 0.5;

/// Elementwise logistic function of `x · w`.
pub fn sigmoid(x: ArrayView2<f32>, w: ArrayView1<f32>) -> Result<Array1<f32>> {
    Sigmoid::new().forward(x, w)
}

/// Computes the batch gradient of the regularized negative log-likelihood:
///
/// grad = -xᵗ(y - sigmoid(x, w)) / n + reg'(w)
///
/// # Arguments
/// * `x` - The design matrix.
/// * `y` - The labels, one per row of `x`.
/// * `w` - The weights.
/// * `reg` - The regularization whose gradient is added to the base term.
///
/// # Returns
/// A vector shaped like `w`, or an error if the dimensions don't match or `x` is empty.
pub fn gradient(
    x: ArrayView2<f32>,
    y: ArrayView1<f32>,
    w: ArrayView1<f32>,
    reg: Regularization,
) -> Result<Array1<f32>> {
    check_labels(x, y)?;

    let n = x.nrows() as f32;
    let residual = &y - &sigmoid(x, w)?;
    let mut grad = x.t().dot(&residual) * (-1. / n);

    reg.add_gradient(w, grad.view_mut())?;
    Ok(grad)
}

/// Computes the gradient of the regularized negative log-likelihood for a single example:
///
/// grad = -(y - sigmoid(x, w)) · x + reg'(w)
///
/// There's no averaging, so this is the step taken by stochastic descent.
///
/// # Returns
/// A vector shaped like `w`, or an error if `x` and `w` differ in length.
pub fn point_gradient(
    x: ArrayView1<f32>,
    y: f32,
    w: ArrayView1<f32>,
    reg: Regularization,
) -> Result<Array1<f32>> {
    if x.len() != w.len() {
        return Err(MlErr::SizeMismatch {
            what: "weights",
            got: w.len(),
            expected: x.len(),
        });
    }

    let p = Sigmoid::new().f(x.dot(&w));
    let mut grad = x.mapv(|xi| -(y - p) * xi);

    reg.add_gradient(w, grad.view_mut())?;
    Ok(grad)
}

/// Negative average log-likelihood of `y` under the model plus the regularization penalty.
pub fn loss(
    x: ArrayView2<f32>,
    y: ArrayView1<f32>,
    w: ArrayView1<f32>,
    reg: Regularization,
) -> Result<f32> {
    check_labels(x, y)?;

    let p = sigmoid(x, w)?;
    let nll = LogLoss::new().loss(p.view(), y)?;
    Ok(nll + reg.penalty(w)?)
}

/// Predicts a label in {0, 1} for each row of `x`.
pub fn predict(x: ArrayView2<f32>, w: ArrayView1<f32>) -> Result<Array1<f32>> {
    let p = sigmoid(x, w)?;
    Ok(p.mapv_into(|p| if p > DECISION_THRESHOLD { 1. } else { 0. }))
}

/// Fraction of rows of `x` whose predicted label equals the one in `y`.
pub fn accuracy(x: ArrayView2<f32>, y: ArrayView1<f32>, w: ArrayView1<f32>) -> Result<f32> {
    check_labels(x, y)?;

    let y_pred = predict(x, w)?;
    let hits = Zip::from(&y_pred)
        .and(&y)
        .fold(0usize, |acc, &p, &y| acc + usize::from(p == y));

    Ok(hits as f32 / y.len() as f32)
}

fn check_labels(x: ArrayView2<f32>, y: ArrayView1<f32>) -> Result<()> {
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

    Ok(())
}

#[cfg(test)]
mod tests {
    use ndarray::{Array2, array};
    use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

    use super::*;

    fn toy() -> (Array2<f32>, Array1<f32>) {
        let x = array![[1., 2.], [1., -1.], [1., 0.5], [1., -3.]];
        let y = array![1., 0., 1., 0.];
        (x, y)
    }

    #[test]
    fn gradient_at_zero_weights() {
        let (x, y) = toy();
        let w = Array1::zeros(2);

        // sigmoid is 0.5 everywhere, so the residual is y - 0.5 = [.5, -.5, .5, -.5]
        // -xᵗ r / 4 = -[0, (1 + .5 + .25 + 1.5)] / 4
        let grad = gradient(x.view(), y.view(), w.view(), Regularization::None).unwrap();

        assert!(grad[0].abs() < 1e-6);
        assert!((grad[1] + 0.8125).abs() < 1e-6);
    }

    #[test]
    fn regularized_gradient_adds_the_penalty_term() {
        let (x, y) = toy();
        let w = array![0.2, -0.4];

        let plain = gradient(x.view(), y.view(), w.view(), Regularization::None).unwrap();
        let l2 = gradient(x.view(), y.view(), w.view(), Regularization::l2(0.5).unwrap()).unwrap();
        let l1 = gradient(x.view(), y.view(), w.view(), Regularization::l1(0.5).unwrap()).unwrap();

        assert!((&l2 - &plain - &w).iter().all(|d| d.abs() < 1e-6));
        assert!((&l1 - &plain - &array![0.5, -0.5]).iter().all(|d| d.abs() < 1e-6));
    }

    #[test]
    fn zero_strength_l2_is_identical_to_no_regularization() {
        let (x, y) = toy();
        let w = array![0.7, -1.3];

        let plain = gradient(x.view(), y.view(), w.view(), Regularization::None).unwrap();
        let l2 = gradient(x.view(), y.view(), w.view(), Regularization::l2(0.).unwrap()).unwrap();

        assert_eq!(plain, l2);
    }

    #[test]
    fn point_gradient_is_not_averaged() {
        let x = array![2., -1.];
        let w = Array1::zeros(2);

        let grad = point_gradient(x.view(), 1., w.view(), Regularization::None).unwrap();
        assert_eq!(grad, array![-1., 0.5]);
    }

    #[test]
    fn single_row_batch_matches_point_gradient() {
        let x = array![[0.3, -1.2, 2.]];
        let y = array![1.];
        let w = array![0.1, 0.2, -0.3];
        let reg = Regularization::l1(0.05).unwrap();

        let batch = gradient(x.view(), y.view(), w.view(), reg).unwrap();
        let point = point_gradient(x.row(0), y[0], w.view(), reg).unwrap();

        assert!((&batch - &point).iter().all(|d| d.abs() < 1e-6));
    }

    #[test]
    fn loss_includes_penalty() {
        let (x, y) = toy();
        let w = Array1::zeros(2);

        let plain = loss(x.view(), y.view(), w.view(), Regularization::None).unwrap();
        assert!((plain - std::f32::consts::LN_2).abs() < 1e-6);

        let w = array![1., -2.];
        let plain = loss(x.view(), y.view(), w.view(), Regularization::None).unwrap();
        let l1 = loss(x.view(), y.view(), w.view(), Regularization::l1(0.1).unwrap()).unwrap();
        let l2 = loss(x.view(), y.view(), w.view(), Regularization::l2(0.1).unwrap()).unwrap();

        assert!((l1 - plain - 0.3).abs() < 1e-5);
        assert!((l2 - plain - 0.5).abs() < 1e-5);
    }

    #[test]
    fn negative_strength_is_rejected_by_the_kernels() {
        let (x, y) = toy();
        let w = array![0.5, 0.5];
        let reg = Regularization::L2 { lambda: -0.1 };

        assert!(matches!(
            gradient(x.view(), y.view(), w.view(), reg),
            Err(MlErr::InvalidHyperparameter { .. })
        ));
        assert!(point_gradient(x.row(0), y[0], w.view(), reg).is_err());
        assert!(loss(x.view(), y.view(), w.view(), reg).is_err());
    }

    #[test]
    fn loss_is_finite_when_predictions_saturate() {
        let x = array![[100.], [-100.]];
        let y = array![0., 1.];
        let w = array![10.];

        let l = loss(x.view(), y.view(), w.view(), Regularization::None).unwrap();
        assert!(l.is_finite());
    }

    #[test]
    fn accuracy_counts_matching_predictions() {
        let (x, y) = toy();

        assert_eq!(accuracy(x.view(), y.view(), array![0., 1.].view()).unwrap(), 1.);
        assert_eq!(accuracy(x.view(), y.view(), array![0., -1.].view()).unwrap(), 0.);
    }

    #[test]
    fn exact_half_is_predicted_as_zero() {
        let x = array![[0.], [10.]];
        let w = array![0.];

        assert_eq!(predict(x.view(), w.view()).unwrap(), array![0., 0.]);
    }

    #[test]
    fn accuracy_is_invariant_to_row_shuffles() {
        let mut rng = StdRng::seed_from_u64(7);
        let x = Array2::from_shape_fn((50, 3), |(i, j)| ((i * 7 + j * 13) % 11) as f32 - 5.);
        let y = Array1::from_shape_fn(50, |i| ((i * 5) % 3 == 0) as u8 as f32);
        let w = array![0.3, -0.2, 0.05];

        let before = accuracy(x.view(), y.view(), w.view()).unwrap();

        let mut order: Vec<usize> = (0..50).collect();
        order.shuffle(&mut rng);
        let xs = x.select(ndarray::Axis(0), &order);
        let ys = y.select(ndarray::Axis(0), &order);

        let after = accuracy(xs.view(), ys.view(), w.view()).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn mismatched_dimensions_fail_fast() {
        let (x, y) = toy();
        let short_y = array![1., 0.];
        let long_w = array![1., 2., 3.];

        assert!(matches!(
            gradient(x.view(), short_y.view(), array![0., 0.].view(), Regularization::None),
            Err(MlErr::SizeMismatch { what: "labels", .. })
        ));
        assert!(matches!(
            loss(x.view(), y.view(), long_w.view(), Regularization::None),
            Err(MlErr::SizeMismatch { what: "weights", .. })
        ));
        assert!(accuracy(x.view(), short_y.view(), array![0., 0.].view()).is_err());
    }
}

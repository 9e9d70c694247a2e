// Analytic gradients from backward_pass against central finite differences
// of the forward-pass loss.

use approx::assert_abs_diff_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

use ferrite_mlp::network::{backward_pass, forward_pass};
use ferrite_mlp::{InitMode, Matrix, Parameters};

const H: f64 = 1e-5;
const TOLERANCE: f64 = 1e-4;

/// Uniform init scaled up so the hidden units leave the linear regime of
/// the sigmoid.
fn random_params(seed: u64, num_features: usize, hidden: usize) -> Parameters {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut p = Parameters::init(num_features, hidden, 10, InitMode::Uniform, &mut rng);
    p.alpha = p.alpha.scale(15.0);
    p.beta = p.beta.scale(15.0);
    // Non-zero biases exercise column 0 as well.
    for (i, row) in p.alpha.data.iter_mut().enumerate() {
        row[0] = 0.3 - 0.2 * i as f64;
    }
    for (k, row) in p.beta.data.iter_mut().enumerate() {
        row[0] = 0.05 * k as f64 - 0.2;
    }
    p
}

fn loss(x: &Matrix, labels: &[usize], params: &Parameters) -> f64 {
    forward_pass(x, labels, params).unwrap().loss
}

/// Central difference of the loss w.r.t. every entry of alpha or beta.
fn numeric_gradient(x: &Matrix, labels: &[usize], params: &Parameters, of_alpha: bool) -> Matrix {
    let target = if of_alpha { &params.alpha } else { &params.beta };
    let mut grad = Matrix::zeros(target.rows, target.cols);
    for i in 0..target.rows {
        for j in 0..target.cols {
            let mut plus = params.clone();
            let mut minus = params.clone();
            if of_alpha {
                plus.alpha.data[i][j] += H;
                minus.alpha.data[i][j] -= H;
            } else {
                plus.beta.data[i][j] += H;
                minus.beta.data[i][j] -= H;
            }
            grad.data[i][j] = (loss(x, labels, &plus) - loss(x, labels, &minus)) / (2.0 * H);
        }
    }
    grad
}

fn assert_close(analytic: &Matrix, numeric: &Matrix, scale: f64) {
    assert_eq!(analytic.shape(), numeric.shape());
    for (a_row, n_row) in analytic.data.iter().zip(numeric.data.iter()) {
        for (&a, &n) in a_row.iter().zip(n_row.iter()) {
            assert_abs_diff_eq!(a, n * scale, epsilon = TOLERANCE);
        }
    }
}

#[test]
fn single_example_gradients_match_finite_differences() {
    for seed in [1u64, 2, 3] {
        let params = random_params(seed, 5, 3);
        let x = Matrix::from_data(vec![vec![1.0, 1.0, 0.0, 1.0, 1.0, 0.0]]);
        let labels = [seed as usize + 2];

        let cache = forward_pass(&x, &labels, &params).unwrap();
        let grads = backward_pass(&x, &params, &cache).unwrap();

        assert_close(&grads.alpha, &numeric_gradient(&x, &labels, &params, true), 1.0);
        assert_close(&grads.beta, &numeric_gradient(&x, &labels, &params, false), 1.0);
    }
}

#[test]
fn batch_gradients_are_summed_over_rows() {
    let params = random_params(7, 4, 2);
    let x = Matrix::from_data(vec![
        vec![1.0, 0.0, 1.0, 1.0, 0.0],
        vec![1.0, 1.0, 1.0, 0.0, 0.0],
        vec![1.0, 0.0, 0.0, 0.0, 1.0],
    ]);
    let labels = [0, 4, 9];

    let cache = forward_pass(&x, &labels, &params).unwrap();
    let grads = backward_pass(&x, &params, &cache).unwrap();

    // The loss is a mean over 3 rows; the parameter gradients are sums.
    assert_close(&grads.alpha, &numeric_gradient(&x, &labels, &params, true), 3.0);
    assert_close(&grads.beta, &numeric_gradient(&x, &labels, &params, false), 3.0);
}

#[test]
fn layer_gradients_chain_together() {
    let params = random_params(5, 3, 4);
    let x = Matrix::from_data(vec![vec![1.0, 1.0, 1.0, 0.0]]);
    let cache = forward_pass(&x, &[6], &params).unwrap();
    let grads = backward_pass(&x, &params, &cache).unwrap();

    // ∂J/∂a = ∂J/∂z ⊙ z(1 − z) with z taken from the cache.
    for j in 0..4 {
        let z = cache.z.data[0][j + 1];
        assert_abs_diff_eq!(grads.a.data[0][j], grads.z.data[0][j] * z * (1.0 - z), epsilon = 1e-12);
    }
    // ∂J/∂b = y_hat − one_hot.
    for k in 0..10 {
        let target = if k == 6 { 1.0 } else { 0.0 };
        assert_abs_diff_eq!(grads.b.data[0][k], cache.y_hat.data[0][k] - target, epsilon = 1e-15);
    }
}

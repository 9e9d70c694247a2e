use crate::activation::Sigmoid;
use crate::error::{NnError, Result};
use crate::layers::Linear;
use crate::loss::CrossEntropyLoss;
use crate::math::matrix::Matrix;
use crate::network::forward::ForwardCache;
use crate::network::params::Parameters;

/// Gradients produced by `backward_pass`.
///
/// Parameter gradients are summed over the rows of the batch, so for a
/// single example they are exactly the gradient of its cross-entropy.
/// Only `alpha` and `beta` feed the optimizer; the layer gradients are
/// kept for inspection and tests.
#[derive(Debug, Clone)]
pub struct Gradients {
    /// ∂J/∂alpha, same shape as alpha.
    pub alpha: Matrix,
    /// ∂J/∂beta, same shape as beta.
    pub beta: Matrix,
    /// ∂J/∂b, (N, K).
    pub b: Matrix,
    /// ∂J/∂z for the non-bias hidden units, (N, D).
    pub z: Matrix,
    /// ∂J/∂a, (N, D).
    pub a: Matrix,
}

/// Chain rule in reverse order of `forward_pass`:
/// softmax+CE → output linear → sigmoid → hidden linear.
///
/// `x_with_bias` must be the same input the cache was produced from.
pub fn backward_pass(x_with_bias: &Matrix, params: &Parameters, cache: &ForwardCache) -> Result<Gradients> {
    let g_b = CrossEntropyLoss::softmax_derivative(&cache.one_hot, &cache.y_hat);
    let (g_beta, g_z) = Linear::backward(&cache.z, &params.beta, &g_b);
    let g_a = Sigmoid::backward(&cache.z, &g_z);
    let (g_alpha, _) = Linear::backward(x_with_bias, &params.alpha, &g_a);

    if !g_alpha.is_finite() || !g_beta.is_finite() {
        return Err(NnError::fault("backward", "parameter gradients contain NaN or infinity"));
    }

    Ok(Gradients { alpha: g_alpha, beta: g_beta, b: g_b, z: g_z, a: g_a })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::forward::forward_pass;
    use crate::network::params::InitMode;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn zero_parameters_only_move_beta() {
        let mut rng = StdRng::seed_from_u64(0);
        let params = Parameters::init(2, 1, 10, InitMode::Zero, &mut rng);
        let x = Matrix::from_data(vec![vec![1.0, 1.0, 0.0]]);
        let cache = forward_pass(&x, &[0], &params).unwrap();
        let grads = backward_pass(&x, &params, &cache).unwrap();

        // beta = 0 blocks any gradient from reaching the hidden layer.
        assert!(grads.alpha.data.iter().flatten().all(|&g| g == 0.0));
        assert_abs_diff_eq!(grads.beta.data[0][0], -0.9, epsilon = 1e-12);
        assert_abs_diff_eq!(grads.beta.data[0][1], -0.45, epsilon = 1e-12);
        for k in 1..10 {
            assert_abs_diff_eq!(grads.beta.data[k][0], 0.1, epsilon = 1e-12);
            assert_abs_diff_eq!(grads.beta.data[k][1], 0.05, epsilon = 1e-12);
        }
    }

    #[test]
    fn gradient_shapes_match_parameters() {
        let mut rng = StdRng::seed_from_u64(11);
        let params = Parameters::init(3, 4, 10, InitMode::Uniform, &mut rng);
        let x = Matrix::from_data(vec![vec![1.0, 0.0, 1.0, 1.0], vec![1.0, 1.0, 0.0, 0.0]]);
        let cache = forward_pass(&x, &[2, 5], &params).unwrap();
        let grads = backward_pass(&x, &params, &cache).unwrap();
        assert_eq!(grads.alpha.shape(), params.alpha.shape());
        assert_eq!(grads.beta.shape(), params.beta.shape());
        assert_eq!(grads.b.shape(), (2, 10));
        assert_eq!(grads.z.shape(), (2, 4));
        assert_eq!(grads.a.shape(), (2, 4));
        // Each row of ∂J/∂b sums to zero: Σ y_hat − Σ one_hot = 1 − 1.
        for s in grads.b.sum_rows() {
            assert_abs_diff_eq!(s, 0.0, epsilon = 1e-12);
        }
    }
}

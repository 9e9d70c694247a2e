use crate::math::matrix::Matrix;

/// Logistic activation used by the hidden layer.
pub struct Sigmoid;

/// Numerically stable logistic function.
///
/// For negative `x` the naive `1 / (1 + e^-x)` overflows `e^-x`; the branch
/// rewrites it as `e^x / (1 + e^x)`, which only ever exponentiates a
/// non-positive number.
pub fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

impl Sigmoid {
    /// Element-wise logistic of the pre-activation `a`.
    pub fn forward(a: &Matrix) -> Matrix {
        a.map(sigmoid)
    }

    /// Gradient w.r.t. the pre-activation, given the cached bias-augmented
    /// output `z_with_bias` and the upstream gradient for the non-bias units.
    ///
    /// Uses σ'(a) = z·(1 − z), so the forward value is reused rather than
    /// recomputed from `a`.
    pub fn backward(z_with_bias: &Matrix, grad_current: &Matrix) -> Matrix {
        let z = z_with_bias.without_first_column();
        let local = z.map(|v| v * (1.0 - v));
        grad_current.hadamard(&local)
    }
}

use crate::math::matrix::Matrix;

/// Affine transform whose bias lives in column 0 of the parameter matrix.
pub struct Linear;

impl Linear {
    /// `input_with_bias @ paramsᵗ`.
    ///
    /// `input_with_bias` is (N, in + 1) with a leading ones column and
    /// `params` is (out, in + 1); the result is (N, out).
    pub fn forward(input_with_bias: &Matrix, params: &Matrix) -> Matrix {
        assert_eq!(
            input_with_bias.cols, params.cols,
            "linear input has {} columns but the parameter matrix expects {} (bias included)",
            input_with_bias.cols, params.cols
        );
        input_with_bias.dot(&params.transpose())
    }

    /// Returns `(grad_params, grad_prev)`.
    ///
    /// `grad_params` has the shape of `params`. `grad_prev` is the gradient
    /// for the previous layer's non-bias outputs: the bias column of
    /// `params` is dropped because the constant ones input has no upstream.
    pub fn backward(
        prev_with_bias: &Matrix,
        params: &Matrix,
        grad_current: &Matrix,
    ) -> (Matrix, Matrix) {
        let grad_params = grad_current.transpose().dot(prev_with_bias);
        let grad_prev = grad_current.dot(&params.without_first_column());
        (grad_params, grad_prev)
    }
}

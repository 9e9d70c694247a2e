use crate::math::matrix::Matrix;

/// Row-wise softmax over the output logits.
///
/// The gradient is not exposed here: softmax is always paired with
/// cross-entropy, and the combined gradient lives in
/// `CrossEntropyLoss::softmax_derivative()`.
pub struct Softmax;

impl Softmax {
    /// Each row of `b` becomes a probability distribution.
    ///
    /// The row maximum is subtracted before exponentiating, so the largest
    /// exponent is `e^0 = 1` and the row sum is always at least 1.
    pub fn forward(b: &Matrix) -> Matrix {
        let data = b.data.iter()
            .map(|row| {
                let max = row.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                let exps: Vec<f64> = row.iter().map(|&v| (v - max).exp()).collect();
                let sum: f64 = exps.iter().sum();
                exps.into_iter().map(|e| e / sum).collect()
            })
            .collect();
        Matrix::from_rows(data, b.cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn rows_sum_to_one() {
        let b = Matrix::from_data(vec![
            vec![0.0, 1.0, 2.0, 3.0],
            vec![-5.0, 0.3, 0.3, 9.0],
        ]);
        for s in Softmax::forward(&b).sum_rows() {
            assert_abs_diff_eq!(s, 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn zero_logits_give_uniform_distribution() {
        let y_hat = Softmax::forward(&Matrix::zeros(1, 10));
        for &p in &y_hat.data[0] {
            assert_abs_diff_eq!(p, 0.1, epsilon = 1e-15);
        }
    }

    #[test]
    fn huge_logits_do_not_overflow() {
        let b = Matrix::from_data(vec![vec![1000.0, 999.0, -1000.0]]);
        let y_hat = Softmax::forward(&b);
        assert!(y_hat.is_finite());
        assert_abs_diff_eq!(y_hat.sum_rows()[0], 1.0, epsilon = 1e-12);
        assert!(y_hat.data[0][0] > y_hat.data[0][1]);
    }

    #[test]
    fn very_negative_logits_do_not_underflow_to_nan() {
        let b = Matrix::from_data(vec![vec![-2000.0, -2001.0]]);
        let y_hat = Softmax::forward(&b);
        assert!(y_hat.is_finite());
        assert_abs_diff_eq!(y_hat.sum_rows()[0], 1.0, epsilon = 1e-12);
    }
}

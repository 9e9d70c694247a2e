use crate::error::{NnError, Result};
use crate::math::matrix::Matrix;

/// Categorical cross-entropy loss for use with a Softmax output layer.
pub struct CrossEntropyLoss;

impl CrossEntropyLoss {
    /// Mean over rows of `-Σ_k one_hot[k] · ln(y_hat[k])`.
    ///
    /// Terms whose target weight is zero contribute nothing, so an
    /// off-target probability of exactly 0 is harmless. A zero probability
    /// on a target class would make the loss infinite and is reported as a
    /// computation fault.
    pub fn loss(one_hot: &Matrix, y_hat: &Matrix) -> Result<f64> {
        check_batch(one_hot, y_hat)?;

        let mut total = 0.0;
        for (target_row, pred_row) in one_hot.data.iter().zip(y_hat.data.iter()) {
            for (&t, &p) in target_row.iter().zip(pred_row.iter()) {
                if t != 0.0 {
                    total -= t * p.ln();
                }
            }
        }
        let mean = total / one_hot.rows as f64;

        if !mean.is_finite() {
            return Err(NnError::fault(
                "cross_entropy",
                "a target class was predicted with probability 0",
            ));
        }
        Ok(mean)
    }

    /// Same value as `loss(one_hot, softmax(b))`, computed from the logits.
    ///
    /// Uses `ln y_hat[k] = b[k] − max − ln Σ exp(b − max)`, which stays finite
    /// for finite logits even when the softmax output underflows to 0.
    pub fn loss_from_logits(one_hot: &Matrix, b: &Matrix) -> Result<f64> {
        check_batch(one_hot, b)?;

        let mut total = 0.0;
        for (target_row, logit_row) in one_hot.data.iter().zip(b.data.iter()) {
            let max = logit_row.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let log_sum: f64 = logit_row.iter().map(|&v| (v - max).exp()).sum::<f64>().ln();
            for (&t, &v) in target_row.iter().zip(logit_row.iter()) {
                if t != 0.0 {
                    total -= t * (v - max - log_sum);
                }
            }
        }
        let mean = total / one_hot.rows as f64;

        if !mean.is_finite() {
            return Err(NnError::fault("cross_entropy", "logits contain NaN or infinity"));
        }
        Ok(mean)
    }

    /// Gradient of cross-entropy-after-softmax w.r.t. the logits:
    ///   ∂J/∂b = y_hat − one_hot
    pub fn softmax_derivative(one_hot: &Matrix, y_hat: &Matrix) -> Matrix {
        y_hat - one_hot
    }
}

fn check_batch(one_hot: &Matrix, other: &Matrix) -> Result<()> {
    if one_hot.shape() != other.shape() {
        return Err(NnError::ShapeMismatch(format!(
            "one-hot targets are {:?} but predictions are {:?}",
            one_hot.shape(),
            other.shape()
        )));
    }
    if one_hot.rows == 0 {
        return Err(NnError::fault("cross_entropy", "mean over an empty batch"));
    }
    Ok(())
}

/// One row per label with a single 1 at the label's column.
pub fn one_hot(labels: &[usize], num_classes: usize) -> Result<Matrix> {
    let mut res = Matrix::zeros(labels.len(), num_classes);
    for (row, &label) in res.data.iter_mut().zip(labels.iter()) {
        if label >= num_classes {
            return Err(NnError::InvalidLabel { label, num_classes });
        }
        row[label] = 1.0;
    }
    Ok(res)
}

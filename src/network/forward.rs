use crate::activation::{Sigmoid, Softmax};
use crate::error::{NnError, Result};
use crate::layers::Linear;
use crate::loss::{one_hot, CrossEntropyLoss};
use crate::math::matrix::Matrix;
use crate::network::params::Parameters;

/// Everything the backward pass needs from one forward pass.
///
/// Built by `forward_pass` and consumed by `backward_pass`; nothing cached
/// here is recomputed downstream.
#[derive(Debug, Clone)]
pub struct ForwardCache {
    /// Hidden pre-activation, (N, D).
    pub a: Matrix,
    /// Bias-augmented hidden activation, (N, D + 1).
    pub z: Matrix,
    /// Output pre-activation, (N, K).
    pub b: Matrix,
    /// Predicted class distribution, (N, K).
    pub y_hat: Matrix,
    /// Targets, (N, K).
    pub one_hot: Matrix,
    /// Mean cross-entropy over the N rows.
    pub loss: f64,
}

/// Runs linear → sigmoid → linear → softmax → cross-entropy.
///
/// `x_with_bias` is the (N, M + 1) input with its leading ones column and
/// `labels` holds the N class indices.
pub fn forward_pass(x_with_bias: &Matrix, labels: &[usize], params: &Parameters) -> Result<ForwardCache> {
    if labels.len() != x_with_bias.rows {
        return Err(NnError::ShapeMismatch(format!(
            "{} input rows but {} labels",
            x_with_bias.rows,
            labels.len()
        )));
    }

    let a = Linear::forward(x_with_bias, &params.alpha);
    let z = Sigmoid::forward(&a).with_bias_column();
    let b = Linear::forward(&z, &params.beta);
    if !b.is_finite() {
        return Err(NnError::fault("softmax", "output logits contain NaN or infinity"));
    }
    let y_hat = Softmax::forward(&b);
    let targets = one_hot(labels, params.num_classes())?;
    let loss = CrossEntropyLoss::loss_from_logits(&targets, &b)?;

    Ok(ForwardCache { a, z, b, y_hat, one_hot: targets, loss })
}

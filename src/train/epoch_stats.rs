use serde::{Serialize, Deserialize};

/// Per-epoch training statistics recorded by `train_loop`.
///
/// Both losses are measured after the epoch's last update, with the
/// parameters frozen, over the whole training and validation sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Total epochs requested for this run.
    pub total_epochs: usize,
    /// Mean cross-entropy over the training set.
    pub train_loss: f64,
    /// Mean cross-entropy over the validation set.
    pub val_loss: f64,
    /// Wall-clock duration of this epoch (updates plus both evaluations) in milliseconds.
    pub elapsed_ms: u64,
}

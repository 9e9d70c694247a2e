use std::time::Instant;

use log::{debug, info};
use rand::Rng;

use crate::data::dataset::Dataset;
use crate::error::{NnError, Result};
use crate::math::matrix::Matrix;
use crate::network::backward::backward_pass;
use crate::network::forward::forward_pass;
use crate::network::params::Parameters;
use crate::optim::sgd::Sgd;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Final parameters and per-epoch losses of a `train_loop` run.
#[derive(Debug, Clone)]
pub struct TrainOutcome {
    pub params: Parameters,
    /// Mean training cross-entropy after each epoch (length `num_epochs`).
    pub train_losses: Vec<f64>,
    /// Mean validation cross-entropy after each epoch (length `num_epochs`).
    pub valid_losses: Vec<f64>,
    pub history: Vec<EpochStats>,
}

/// Trains a fresh network with online SGD for `config.num_epochs` epochs.
///
/// # Arguments
/// - `train`  — examples visited in order, one update per example
/// - `valid`  — only evaluated, once per epoch
/// - `config` — hyperparameters; validated before anything is allocated
/// - `rng`    — random source for `InitMode::Uniform`
///
/// The parameters are allocated here and this loop is the only place they
/// are mutated. Each example's forward pass sees the parameters left by the
/// previous example's update.
pub fn train_loop<R: Rng + ?Sized>(
    train: &Dataset,
    valid: &Dataset,
    config: &TrainConfig,
    rng: &mut R,
) -> Result<TrainOutcome> {
    config.validate()?;
    check_datasets(train, valid)?;

    let mut params = Parameters::init(
        train.num_features(),
        config.hidden_units,
        config.num_classes,
        config.init_mode,
        rng,
    );
    let optimizer = Sgd::new(config.learning_rate);

    let train_x = train.features_with_bias();
    let valid_x = valid.features_with_bias();

    let mut train_losses = Vec::with_capacity(config.num_epochs);
    let mut valid_losses = Vec::with_capacity(config.num_epochs);
    let mut history = Vec::with_capacity(config.num_epochs);

    for epoch in 1..=config.num_epochs {
        let t_start = Instant::now();

        // ── One full pass over the training data ───────────────────────────
        run_one_epoch(&mut params, &train_x, &train.labels, &optimizer)?;

        // ── Frozen-parameter losses over both full sets ────────────────────
        let train_loss = forward_pass(&train_x, &train.labels, &params)?.loss;
        let val_loss = forward_pass(&valid_x, &valid.labels, &params)?.loss;

        let elapsed_ms = t_start.elapsed().as_millis() as u64;
        info!(
            "epoch {}/{}: crossentropy(train) = {:.6}, crossentropy(validation) = {:.6} ({} ms)",
            epoch, config.num_epochs, train_loss, val_loss, elapsed_ms
        );

        train_losses.push(train_loss);
        valid_losses.push(val_loss);
        history.push(EpochStats {
            epoch,
            total_epochs: config.num_epochs,
            train_loss,
            val_loss,
            elapsed_ms,
        });
    }

    Ok(TrainOutcome { params, train_losses, valid_losses, history })
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// One update per example, in dataset order.
fn run_one_epoch(
    params: &mut Parameters,
    inputs_with_bias: &Matrix,
    labels: &[usize],
    optimizer: &Sgd,
) -> Result<()> {
    for i in 0..inputs_with_bias.rows {
        let x = inputs_with_bias.row(i);
        let label = &labels[i..=i];

        let cache = forward_pass(&x, label, params)?;
        let grads = backward_pass(&x, params, &cache)?;
        optimizer.step(params, &grads);
    }
    debug!("applied {} updates", inputs_with_bias.rows);
    Ok(())
}

fn check_datasets(train: &Dataset, valid: &Dataset) -> Result<()> {
    if train.is_empty() {
        return Err(NnError::ShapeMismatch("training set has no examples".into()));
    }
    if valid.is_empty() {
        return Err(NnError::ShapeMismatch("validation set has no examples".into()));
    }
    if train.num_features() != valid.num_features() {
        return Err(NnError::ShapeMismatch(format!(
            "training set has {} features but validation set has {}",
            train.num_features(),
            valid.num_features()
        )));
    }
    Ok(())
}

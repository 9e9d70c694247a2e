use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::data::dataset::Dataset;
use crate::error::Result;
use crate::network::params::Parameters;
use crate::train::epoch_stats::EpochStats;
use crate::train::evaluate::evaluate;
use crate::train::loop_fn::train_loop;
use crate::train::train_config::TrainConfig;

/// Everything a full train-then-evaluate run produces.
#[derive(Debug, Clone)]
pub struct TrainReport {
    pub train_losses: Vec<f64>,
    pub valid_losses: Vec<f64>,
    pub train_error: f64,
    pub valid_error: f64,
    pub train_predictions: Vec<usize>,
    pub valid_predictions: Vec<usize>,
    pub params: Parameters,
    pub history: Vec<EpochStats>,
}

/// Trains on `train`, then evaluates the final parameters on both sets.
///
/// The random source is seeded from `config.seed` when set, so runs with a
/// seed are fully reproducible.
pub fn train_and_validate(train: &Dataset, valid: &Dataset, config: &TrainConfig) -> Result<TrainReport> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let outcome = train_loop(train, valid, config, &mut rng)?;
    let eval = evaluate(train, valid, &outcome.params)?;

    Ok(TrainReport {
        train_losses: outcome.train_losses,
        valid_losses: outcome.valid_losses,
        train_error: eval.train_error,
        valid_error: eval.valid_error,
        train_predictions: eval.train_predictions,
        valid_predictions: eval.valid_predictions,
        params: outcome.params,
        history: outcome.history,
    })
}

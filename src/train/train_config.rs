use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::error::{NnError, Result};
use crate::network::params::InitMode;

/// Class count used when a configuration does not name one.
pub const DEFAULT_NUM_CLASSES: usize = 10;

fn default_num_classes() -> usize {
    DEFAULT_NUM_CLASSES
}

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `hidden_units`  — width D of the hidden layer
/// - `num_epochs`    — full passes over the training set; there is no early stop
/// - `init_mode`     — `zero` or `uniform` starting weights (biases are always 0)
/// - `learning_rate` — SGD step size; 0 freezes the parameters
/// - `num_classes`   — output width K and one-hot length (default 10)
/// - `seed`          — seeds the random source used by `uniform` init; `None`
///                     draws from OS entropy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainConfig {
    pub hidden_units: usize,
    pub num_epochs: usize,
    pub init_mode: InitMode,
    pub learning_rate: f64,
    #[serde(default = "default_num_classes")]
    pub num_classes: usize,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl TrainConfig {
    /// Creates a `TrainConfig` for ten classes with no fixed seed.
    pub fn new(hidden_units: usize, num_epochs: usize, init_mode: InitMode, learning_rate: f64) -> Self {
        TrainConfig {
            hidden_units,
            num_epochs,
            init_mode,
            learning_rate,
            num_classes: DEFAULT_NUM_CLASSES,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_num_classes(mut self, num_classes: usize) -> Self {
        self.num_classes = num_classes;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.hidden_units == 0 {
            return Err(NnError::InvalidConfig("hidden_units must be at least 1".into()));
        }
        if self.num_epochs == 0 {
            return Err(NnError::InvalidConfig("num_epochs must be at least 1".into()));
        }
        if self.num_classes < 2 {
            return Err(NnError::InvalidConfig("num_classes must be at least 2".into()));
        }
        if !self.learning_rate.is_finite() || self.learning_rate < 0.0 {
            return Err(NnError::InvalidConfig(format!(
                "learning_rate must be a non-negative finite number, got {}",
                self.learning_rate
            )));
        }
        Ok(())
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a `TrainConfig` from a JSON file and validates it.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<TrainConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let config: TrainConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }
}

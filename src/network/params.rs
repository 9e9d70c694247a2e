use std::path::Path;

use log::debug;
use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::error::{NnError, Result};
use crate::math::matrix::Matrix;

/// Half-width of the interval non-bias weights are drawn from in `Uniform` mode.
pub const INIT_RANGE: f64 = 0.1;

/// How the weight matrices are filled before the first update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitMode {
    /// Every weight and bias is 0.
    Zero,
    /// Non-bias weights ~ Uniform[-0.1, 0.1]; biases are 0.
    Uniform,
}

/// The two parameter matrices of the network.
///
/// - `alpha` — hidden layer, (D, M + 1)
/// - `beta`  — output layer, (K, D + 1)
///
/// Column 0 of each holds the bias weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    pub alpha: Matrix,
    pub beta: Matrix,
}

impl Parameters {
    /// Allocates parameters for `num_features` inputs, `hidden_units` hidden
    /// units and `num_classes` outputs.
    pub fn init<R: Rng + ?Sized>(
        num_features: usize,
        hidden_units: usize,
        num_classes: usize,
        mode: InitMode,
        rng: &mut R,
    ) -> Parameters {
        let params = match mode {
            InitMode::Zero => Parameters {
                alpha: Matrix::zeros(hidden_units, num_features + 1),
                beta: Matrix::zeros(num_classes, hidden_units + 1),
            },
            InitMode::Uniform => {
                let alpha = Matrix::uniform(hidden_units, num_features, -INIT_RANGE, INIT_RANGE, rng);
                let beta = Matrix::uniform(num_classes, hidden_units, -INIT_RANGE, INIT_RANGE, rng);
                // The prepended bias column is overwritten with zeros.
                Parameters {
                    alpha: zero_bias(alpha.with_bias_column()),
                    beta: zero_bias(beta.with_bias_column()),
                }
            }
        };
        debug!(
            "initialized parameters ({:?}): alpha {:?}, beta {:?}",
            mode,
            params.alpha.shape(),
            params.beta.shape()
        );
        params
    }

    pub fn num_features(&self) -> usize {
        self.alpha.cols - 1
    }

    pub fn hidden_units(&self) -> usize {
        self.alpha.rows
    }

    pub fn num_classes(&self) -> usize {
        self.beta.rows
    }

    /// Checks that `beta` consumes exactly the hidden units `alpha` produces.
    pub fn check_shapes(&self) -> Result<()> {
        if self.alpha.cols == 0 || self.beta.cols != self.alpha.rows + 1 {
            return Err(NnError::ShapeMismatch(format!(
                "alpha is {:?} but beta is {:?}; beta needs {} columns",
                self.alpha.shape(),
                self.beta.shape(),
                self.alpha.rows + 1
            )));
        }
        Ok(())
    }

    /// Serializes the parameters to a pretty-printed JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes parameters from a JSON file previously written by `save_json`.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Parameters> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let params: Parameters = serde_json::from_reader(reader)?;
        params.check_shapes()?;
        Ok(params)
    }
}

fn zero_bias(mut m: Matrix) -> Matrix {
    for row in m.data.iter_mut() {
        row[0] = 0.0;
    }
    m
}

use log::info;

use crate::data::dataset::Dataset;
use crate::error::{NnError, Result};
use crate::network::forward::forward_pass;
use crate::network::params::Parameters;

/// Error rates and predictions for the training and validation sets.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub train_error: f64,
    pub valid_error: f64,
    pub train_predictions: Vec<usize>,
    pub valid_predictions: Vec<usize>,
}

/// Classifies both datasets with frozen `params`.
pub fn evaluate(train: &Dataset, valid: &Dataset, params: &Parameters) -> Result<Evaluation> {
    let train_predictions = predict(train, params)?;
    let valid_predictions = predict(valid, params)?;
    let train_error = error_rate(&train_predictions, &train.labels)?;
    let valid_error = error_rate(&valid_predictions, &valid.labels)?;
    info!("error(train) = {:.6}, error(validation) = {:.6}", train_error, valid_error);

    Ok(Evaluation { train_error, valid_error, train_predictions, valid_predictions })
}

/// Arg-max class of the predicted distribution for every row.
pub fn predict(dataset: &Dataset, params: &Parameters) -> Result<Vec<usize>> {
    if params.num_features() != dataset.num_features() {
        return Err(NnError::ShapeMismatch(format!(
            "parameters expect {} features but the dataset has {}",
            params.num_features(),
            dataset.num_features()
        )));
    }
    let cache = forward_pass(&dataset.features_with_bias(), &dataset.labels, params)?;
    Ok(cache.y_hat.argmax_rows())
}

/// Fraction of predictions that differ from the labels.
pub fn error_rate(predictions: &[usize], labels: &[usize]) -> Result<f64> {
    if predictions.len() != labels.len() {
        return Err(NnError::ShapeMismatch(format!(
            "{} predictions but {} labels",
            predictions.len(),
            labels.len()
        )));
    }
    if labels.is_empty() {
        return Err(NnError::ShapeMismatch("error rate of an empty set".into()));
    }
    let wrong = predictions.iter().zip(labels.iter()).filter(|(p, l)| p != l).count();
    Ok(wrong as f64 / labels.len() as f64)
}

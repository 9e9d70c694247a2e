use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, NnError>;

#[derive(Error, Debug)]
pub enum NnError {
    /// Datasets or parameter matrices disagree on their dimensions.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("label {label} is outside [0, {num_classes})")]
    InvalidLabel { label: usize, num_classes: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A math kernel produced NaN or infinity.
    #[error("computation fault in {stage}: {detail}")]
    ComputationFault { stage: &'static str, detail: String },

    #[error("failed to parse data: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl NnError {
    pub(crate) fn fault(stage: &'static str, detail: impl Into<String>) -> NnError {
        NnError::ComputationFault { stage, detail: detail.into() }
    }
}

pub mod error;
pub mod math;
pub mod activation;
pub mod layers;
pub mod loss;
pub mod network;
pub mod optim;
pub mod data;
pub mod train;

// Convenience re-exports
pub use error::{NnError, Result};
pub use math::matrix::Matrix;
pub use network::{InitMode, Parameters};
pub use data::Dataset;
pub use optim::sgd::Sgd;
pub use train::{evaluate, train_and_validate, train_loop, TrainConfig};

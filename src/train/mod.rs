pub mod trainer;
pub mod epoch_stats;
pub mod train_config;
pub mod loop_fn;
pub mod evaluate;

pub use trainer::{train_and_validate, TrainReport};
pub use epoch_stats::EpochStats;
pub use train_config::TrainConfig;
pub use loop_fn::{train_loop, TrainOutcome};
pub use evaluate::{error_rate, evaluate, predict, Evaluation};

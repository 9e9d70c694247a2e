pub mod csv;
pub mod dataset;

pub use self::csv::{load_csv, parse_csv};
pub use dataset::Dataset;

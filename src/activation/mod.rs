pub mod sigmoid;
pub mod softmax;

pub use sigmoid::{sigmoid, Sigmoid};
pub use softmax::Softmax;

pub mod params;
pub mod forward;
pub mod backward;

pub use params::{InitMode, Parameters};
pub use forward::{forward_pass, ForwardCache};
pub use backward::{backward_pass, Gradients};

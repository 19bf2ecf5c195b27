pub mod momentum;
pub mod sgd;

pub use momentum::Momentum;
pub use sgd::{Sgd, WeightUpdate};

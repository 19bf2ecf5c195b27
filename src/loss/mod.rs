pub mod error_function;
pub mod mae;
pub mod mse;

pub use error_function::ErrorFunction;
pub use mae::MeanAbsoluteError;
pub use mse::{MeanSquaredError, MseLoss};

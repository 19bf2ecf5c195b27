pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod data;
pub mod loss;
pub mod optim;
pub mod train;
pub mod eval;
pub mod report;
pub mod config;
pub mod experiment;
pub mod error;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use layers::dense::Layer;
pub use network::{Network, NetworkSpec, NetworkType};
pub use data::{DataSet, DataSetRow, MaxNormalizer, Normalizer};
pub use loss::{ErrorFunction, MeanAbsoluteError, MeanSquaredError};
pub use train::{LearningConfig, LearningEvent, LearningRule, Lms, MomentumBackpropagation};
pub use eval::{ClassificationMetrics, ClassifierEvaluator, ConfusionMatrix};
pub use config::{ExperimentConfig, Task};
pub use error::{NnError, Result};

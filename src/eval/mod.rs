pub mod classifier;
pub mod confusion_matrix;
pub mod evaluator;
pub mod metrics;

pub use classifier::{argmax, ClassifierEvaluator};
pub use confusion_matrix::ConfusionMatrix;
pub use evaluator::{evaluate, ErrorEvaluator, Evaluator};
pub use metrics::{ClassificationMetrics, Stats};

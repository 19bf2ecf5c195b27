pub mod dataset;
pub mod loader;
pub mod normalizer;

pub use dataset::{DataSet, DataSetRow};
pub use normalizer::{FittedNormalizer, MaxNormalizer, MinMaxNormalizer, Normalizer, NormalizerKind};

use serde::{Deserialize, Serialize};

use crate::data::normalizer::FittedNormalizer;

/// Optional annotations attached to a saved Network.
/// All fields are Option<> so models saved without metadata deserialize cleanly.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ModelMetadata {
    pub description: Option<String>,
    /// Column names of the inputs, taken from the data set header when present.
    pub input_labels: Option<Vec<String>>,
    /// Human-readable class labels for the output layer (e.g. ["1","2",...,"10"]).
    pub output_labels: Option<Vec<String>>,
    /// Scaling fitted on the training set; needed to feed raw rows to a loaded model.
    pub normalizer: Option<FittedNormalizer>,
}

use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::activation::activation::ActivationFunction;
use crate::error::Result;
use crate::network::network::Network;

/// A serializable description of a network architecture.
///
/// Input and output widths are not part of the spec; they come from the
/// data set the network is built for, so one spec fits any column layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NetworkSpec {
    Adaline,
    MultiLayerPerceptron {
        /// Neuron counts of the hidden layers, input side first.
        hidden: Vec<usize>,
        #[serde(default)]
        activation: ActivationFunction,
    },
}

impl NetworkSpec {
    pub fn build<R: Rng + ?Sized>(&self, inputs: usize, outputs: usize, rng: &mut R) -> Result<Network> {
        match self {
            // An Adaline always has exactly one output; wider targets are caught
            // by the training loop's width check.
            NetworkSpec::Adaline => Network::adaline(inputs, rng),
            NetworkSpec::MultiLayerPerceptron { hidden, activation } => {
                let mut sizes = Vec::with_capacity(hidden.len() + 2);
                sizes.push(inputs);
                sizes.extend_from_slice(hidden);
                sizes.push(outputs);
                Network::multi_layer_perceptron(&sizes, *activation, rng)
            }
        }
    }
}

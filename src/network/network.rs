use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use rand::Rng;
use serde::{Serialize, Deserialize};
use tracing::info;

use crate::activation::activation::ActivationFunction;
use crate::error::{NnError, Result};
use crate::layers::dense::Layer;
use crate::network::metadata::ModelMetadata;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkType {
    /// Single linear adaptive element trained by least mean squares.
    Adaline,
    /// Feed-forward network with hidden layers trained by backpropagation.
    MultiLayerPerceptron,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    pub network_type: NetworkType,
    pub input_size: usize,
    pub layers: Vec<Layer>,
    #[serde(default)]
    pub metadata: ModelMetadata,
}

impl Network {
    /// Adaline with `inputs` inputs, a bias and one linear output neuron.
    pub fn adaline<R: Rng + ?Sized>(inputs: usize, rng: &mut R) -> Result<Network> {
        if inputs == 0 {
            return Err(NnError::InvalidTopology("Adaline needs at least one input".into()));
        }
        Ok(Network {
            network_type: NetworkType::Adaline,
            input_size: inputs,
            layers: vec![Layer::new(1, inputs, ActivationFunction::Identity, rng)],
            metadata: ModelMetadata::default(),
        })
    }

    /// Builds a perceptron from neuron counts per layer, input layer first:
    /// `[11, 20, 15, 10]` is 11 inputs, two hidden layers and 10 outputs.
    pub fn multi_layer_perceptron<R: Rng + ?Sized>(
        neurons_in_layers: &[usize],
        activation: ActivationFunction,
        rng: &mut R,
    ) -> Result<Network> {
        if neurons_in_layers.len() < 2 {
            return Err(NnError::InvalidTopology(format!(
                "a perceptron needs an input and an output layer, got {} layer(s)",
                neurons_in_layers.len()
            )));
        }
        if let Some(pos) = neurons_in_layers.iter().position(|&n| n == 0) {
            return Err(NnError::InvalidTopology(format!("layer {} has no neurons", pos)));
        }

        let layers = neurons_in_layers.windows(2)
            .map(|pair| Layer::new(pair[1], pair[0], activation, rng))
            .collect();

        Ok(Network {
            network_type: NetworkType::MultiLayerPerceptron,
            input_size: neurons_in_layers[0],
            layers,
            metadata: ModelMetadata::default(),
        })
    }

    pub fn output_size(&self) -> usize {
        self.layers.last().map_or(0, |l| l.size)
    }

    /// Forward pass; stores activations in each layer for backprop.
    pub fn forward(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        self.check_input(input)?;
        let mut current = input.to_vec();
        for layer in &mut self.layers {
            current = layer.feed_from(&current);
        }
        Ok(current)
    }

    /// Forward pass on a shared reference, for evaluation and reporting.
    pub fn predict(&self, input: &[f64]) -> Result<Vec<f64>> {
        self.check_input(input)?;
        let mut current = input.to_vec();
        for layer in &self.layers {
            current = layer.predict(&current);
        }
        Ok(current)
    }

    fn check_input(&self, input: &[f64]) -> Result<()> {
        if input.len() != self.input_size {
            return Err(NnError::DimensionMismatch { expected: self.input_size, found: input.len() });
        }
        Ok(())
    }

    /// Serializes the network weights to a pretty-printed JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path.as_ref())?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        info!(path = %path.as_ref().display(), "network saved");
        Ok(())
    }

    /// Deserializes a network from a JSON file previously written by `save_json`.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Network> {
        let file = File::open(path.as_ref())?;
        let reader = BufReader::new(file);
        let network: Network = serde_json::from_reader(reader)?;
        network.check_consistency()?;
        Ok(network)
    }

    /// Layer widths must chain: each layer's fan-in is the previous layer's size,
    /// biases are a single row, and every matrix holds the values its shape claims.
    fn check_consistency(&self) -> Result<()> {
        if self.layers.is_empty() {
            return Err(NnError::InvalidTopology("network has no layers".into()));
        }
        let mut expected = self.input_size;
        for (i, layer) in self.layers.iter().enumerate() {
            if !layer.weights.is_well_formed() || !layer.biases.is_well_formed() {
                return Err(NnError::InvalidTopology(format!(
                    "layer {} has matrix data that does not match its declared shape", i
                )));
            }
            if layer.biases.rows != 1 {
                return Err(NnError::InvalidTopology(format!(
                    "layer {} has {} bias rows, expected 1", i, layer.biases.rows
                )));
            }
            if layer.input_size() != expected || layer.biases.cols != layer.size || layer.weights.cols != layer.size {
                return Err(NnError::InvalidTopology(format!(
                    "layer of {} neurons does not fit a fan-in of {}",
                    layer.size, expected
                )));
            }
            expected = layer.size;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn perceptron_layer_shapes() {
        let net = Network::multi_layer_perceptron(&[11, 20, 15, 10], ActivationFunction::Sigmoid,
            &mut StdRng::seed_from_u64(3)).unwrap();
        let shapes: Vec<(usize, usize)> = net.layers.iter().map(|l| (l.weights.rows, l.weights.cols)).collect();
        assert_eq!(shapes, vec![(11, 20), (20, 15), (15, 10)]);
        assert_eq!(net.output_size(), 10);
    }

    #[test]
    fn rejects_degenerate_topologies() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!(Network::multi_layer_perceptron(&[4], ActivationFunction::Sigmoid, &mut rng).is_err());
        assert!(Network::multi_layer_perceptron(&[4, 0, 1], ActivationFunction::Sigmoid, &mut rng).is_err());
        assert!(Network::adaline(0, &mut rng).is_err());
    }

    #[test]
    fn wrong_input_width_is_an_error() {
        let net = Network::adaline(2, &mut StdRng::seed_from_u64(3)).unwrap();
        match net.predict(&[1.0]) {
            Err(NnError::DimensionMismatch { expected: 2, found: 1 }) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn forward_and_predict_agree() {
        let mut net = Network::multi_layer_perceptron(&[3, 4, 2], ActivationFunction::Tanh,
            &mut StdRng::seed_from_u64(9)).unwrap();
        let input = [0.1, -0.4, 0.9];
        let a = net.predict(&input).unwrap();
        let b = net.forward(&input).unwrap();
        assert_eq!(a, b);
    }

    fn load_edited<F: FnOnce(&mut serde_json::Value)>(tag: &str, edit: F) -> Result<Network> {
        let net = Network::multi_layer_perceptron(&[2, 1], ActivationFunction::Sigmoid,
            &mut StdRng::seed_from_u64(5)).unwrap();
        let mut json = serde_json::to_value(&net).unwrap();
        edit(&mut json);
        let path = std::env::temp_dir().join(format!("standard_ml_{}_{}.nnet", tag, std::process::id()));
        std::fs::write(&path, serde_json::to_string(&json).unwrap()).unwrap();
        let loaded = Network::load_json(&path);
        std::fs::remove_file(&path).ok();
        loaded
    }

    #[test]
    fn load_rejects_two_bias_rows() {
        let loaded = load_edited("bias_rows", |json| {
            json["layers"][0]["biases"] = serde_json::json!({"rows": 2, "cols": 1, "data": [[0.0], [0.0]]});
        });
        assert!(matches!(loaded, Err(NnError::InvalidTopology(_))));
    }

    #[test]
    fn load_rejects_ragged_weights() {
        let loaded = load_edited("ragged", |json| {
            json["layers"][0]["weights"]["data"][1] = serde_json::json!([0.1, 0.2]);
        });
        assert!(matches!(loaded, Err(NnError::InvalidTopology(_))));

        let loaded = load_edited("short", |json| {
            json["layers"][0]["weights"]["data"] = serde_json::json!([[0.1]]);
        });
        assert!(matches!(loaded, Err(NnError::InvalidTopology(_))));
    }

    #[test]
    fn save_and_load_keep_predictions() {
        let mut net = Network::multi_layer_perceptron(&[2, 3, 1], ActivationFunction::Sigmoid,
            &mut StdRng::seed_from_u64(5)).unwrap();
        net.metadata.description = Some("roundtrip".into());
        let path = std::env::temp_dir().join(format!("standard_ml_net_{}.nnet", std::process::id()));
        net.save_json(&path).unwrap();
        let loaded = Network::load_json(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded.network_type, NetworkType::MultiLayerPerceptron);
        assert_eq!(loaded.metadata.description.as_deref(), Some("roundtrip"));
        assert_eq!(loaded.predict(&[0.3, 0.6]).unwrap(), net.predict(&[0.3, 0.6]).unwrap());
    }
}

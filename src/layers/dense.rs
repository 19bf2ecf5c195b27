use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::{math::matrix::Matrix, activation::activation::ActivationFunction};

/// Half-width of the uniform range used for initial weights and biases.
pub const INIT_RANGE: f64 = 0.7;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer{
    pub size: usize,
    #[serde(skip)]
    pub neurons: Matrix,
    #[serde(skip)]
    pre_neurons: Matrix,  // pre-activation values (z = Wx + b) needed for correct derivative
    pub weights: Matrix,
    pub biases: Matrix,
    pub activator: ActivationFunction
}

impl Layer {
    pub fn new<R: Rng + ?Sized>(
        size: usize,
        input_size: usize,
        activation: ActivationFunction,
        rng: &mut R,
    ) -> Layer {
        let weights = Matrix::random_range(input_size, size, -INIT_RANGE, INIT_RANGE, rng);
        let biases = Matrix::random_range(1, size, -INIT_RANGE, INIT_RANGE, rng);

        Layer {
            size,
            neurons: Matrix::zeros(1, size),
            pre_neurons: Matrix::zeros(1, size),
            weights,
            biases,
            activator: activation
        }
    }

    pub fn input_size(&self) -> usize {
        self.weights.rows
    }

    /// Forward pass that keeps `z` and `a` around for the backward pass.
    pub fn feed_from(&mut self, input: &[f64]) -> Vec<f64> {
        let z = self.weighted_sum(input);
        let a = z.map(|x| self.activator.function(x));
        self.pre_neurons = z;
        self.neurons = a;
        self.neurons.row().to_vec()
    }

    /// Forward pass without touching stored activations.
    pub fn predict(&self, input: &[f64]) -> Vec<f64> {
        self.weighted_sum(input).row().iter().map(|&x| self.activator.function(x)).collect()
    }

    fn weighted_sum(&self, input: &[f64]) -> Matrix {
        Matrix::from_row(input.to_vec()) * self.weights.clone() + self.biases.clone()
    }

    /// Computes gradient adjustments. Returns (weights_grad, biases_grad).
    /// `next_layer_delta` is ∂E/∂a for this layer (error in activation space).
    /// The biases gradient doubles as δ, which the caller propagates backwards.
    pub fn compute_gradients(
        &self,
        next_layer_delta: Matrix,
        inputs: &Matrix,
    ) -> (Matrix, Matrix) {
        let act_derivative = self.pre_neurons.map(|x| self.activator.derivative(x));
        let layer_delta = next_layer_delta.hadamard(&act_derivative);

        let weights_adjustment = inputs.transpose() * layer_delta.clone();
        let biases_adjustment = layer_delta;

        (weights_adjustment, biases_adjustment)
    }

    /// Adds pre-scaled deltas to weights and biases.
    pub fn apply_deltas(&mut self, weights_delta: Matrix, biases_delta: Matrix) {
        self.weights = std::mem::take(&mut self.weights) + weights_delta;
        self.biases = std::mem::take(&mut self.biases) + biases_delta;
    }
}

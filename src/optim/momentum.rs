use crate::{math::matrix::Matrix, layers::dense::Layer, network::network::Network};
use crate::optim::sgd::WeightUpdate;

/// Gradient descent with momentum: `Δ = -lr · g + μ · Δ_prev`, `w += Δ`.
pub struct Momentum {
    pub learning_rate: f64,
    pub momentum: f64,
    velocity: Vec<(Matrix, Matrix)>,
}

impl Momentum {
    pub fn new(learning_rate: f64, momentum: f64) -> Momentum {
        Momentum { learning_rate, momentum, velocity: Vec::new() }
    }
}

impl WeightUpdate for Momentum {
    fn reset(&mut self, network: &Network) {
        self.velocity = network.layers.iter()
            .map(|layer| (
                Matrix::zeros(layer.weights.rows, layer.weights.cols),
                Matrix::zeros(layer.biases.rows, layer.biases.cols),
            ))
            .collect();
    }

    fn step(&mut self, layer_index: usize, layer: &mut Layer, weights_grad: Matrix, biases_grad: Matrix) {
        let (prev_w, prev_b) = &self.velocity[layer_index];
        let dw = prev_w.scale(self.momentum) - weights_grad.scale(self.learning_rate);
        let db = prev_b.scale(self.momentum) - biases_grad.scale(self.learning_rate);
        layer.apply_deltas(dw.clone(), db.clone());
        self.velocity[layer_index] = (dw, db);
    }
}

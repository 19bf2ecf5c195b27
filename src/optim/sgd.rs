use crate::{math::matrix::Matrix, layers::dense::Layer, network::network::Network};

/// Applies one layer's gradients during training.
///
/// `reset` is called once at the start of every learning run, before the
/// first `step`, so stateful strategies can size their buffers.
pub trait WeightUpdate {
    fn reset(&mut self, network: &Network);
    fn step(&mut self, layer_index: usize, layer: &mut Layer, weights_grad: Matrix, biases_grad: Matrix);
}

/// Plain gradient descent, `w -= lr · g`. On an Adaline this is the
/// least-mean-squares (Widrow-Hoff) rule.
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }
}

impl WeightUpdate for Sgd {
    fn reset(&mut self, _network: &Network) {}

    fn step(&mut self, _layer_index: usize, layer: &mut Layer, weights_grad: Matrix, biases_grad: Matrix) {
        layer.apply_deltas(
            weights_grad.scale(-self.learning_rate),
            biases_grad.scale(-self.learning_rate),
        );
    }
}

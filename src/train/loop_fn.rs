use std::sync::atomic::Ordering;
use std::time::Instant;

use rand::{rngs::StdRng, SeedableRng};
use rand::seq::SliceRandom;
use tracing::{debug, info};

use crate::data::dataset::DataSet;
use crate::error::{NnError, Result};
use crate::loss::error_function::ErrorFunction;
use crate::loss::mse::MeanSquaredError;
use crate::math::matrix::Matrix;
use crate::network::network::Network;
use crate::optim::sgd::WeightUpdate;
use crate::train::learning_config::LearningConfig;
use crate::train::learning_event::{IterationStats, LearningEvent, LearningEventListener, StopReason};

/// Result of a completed `learn` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LearningOutcome {
    pub iterations: usize,
    pub total_network_error: f64,
    pub reason: StopReason,
}

/// State shared by every supervised learning rule: configuration, listeners
/// and the progress of the current (or last) run.
pub struct SupervisedLearning {
    pub config: LearningConfig,
    listeners: Vec<Box<dyn LearningEventListener>>,
    current_iteration: usize,
    total_network_error: f64,
}

impl SupervisedLearning {
    pub fn new(config: LearningConfig) -> Self {
        SupervisedLearning {
            config,
            listeners: Vec::new(),
            current_iteration: 0,
            total_network_error: 0.0,
        }
    }

    pub fn add_listener(&mut self, listener: Box<dyn LearningEventListener>) {
        self.listeners.push(listener);
    }

    pub fn current_iteration(&self) -> usize {
        self.current_iteration
    }

    pub fn total_network_error(&self) -> f64 {
        self.total_network_error
    }

    fn notify(&mut self, event: LearningEvent, observer: &mut dyn LearningEventListener) {
        for listener in self.listeners.iter_mut() {
            listener.handle_learning_event(&event);
        }
        observer.handle_learning_event(&event);
    }

    // -----------------------------------------------------------------------
    // Learning loop
    // -----------------------------------------------------------------------

    /// Runs passes over `training_set` until a stop condition holds and
    /// returns how the run ended.
    ///
    /// At least one iteration always runs. After each one, stop conditions
    /// are checked in this order: `stop_flag`, `error < max_error`,
    /// `iteration >= max_iterations`, stalled error change.
    pub fn run(
        &mut self,
        network: &mut Network,
        training_set: &DataSet,
        update: &mut dyn WeightUpdate,
    ) -> Result<LearningOutcome> {
        self.run_observed(network, training_set, update, &mut |_: &LearningEvent| {})
    }

    /// Same as [`run`](Self::run), with one more listener that is only
    /// borrowed for this run and notified after the registered ones.
    pub fn run_observed(
        &mut self,
        network: &mut Network,
        training_set: &DataSet,
        update: &mut dyn WeightUpdate,
        observer: &mut dyn LearningEventListener,
    ) -> Result<LearningOutcome> {
        self.config.validate()?;
        if training_set.is_empty() {
            return Err(NnError::EmptyDataSet);
        }
        if training_set.input_size() != network.input_size {
            return Err(NnError::DimensionMismatch {
                expected: network.input_size,
                found: training_set.input_size(),
            });
        }
        if training_set.output_size() != network.output_size() {
            return Err(NnError::DimensionMismatch {
                expected: network.output_size(),
                found: training_set.output_size(),
            });
        }

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut order: Vec<usize> = (0..training_set.len()).collect();
        let mut previous_error: Option<f64> = None;
        let mut stalled = 0usize;

        update.reset(network);
        self.current_iteration = 0;
        self.total_network_error = 0.0;

        info!(
            rows = training_set.len(),
            learning_rate = self.config.learning_rate,
            max_error = self.config.max_error,
            max_iterations = ?self.config.max_iterations,
            "learning started"
        );

        loop {
            let t_start = Instant::now();
            let iteration = self.current_iteration + 1;

            if self.config.shuffle {
                order.shuffle(&mut rng);
            }

            let error = run_one_epoch(network, training_set, &order, update, self.config.batch_size)?;

            self.current_iteration = iteration;
            self.total_network_error = error;

            let stats = IterationStats {
                iteration,
                total_network_error: error,
                previous_error,
                elapsed_ms: t_start.elapsed().as_millis() as u64,
            };
            debug!(iteration, error, "iteration ended");
            self.notify(LearningEvent::IterationEnded(stats.clone()), observer);

            if let (Some(change), Some(prev)) = (self.config.min_error_change, previous_error) {
                if (prev - error).abs() < change.delta {
                    stalled += 1;
                } else {
                    stalled = 0;
                }
            }
            previous_error = Some(error);

            if let Some(reason) = self.stop_reason(iteration, error, stalled) {
                info!(iterations = iteration, error, ?reason, "learning stopped");
                self.notify(LearningEvent::LearningStopped { stats, reason }, observer);
                return Ok(LearningOutcome { iterations: iteration, total_network_error: error, reason });
            }
        }
    }

    fn stop_reason(&self, iteration: usize, error: f64, stalled: usize) -> Option<StopReason> {
        let cfg = &self.config;
        if cfg.stop_flag.as_ref().is_some_and(|flag| flag.load(Ordering::Relaxed)) {
            return Some(StopReason::Interrupted);
        }
        if error < cfg.max_error {
            return Some(StopReason::MaxErrorReached);
        }
        if cfg.max_iterations.is_some_and(|max| iteration >= max) {
            return Some(StopReason::MaxIterationsReached);
        }
        if cfg.min_error_change.is_some_and(|change| stalled >= change.iterations) {
            return Some(StopReason::ErrorChangeStalled);
        }
        None
    }
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// One full pass over the training rows in `order`, updating weights after
/// every `batch_size` patterns. Returns the mean squared error of the pass,
/// with each pattern's error taken before its own update.
fn run_one_epoch(
    network: &mut Network,
    set: &DataSet,
    order: &[usize],
    update: &mut dyn WeightUpdate,
    batch_size: usize,
) -> Result<f64> {
    let rows = set.rows();
    let mut mse = MeanSquaredError::new();

    for batch in order.chunks(batch_size) {
        let mut acc_grads: Vec<(Matrix, Matrix)> = network.layers.iter()
            .map(|layer| (
                Matrix::zeros(layer.weights.rows, layer.weights.cols),
                Matrix::zeros(layer.biases.rows, layer.biases.cols),
            ))
            .collect();

        for &idx in batch {
            let row = &rows[idx];
            let output = network.forward(&row.input)?;

            // ∂E/∂output for E = 0.5 · Σ(o - d)²
            let error = mse.add_pattern_error(&output, &row.desired_output);
            let mut delta = Matrix::from_row(error);

            for i in (0..network.layers.len()).rev() {
                let input_for_layer = if i == 0 {
                    Matrix::from_row(row.input.clone())
                } else {
                    network.layers[i - 1].neurons.clone()
                };

                let (w_grad, b_grad) = network.layers[i].compute_gradients(delta, &input_for_layer);

                delta = if i > 0 {
                    b_grad.clone() * network.layers[i].weights.transpose()
                } else {
                    Matrix::default()
                };

                let acc = &mut acc_grads[i];
                acc.0 = std::mem::take(&mut acc.0) + w_grad;
                acc.1 = std::mem::take(&mut acc.1) + b_grad;
            }
        }

        let inv_batch = 1.0 / batch.len() as f64;
        for (i, (w_acc, b_acc)) in acc_grads.into_iter().enumerate() {
            update.step(i, &mut network.layers[i], w_acc.scale(inv_batch), b_acc.scale(inv_batch));
        }
    }

    Ok(mse.total_error())
}

use crate::data::dataset::DataSet;
use crate::error::Result;
use crate::loss::error_function::ErrorFunction;
use crate::network::network::Network;

/// Consumes (network output, desired output) pairs one row at a time.
pub trait Evaluator {
    fn process_result(&mut self, output: &[f64], desired: &[f64]);
    fn reset(&mut self);
}

/// Feeds every row of `data_set` through `network` and hands the result to
/// each evaluator in turn. Evaluators are reset first, so one evaluator can
/// be reused across data sets.
pub fn evaluate(network: &Network, data_set: &DataSet, evaluators: &mut [&mut dyn Evaluator]) -> Result<()> {
    for evaluator in evaluators.iter_mut() {
        evaluator.reset();
    }
    for row in data_set.rows() {
        let output = network.predict(&row.input)?;
        for evaluator in evaluators.iter_mut() {
            evaluator.process_result(&output, &row.desired_output);
        }
    }
    Ok(())
}

/// Accumulates an error function over the evaluated rows.
#[derive(Debug, Clone, Default)]
pub struct ErrorEvaluator<E: ErrorFunction> {
    error_function: E,
}

impl<E: ErrorFunction> ErrorEvaluator<E> {
    pub fn new(error_function: E) -> Self {
        ErrorEvaluator { error_function }
    }

    pub fn result(&self) -> f64 {
        self.error_function.total_error()
    }
}

impl<E: ErrorFunction> Evaluator for ErrorEvaluator<E> {
    fn process_result(&mut self, output: &[f64], desired: &[f64]) {
        self.error_function.add_pattern_error(output, desired);
    }

    fn reset(&mut self) {
        self.error_function.reset();
    }
}

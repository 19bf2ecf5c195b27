use std::fmt;
use std::io::Write;

use serde::{Serialize, Deserialize};

use crate::data::dataset::DataSet;
use crate::error::Result;
use crate::eval::{evaluate, ClassificationMetrics, ClassifierEvaluator, ConfusionMatrix, ErrorEvaluator, Evaluator, Stats};
use crate::loss::{MeanAbsoluteError, MeanSquaredError};
use crate::network::network::Network;

/// Writes input, actual output and desired output for every row of `set`.
pub fn write_network_outputs<W: Write>(out: &mut W, network: &Network, set: &DataSet) -> Result<()> {
    writeln!(out, "Showing inputs, desired output and neural network output for every row in test set.")?;
    for row in set.rows() {
        let output = network.predict(&row.input)?;
        writeln!(out, "Input: {:?}", row.input)?;
        writeln!(out, "Output: {:?}", output)?;
        writeln!(out, "Desired output: {:?}", row.desired_output)?;
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionReport {
    pub mean_squared_error: f64,
    pub mean_absolute_error: f64,
}

impl fmt::Display for RegressionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mean squared error is: {}", self.mean_squared_error)?;
        write!(f, "Mean absolute error is: {}", self.mean_absolute_error)
    }
}

pub fn evaluate_regression(network: &Network, set: &DataSet) -> Result<RegressionReport> {
    let mut mse = ErrorEvaluator::new(MeanSquaredError::new());
    let mut mae = ErrorEvaluator::new(MeanAbsoluteError::new());
    evaluate(network, set, &mut [&mut mse as &mut dyn Evaluator, &mut mae])?;
    Ok(RegressionReport {
        mean_squared_error: mse.result(),
        mean_absolute_error: mae.result(),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub mean_squared_error: f64,
    pub confusion: ConfusionMatrix,
    pub metrics: Vec<ClassificationMetrics>,
    pub average: Stats,
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mean squared error is: {}", self.mean_squared_error)?;
        writeln!(f, "Confusion matrix:")?;
        writeln!(f)?;
        writeln!(f, "{}", self.confusion)?;
        writeln!(f, "Classification metrics")?;
        writeln!(f)?;
        for m in &self.metrics {
            writeln!(f, "{}", m)?;
            writeln!(f)?;
        }
        write!(f, "{}", self.average)
    }
}

/// Confusion matrix and per-class metrics; `labels` name the output neurons in order.
pub fn evaluate_classification(network: &Network, set: &DataSet, labels: &[String]) -> Result<ClassificationReport> {
    let mut mse = ErrorEvaluator::new(MeanSquaredError::new());
    let mut classifier = ClassifierEvaluator::multi_class(labels.iter().cloned());
    evaluate(network, set, &mut [&mut mse as &mut dyn Evaluator, &mut classifier])?;

    let confusion = classifier.into_result();
    let metrics = ClassificationMetrics::from_matrix(&confusion);
    let average = ClassificationMetrics::average(&metrics);
    Ok(ClassificationReport {
        mean_squared_error: mse.result(),
        confusion,
        metrics,
        average,
    })
}

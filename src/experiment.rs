use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;

use rand::{rngs::StdRng, SeedableRng};
use tracing::info;

use crate::config::{ExperimentConfig, Task};
use crate::data::dataset::DataSet;
use crate::data::normalizer::{FittedNormalizer, Normalizer};
use crate::error::{NnError, Result};
use crate::report::{evaluate_classification, evaluate_regression, write_network_outputs};
use crate::report::{ClassificationReport, RegressionReport};
use crate::train::learning_event::{LearningEvent, LearningEventListener};
use crate::train::loop_fn::LearningOutcome;
use crate::train::rules::LearningRule;

#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
    Regression(RegressionReport),
    Classification(ClassificationReport),
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Evaluation::Regression(r) => fmt::Display::fmt(r, f),
            Evaluation::Classification(c) => fmt::Display::fmt(c, f),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentReport {
    pub training_rows: usize,
    pub test_rows: usize,
    pub outcome: LearningOutcome,
    pub evaluation: Evaluation,
    pub model_path: PathBuf,
}

/// Writes `"<n>. iteration | Total network error: <e>"` every `every`
/// iterations, plus the last one if it was not already written.
///
/// A listener cannot fail, so the first write error is kept and handed back
/// by [`finish`](Self::finish).
pub struct ProgressPrinter<W: Write> {
    out: W,
    every: usize,
    error: Option<io::Error>,
}

impl<W: Write> ProgressPrinter<W> {
    pub fn new(out: W, every: usize) -> ProgressPrinter<W> {
        ProgressPrinter { out, every: every.max(1), error: None }
    }

    pub fn finish(self) -> io::Result<W> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.out),
        }
    }
}

impl<W: Write> LearningEventListener for ProgressPrinter<W> {
    fn handle_learning_event(&mut self, event: &LearningEvent) {
        let stats = match event {
            LearningEvent::IterationEnded(s) if s.iteration % self.every == 0 => s,
            LearningEvent::LearningStopped { stats, .. } if stats.iteration % self.every != 0 => stats,
            _ => return,
        };
        if self.error.is_some() {
            return;
        }
        let written = writeln!(
            self.out,
            "{}. iteration | Total network error: {}",
            stats.iteration, stats.total_network_error
        )
        .and_then(|()| self.out.flush());
        if let Err(e) = written {
            self.error = Some(e);
        }
    }
}

/// Load, split, normalize, build, train, evaluate, save, print.
///
/// The whole transcript goes to `out`, progress lines included, written
/// while training runs.
pub fn run<W: Write>(config: &ExperimentConfig, out: &mut W) -> Result<ExperimentReport> {
    config.validate()?;
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    writeln!(out, "Creating data set...")?;
    let data = &config.data;
    let data_set = DataSet::from_file(&data.path, data.input_count, data.output_count, &data.delimiter, data.has_header)?;

    let mut parts = data_set.split(&[config.train_ratio, 1.0 - config.train_ratio], &mut rng)?;
    let (mut training_set, mut test_set) = match (parts.pop(), parts.pop()) {
        (Some(test), Some(train)) => (train, test),
        _ => return Err(NnError::InvalidSplit("expected a training and a test part".into())),
    };
    if training_set.is_empty() {
        return Err(NnError::InvalidSplit(format!(
            "no training rows left out of {} with ratio {}", data_set.len(), config.train_ratio
        )));
    }

    let normalizer = FittedNormalizer::fit(config.normalizer, &training_set);
    normalizer.normalize(&mut training_set);
    normalizer.normalize(&mut test_set);

    writeln!(out, "Creating neural network...")?;
    let mut network = config.network.build(data.input_count, data.output_count, &mut rng)?;
    network.metadata.description = Some(config.name.clone());
    network.metadata.input_labels = data_set.column_names()
        .map(|names| names.iter().take(data.input_count).cloned().collect());
    if let Task::Classification { labels } = &config.task {
        network.metadata.output_labels = Some(labels.clone());
    }
    network.metadata.normalizer = Some(normalizer);

    let mut learning = config.learning.clone();
    if learning.seed.is_none() {
        learning.seed = config.seed;
    }
    let mut rule = config.learning_rule.build(learning);

    writeln!(out, "Training network...")?;
    out.flush()?;
    let mut progress = ProgressPrinter::new(&mut *out, config.report_every);
    let outcome = rule.learn_observed(&mut network, &training_set, &mut progress)?;
    progress.finish()?;
    writeln!(out, "Training completed.")?;

    writeln!(out, "Testing network...")?;
    writeln!(out, "Network performance on the test set")?;
    writeln!(out, "Calculating performance indicators for neural network.")?;
    let evaluation = match &config.task {
        Task::Regression => Evaluation::Regression(evaluate_regression(&network, &test_set)?),
        Task::Classification { labels } => {
            Evaluation::Classification(evaluate_classification(&network, &test_set, labels)?)
        }
    };
    writeln!(out, "{}", evaluation)?;

    match config.task {
        Task::Regression => {
            writeln!(out, "Saving trained network")?;
            network.save_json(&config.model_path)?;
        }
        Task::Classification { .. } => {
            writeln!(out, "Saving network")?;
            network.save_json(&config.model_path)?;
            writeln!(out, "Done.")?;
        }
    }

    writeln!(out)?;
    writeln!(out, "Network outputs for test set")?;
    write_network_outputs(out, &network, &test_set)?;

    info!(
        name = %config.name,
        iterations = outcome.iterations,
        error = outcome.total_network_error,
        "experiment finished"
    );

    Ok(ExperimentReport {
        training_rows: training_set.len(),
        test_rows: test_set.len(),
        outcome,
        evaluation,
        model_path: config.model_path.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::train::learning_event::{IterationStats, StopReason};

    fn stats(iteration: usize, error: f64) -> IterationStats {
        IterationStats { iteration, total_network_error: error, previous_error: None, elapsed_ms: 0 }
    }

    /// Seven iterations ending with a stop, as a learning run would report them.
    fn replay(every: usize) -> Vec<String> {
        let mut printer = ProgressPrinter::new(Vec::new(), every);
        for i in 1..=7 {
            printer.handle_learning_event(&LearningEvent::IterationEnded(stats(i, 0.5 / i as f64)));
        }
        printer.handle_learning_event(&LearningEvent::LearningStopped {
            stats: stats(7, 0.5 / 7.0),
            reason: StopReason::MaxIterationsReached,
        });
        let out = printer.finish().unwrap();
        String::from_utf8(out).unwrap().lines().map(str::to_string).collect()
    }

    #[test]
    fn every_iteration_is_printed_once() {
        let lines = replay(1);
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "1. iteration | Total network error: 0.5");
        assert_eq!(lines[3], "4. iteration | Total network error: 0.125");
        assert!(lines[6].starts_with("7. iteration | Total network error: 0.0714"));
    }

    #[test]
    fn throttled_printer_still_reports_the_last_iteration() {
        let lines = replay(3);
        let iterations: Vec<&str> = lines.iter().map(|l| l.split('.').next().unwrap_or("")).collect();
        assert_eq!(iterations, vec!["3", "6", "7"]);
        assert!(lines[1].starts_with("6. iteration | Total network error: 0.0833"));
    }

    #[test]
    fn last_iteration_on_the_cadence_is_not_repeated() {
        let mut printer = ProgressPrinter::new(Vec::new(), 2);
        printer.handle_learning_event(&LearningEvent::IterationEnded(stats(2, 0.25)));
        printer.handle_learning_event(&LearningEvent::LearningStopped {
            stats: stats(2, 0.25),
            reason: StopReason::MaxErrorReached,
        });
        let text = String::from_utf8(printer.finish().unwrap()).unwrap();
        assert_eq!(text, "2. iteration | Total network error: 0.25\n");
    }
}

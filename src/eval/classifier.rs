use tracing::warn;

use crate::eval::confusion_matrix::ConfusionMatrix;
use crate::eval::evaluator::Evaluator;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Mode {
    /// One output per class; the largest output wins.
    MultiClass,
    /// A single output compared against a threshold.
    Binary { threshold: f64 },
}

/// Builds a confusion matrix from network outputs.
#[derive(Debug, Clone)]
pub struct ClassifierEvaluator {
    mode: Mode,
    matrix: ConfusionMatrix,
}

impl ClassifierEvaluator {
    /// One label per output neuron; labels are matched to outputs by position.
    pub fn multi_class<S: Into<String>>(labels: impl IntoIterator<Item = S>) -> ClassifierEvaluator {
        let labels = labels.into_iter().map(Into::into).collect();
        ClassifierEvaluator { mode: Mode::MultiClass, matrix: ConfusionMatrix::new(labels) }
    }

    /// Single-output classifier: values `>= threshold` are "positive".
    pub fn binary(threshold: f64) -> ClassifierEvaluator {
        ClassifierEvaluator {
            mode: Mode::Binary { threshold },
            matrix: ConfusionMatrix::new(vec!["negative".into(), "positive".into()]),
        }
    }

    pub fn result(&self) -> &ConfusionMatrix {
        &self.matrix
    }

    pub fn into_result(self) -> ConfusionMatrix {
        self.matrix
    }
}

impl Evaluator for ClassifierEvaluator {
    fn process_result(&mut self, output: &[f64], desired: &[f64]) {
        let n = self.matrix.class_count();
        let (actual, predicted) = match self.mode {
            Mode::MultiClass => (argmax(desired), argmax(output)),
            Mode::Binary { threshold } => (
                usize::from(desired.first().is_some_and(|&d| d >= threshold)),
                usize::from(output.first().is_some_and(|&o| o >= threshold)),
            ),
        };
        if actual < n && predicted < n {
            self.matrix.increment(actual, predicted);
        } else {
            warn!(
                actual,
                predicted,
                classes = n,
                "class index outside the label range, row not counted"
            );
        }
    }

    fn reset(&mut self) {
        self.matrix.clear();
    }
}

/// Index of the maximum element in a slice; ties go to the lowest index.
pub fn argmax(v: &[f64]) -> usize {
    v.iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, &x)| match best {
            Some((_, b)) if b >= x || x.is_nan() => best,
            _ => Some((i, x)),
        })
        .map(|(i, _)| i)
        .unwrap_or(0)
}

use std::fmt;

use serde::{Serialize, Deserialize};

use crate::eval::confusion_matrix::ConfusionMatrix;

/// One-vs-rest metrics for a single class of a confusion matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationMetrics {
    pub class_label: String,
    pub true_positive: usize,
    pub true_negative: usize,
    pub false_positive: usize,
    pub false_negative: usize,
}

/// `0/0` counts as 0 so empty classes do not poison averages with NaN.
fn ratio(num: f64, den: f64) -> f64 {
    if den == 0.0 { 0.0 } else { num / den }
}

impl ClassificationMetrics {
    /// Metrics for every class of `matrix`, in label order.
    pub fn from_matrix(matrix: &ConfusionMatrix) -> Vec<ClassificationMetrics> {
        (0..matrix.class_count())
            .map(|c| ClassificationMetrics {
                class_label: matrix.labels()[c].clone(),
                true_positive: matrix.true_positive(c),
                true_negative: matrix.true_negative(c),
                false_positive: matrix.false_positive(c),
                false_negative: matrix.false_negative(c),
            })
            .collect()
    }

    fn counts(&self) -> (f64, f64, f64, f64) {
        (
            self.true_positive as f64,
            self.true_negative as f64,
            self.false_positive as f64,
            self.false_negative as f64,
        )
    }

    pub fn total(&self) -> usize {
        self.true_positive + self.true_negative + self.false_positive + self.false_negative
    }

    pub fn accuracy(&self) -> f64 {
        let (tp, tn, _, _) = self.counts();
        ratio(tp + tn, self.total() as f64)
    }

    pub fn error_rate(&self) -> f64 {
        let (_, _, fp, fn_) = self.counts();
        ratio(fp + fn_, self.total() as f64)
    }

    pub fn precision(&self) -> f64 {
        let (tp, _, fp, _) = self.counts();
        ratio(tp, tp + fp)
    }

    /// Also known as sensitivity or true positive rate.
    pub fn recall(&self) -> f64 {
        let (tp, _, _, fn_) = self.counts();
        ratio(tp, tp + fn_)
    }

    pub fn specificity(&self) -> f64 {
        let (_, tn, fp, _) = self.counts();
        ratio(tn, tn + fp)
    }

    pub fn false_positive_rate(&self) -> f64 {
        let (_, tn, fp, _) = self.counts();
        ratio(fp, fp + tn)
    }

    pub fn false_negative_rate(&self) -> f64 {
        let (tp, _, _, fn_) = self.counts();
        ratio(fn_, fn_ + tp)
    }

    /// Weighted harmonic mean of precision and recall; `beta > 1` favours recall.
    pub fn f_measure(&self, beta: f64) -> f64 {
        let p = self.precision();
        let r = self.recall();
        let b2 = beta * beta;
        ratio((1.0 + b2) * p * r, b2 * p + r)
    }

    pub fn f1_score(&self) -> f64 {
        self.f_measure(1.0)
    }

    pub fn matthews_correlation_coefficient(&self) -> f64 {
        let (tp, tn, fp, fn_) = self.counts();
        let den = ((tp + fp) * (tp + fn_) * (tn + fp) * (tn + fn_)).sqrt();
        ratio(tp * tn - fp * fn_, den)
    }

    /// Plain (macro) average over classes.
    pub fn average(metrics: &[ClassificationMetrics]) -> Stats {
        let n = metrics.len() as f64;
        let mean = |f: fn(&ClassificationMetrics) -> f64| ratio(metrics.iter().map(f).sum::<f64>(), n);
        Stats {
            accuracy: mean(ClassificationMetrics::accuracy),
            precision: mean(ClassificationMetrics::precision),
            recall: mean(ClassificationMetrics::recall),
            f_measure: mean(ClassificationMetrics::f1_score),
            mcc: mean(ClassificationMetrics::matthews_correlation_coefficient),
            error_rate: mean(ClassificationMetrics::error_rate),
        }
    }
}

impl fmt::Display for ClassificationMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Class: {}", self.class_label)?;
        writeln!(f, "Total items: {}", self.total())?;
        writeln!(f, "True positive: {}", self.true_positive)?;
        writeln!(f, "True negative: {}", self.true_negative)?;
        writeln!(f, "False positive: {}", self.false_positive)?;
        writeln!(f, "False negative: {}", self.false_negative)?;
        writeln!(f, "Accuracy: {:.4}", self.accuracy())?;
        writeln!(f, "Error rate: {:.4}", self.error_rate())?;
        writeln!(f, "Precision: {:.4}", self.precision())?;
        writeln!(f, "Recall: {:.4}", self.recall())?;
        writeln!(f, "Specificity: {:.4}", self.specificity())?;
        writeln!(f, "False positive rate: {:.4}", self.false_positive_rate())?;
        writeln!(f, "False negative rate: {:.4}", self.false_negative_rate())?;
        writeln!(f, "F-measure: {:.4}", self.f1_score())?;
        write!(f, "Matthews correlation coefficient: {:.4}", self.matthews_correlation_coefficient())
    }
}

/// Class-averaged metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f_measure: f64,
    pub mcc: f64,
    pub error_rate: f64,
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Average over classes")?;
        writeln!(f, "Accuracy: {:.4}", self.accuracy)?;
        writeln!(f, "Precision: {:.4}", self.precision)?;
        writeln!(f, "Recall: {:.4}", self.recall)?;
        writeln!(f, "F-measure: {:.4}", self.f_measure)?;
        writeln!(f, "Matthews correlation coefficient: {:.4}", self.mcc)?;
        write!(f, "Error rate: {:.4}", self.error_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn binary_matrix() -> ConfusionMatrix {
        let mut cm = ConfusionMatrix::new(vec!["no".into(), "yes".into()]);
        // actual yes: 6 predicted yes, 2 predicted no; actual no: 1 predicted yes, 11 predicted no
        for _ in 0..6 { cm.increment(1, 1); }
        for _ in 0..2 { cm.increment(1, 0); }
        cm.increment(0, 1);
        for _ in 0..11 { cm.increment(0, 0); }
        cm
    }

    #[test]
    fn positive_class_metrics() {
        let metrics = ClassificationMetrics::from_matrix(&binary_matrix());
        let yes = &metrics[1];
        assert_eq!((yes.true_positive, yes.true_negative, yes.false_positive, yes.false_negative), (6, 11, 1, 2));
        assert!(close(yes.accuracy(), 17.0 / 20.0));
        assert!(close(yes.precision(), 6.0 / 7.0));
        assert!(close(yes.recall(), 0.75));
        assert!(close(yes.specificity(), 11.0 / 12.0));
        assert!(close(yes.f1_score(), 2.0 * (6.0 / 7.0) * 0.75 / (6.0 / 7.0 + 0.75)));
        let mcc = (6.0 * 11.0 - 1.0 * 2.0) / (7.0f64 * 8.0 * 12.0 * 13.0).sqrt();
        assert!(close(yes.matthews_correlation_coefficient(), mcc));
    }

    #[test]
    fn empty_class_yields_zero_not_nan() {
        let mut cm = ConfusionMatrix::new(vec!["a".into(), "b".into()]);
        cm.increment(0, 0);
        let metrics = ClassificationMetrics::from_matrix(&cm);
        assert_eq!(metrics[1].precision(), 0.0);
        assert_eq!(metrics[1].recall(), 0.0);
        assert_eq!(metrics[1].f1_score(), 0.0);
        let avg = ClassificationMetrics::average(&metrics);
        assert!(avg.precision.is_finite());
        assert!(close(avg.accuracy, 1.0));
    }

    #[test]
    fn average_of_nothing_is_zero() {
        let avg = ClassificationMetrics::average(&[]);
        assert_eq!(avg.accuracy, 0.0);
    }
}

use crate::loss::error_function::ErrorFunction;

pub struct MseLoss;

impl MseLoss {
    /// Scalar loss for one pattern: 0.5 · sum((predicted - expected)²)
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        0.5 * predicted.iter().zip(expected.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>()
    }

    /// Per-output gradient: predicted - expected
    pub fn derivative(predicted: &[f64], expected: &[f64]) -> Vec<f64> {
        predicted.iter().zip(expected.iter())
            .map(|(a, b)| a - b)
            .collect()
    }
}

/// Mean squared error over a data set: sum over patterns of sum((o - d)²),
/// divided by twice the pattern count.
#[derive(Debug, Clone, Default)]
pub struct MeanSquaredError {
    total: f64,
    patterns: usize,
}

impl MeanSquaredError {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns
    }
}

impl ErrorFunction for MeanSquaredError {
    fn add_pattern_error(&mut self, output: &[f64], desired: &[f64]) -> Vec<f64> {
        self.total += 2.0 * MseLoss::loss(output, desired);
        self.patterns += 1;
        MseLoss::derivative(output, desired)
    }

    fn total_error(&self) -> f64 {
        if self.patterns == 0 {
            return 0.0;
        }
        self.total / (2.0 * self.patterns as f64)
    }

    fn reset(&mut self) {
        self.total = 0.0;
        self.patterns = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_is_half_mean_of_squared_sums() {
        let mut mse = MeanSquaredError::new();
        assert_eq!(mse.total_error(), 0.0);
        let e = mse.add_pattern_error(&[1.0, 0.0], &[0.0, 0.0]);
        assert_eq!(e, vec![1.0, 0.0]);
        mse.add_pattern_error(&[0.5], &[1.5]);
        // (1 + 1) / (2 * 2)
        assert!((mse.total_error() - 0.5).abs() < 1e-12);
        mse.reset();
        assert_eq!(mse.pattern_count(), 0);
    }
}

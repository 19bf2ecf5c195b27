use crate::loss::error_function::ErrorFunction;

/// Mean absolute error over a data set: sum over patterns of sum(|o - d|),
/// divided by the pattern count.
#[derive(Debug, Clone, Default)]
pub struct MeanAbsoluteError {
    total: f64,
    patterns: usize,
}

impl MeanAbsoluteError {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ErrorFunction for MeanAbsoluteError {
    fn add_pattern_error(&mut self, output: &[f64], desired: &[f64]) -> Vec<f64> {
        let errors: Vec<f64> = output.iter().zip(desired.iter())
            .map(|(o, d)| o - d)
            .collect();
        self.total += errors.iter().map(|e| e.abs()).sum::<f64>();
        self.patterns += 1;
        errors
    }

    fn total_error(&self) -> f64 {
        if self.patterns == 0 {
            return 0.0;
        }
        self.total / self.patterns as f64
    }

    fn reset(&mut self) {
        self.total = 0.0;
        self.patterns = 0;
    }
}

/// Accumulates per-pattern errors into one total over a pass through a data set.
pub trait ErrorFunction {
    /// Records one pattern and returns its per-output error vector (`output - desired`).
    fn add_pattern_error(&mut self, output: &[f64], desired: &[f64]) -> Vec<f64>;
    /// Total error over every pattern recorded since the last reset.
    fn total_error(&self) -> f64;
    fn reset(&mut self);
}

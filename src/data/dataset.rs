use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Serialize, Deserialize};
use tracing::info;

use crate::error::{NnError, Result};

/// Tolerance for split ratios summing to one.
const RATIO_EPS: f64 = 1e-9;

/// One training example: an input vector and the output the network should produce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSetRow {
    pub input: Vec<f64>,
    pub desired_output: Vec<f64>,
}

impl DataSetRow {
    pub fn new(input: Vec<f64>, desired_output: Vec<f64>) -> DataSetRow {
        DataSetRow { input, desired_output }
    }
}

/// Rows of fixed input and output width.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSet {
    input_size: usize,
    output_size: usize,
    rows: Vec<DataSetRow>,
    column_names: Option<Vec<String>>,
}

impl DataSet {
    pub fn new(input_size: usize, output_size: usize) -> DataSet {
        DataSet { input_size, output_size, rows: Vec::new(), column_names: None }
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn output_size(&self) -> usize {
        self.output_size
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[DataSetRow] {
        &self.rows
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [DataSetRow] {
        &mut self.rows
    }

    pub fn column_names(&self) -> Option<&[String]> {
        self.column_names.as_deref()
    }

    pub fn set_column_names(&mut self, names: Vec<String>) {
        self.column_names = Some(names);
    }

    /// Appends a row after checking both widths.
    pub fn add_row(&mut self, row: DataSetRow) -> Result<()> {
        if row.input.len() != self.input_size {
            return Err(NnError::DimensionMismatch { expected: self.input_size, found: row.input.len() });
        }
        if row.desired_output.len() != self.output_size {
            return Err(NnError::DimensionMismatch { expected: self.output_size, found: row.desired_output.len() });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn inputs(&self) -> Vec<Vec<f64>> {
        self.rows.iter().map(|r| r.input.clone()).collect()
    }

    pub fn desired_outputs(&self) -> Vec<Vec<f64>> {
        self.rows.iter().map(|r| r.desired_output.clone()).collect()
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.rows.shuffle(rng);
    }

    /// Shuffles a copy of the rows and cuts it into consecutive parts.
    ///
    /// Each part but the last gets `round(ratio * len)` rows; the last takes
    /// whatever remains, so no row is lost or duplicated.
    pub fn split<R: Rng + ?Sized>(&self, ratios: &[f64], rng: &mut R) -> Result<Vec<DataSet>> {
        if ratios.is_empty() {
            return Err(NnError::InvalidSplit("no ratios given".into()));
        }
        if let Some(bad) = ratios.iter().find(|r| !(**r > 0.0) || !r.is_finite()) {
            return Err(NnError::InvalidSplit(format!("ratio {} is not positive", bad)));
        }
        let sum: f64 = ratios.iter().sum();
        if (sum - 1.0).abs() > RATIO_EPS {
            return Err(NnError::InvalidSplit(format!("ratios sum to {}, expected 1", sum)));
        }

        let mut rows = self.rows.clone();
        rows.shuffle(rng);

        let n = rows.len();
        let mut parts = Vec::with_capacity(ratios.len());
        let mut remaining = rows.into_iter();
        let mut taken = 0;
        for (i, ratio) in ratios.iter().enumerate() {
            let count = if i + 1 == ratios.len() {
                n - taken
            } else {
                ((ratio * n as f64).round() as usize).min(n - taken)
            };
            taken += count;
            parts.push(DataSet {
                input_size: self.input_size,
                output_size: self.output_size,
                rows: remaining.by_ref().take(count).collect(),
                column_names: self.column_names.clone(),
            });
        }

        info!(
            rows = n,
            parts = ?parts.iter().map(DataSet::len).collect::<Vec<_>>(),
            "data set split"
        );
        Ok(parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn numbered(n: usize) -> DataSet {
        let mut set = DataSet::new(1, 1);
        for i in 0..n {
            set.add_row(DataSetRow::new(vec![i as f64], vec![2.0 * i as f64])).unwrap();
        }
        set
    }

    #[test]
    fn add_row_checks_widths() {
        let mut set = DataSet::new(2, 1);
        assert!(set.add_row(DataSetRow::new(vec![1.0], vec![1.0])).is_err());
        assert!(set.add_row(DataSetRow::new(vec![1.0, 2.0], vec![])).is_err());
        assert!(set.add_row(DataSetRow::new(vec![1.0, 2.0], vec![3.0])).is_ok());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn sixty_forty_split_of_sixty_three_rows() {
        let set = numbered(63);
        let parts = set.split(&[0.6, 0.4], &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(parts[0].len(), 38);
        assert_eq!(parts[1].len(), 25);

        let mut seen: Vec<f64> = parts.iter().flat_map(|p| p.rows().iter().map(|r| r.input[0])).collect();
        seen.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(seen, (0..63).map(|i| i as f64).collect::<Vec<_>>());
    }

    #[test]
    fn split_keeps_rows_paired() {
        let parts = numbered(10).split(&[0.5, 0.5], &mut StdRng::seed_from_u64(1)).unwrap();
        for row in parts.iter().flat_map(|p| p.rows()) {
            assert_eq!(row.desired_output[0], 2.0 * row.input[0]);
        }
    }

    #[test]
    fn split_rejects_bad_ratios() {
        let set = numbered(4);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(set.split(&[], &mut rng).is_err());
        assert!(set.split(&[0.7, 0.7], &mut rng).is_err());
        assert!(set.split(&[1.2, -0.2], &mut rng).is_err());
    }
}

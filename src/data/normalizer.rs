use serde::{Serialize, Deserialize};

use crate::data::dataset::DataSet;

/// Column-wise scaling fitted on one data set and applied to others.
pub trait Normalizer {
    fn normalize_input(&self, input: &[f64]) -> Vec<f64>;
    fn normalize_output(&self, output: &[f64]) -> Vec<f64>;
    /// Maps a network output back to the scale of the original data.
    fn denormalize_output(&self, output: &[f64]) -> Vec<f64>;

    fn normalize(&self, set: &mut DataSet) {
        for row in set.rows_mut() {
            row.input = self.normalize_input(&row.input);
            row.desired_output = self.normalize_output(&row.desired_output);
        }
    }
}

/// Divides every column by the largest absolute value it held in the
/// fitting set. Columns that were all zero are passed through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaxNormalizer {
    max_in: Vec<f64>,
    max_out: Vec<f64>,
}

impl MaxNormalizer {
    pub fn fit(set: &DataSet) -> MaxNormalizer {
        let mut max_in = vec![0.0f64; set.input_size()];
        let mut max_out = vec![0.0f64; set.output_size()];
        for row in set.rows() {
            fold_max(&mut max_in, &row.input);
            fold_max(&mut max_out, &row.desired_output);
        }
        MaxNormalizer { max_in, max_out }
    }

    pub fn max_in(&self) -> &[f64] {
        &self.max_in
    }

    pub fn max_out(&self) -> &[f64] {
        &self.max_out
    }
}

fn fold_max(acc: &mut [f64], values: &[f64]) {
    for (m, v) in acc.iter_mut().zip(values) {
        *m = m.max(v.abs());
    }
}

fn divide(values: &[f64], by: &[f64]) -> Vec<f64> {
    values.iter().zip(by)
        .map(|(v, &m)| if m == 0.0 { *v } else { v / m })
        .collect()
}

fn multiply(values: &[f64], by: &[f64]) -> Vec<f64> {
    values.iter().zip(by)
        .map(|(v, &m)| if m == 0.0 { *v } else { v * m })
        .collect()
}

impl Normalizer for MaxNormalizer {
    fn normalize_input(&self, input: &[f64]) -> Vec<f64> {
        divide(input, &self.max_in)
    }

    fn normalize_output(&self, output: &[f64]) -> Vec<f64> {
        divide(output, &self.max_out)
    }

    fn denormalize_output(&self, output: &[f64]) -> Vec<f64> {
        multiply(output, &self.max_out)
    }
}

/// Maps every column onto `[0, 1]` using the fitting set's min and max.
/// A constant column maps to 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinMaxNormalizer {
    min_in: Vec<f64>,
    max_in: Vec<f64>,
    min_out: Vec<f64>,
    max_out: Vec<f64>,
}

impl MinMaxNormalizer {
    pub fn fit(set: &DataSet) -> MinMaxNormalizer {
        let mut n = MinMaxNormalizer {
            min_in: vec![f64::INFINITY; set.input_size()],
            max_in: vec![f64::NEG_INFINITY; set.input_size()],
            min_out: vec![f64::INFINITY; set.output_size()],
            max_out: vec![f64::NEG_INFINITY; set.output_size()],
        };
        for row in set.rows() {
            fold_range(&mut n.min_in, &mut n.max_in, &row.input);
            fold_range(&mut n.min_out, &mut n.max_out, &row.desired_output);
        }
        n
    }
}

fn fold_range(min: &mut [f64], max: &mut [f64], values: &[f64]) {
    for ((lo, hi), &v) in min.iter_mut().zip(max.iter_mut()).zip(values) {
        *lo = lo.min(v);
        *hi = hi.max(v);
    }
}

fn rescale(values: &[f64], min: &[f64], max: &[f64]) -> Vec<f64> {
    values.iter().zip(min.iter().zip(max))
        .map(|(v, (lo, hi))| {
            let range = hi - lo;
            if range > 0.0 { (v - lo) / range } else { 0.0 }
        })
        .collect()
}

impl Normalizer for MinMaxNormalizer {
    fn normalize_input(&self, input: &[f64]) -> Vec<f64> {
        rescale(input, &self.min_in, &self.max_in)
    }

    fn normalize_output(&self, output: &[f64]) -> Vec<f64> {
        rescale(output, &self.min_out, &self.max_out)
    }

    fn denormalize_output(&self, output: &[f64]) -> Vec<f64> {
        output.iter().zip(self.min_out.iter().zip(&self.max_out))
            .map(|(v, (lo, hi))| {
                let range = hi - lo;
                if range > 0.0 { lo + v * range } else { *lo }
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizerKind {
    #[default]
    Max,
    MinMax,
}

/// A normalizer of either kind, in the form stored alongside a saved model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FittedNormalizer {
    Max(MaxNormalizer),
    MinMax(MinMaxNormalizer),
}

impl FittedNormalizer {
    pub fn fit(kind: NormalizerKind, set: &DataSet) -> FittedNormalizer {
        match kind {
            NormalizerKind::Max => FittedNormalizer::Max(MaxNormalizer::fit(set)),
            NormalizerKind::MinMax => FittedNormalizer::MinMax(MinMaxNormalizer::fit(set)),
        }
    }

    fn inner(&self) -> &dyn Normalizer {
        match self {
            FittedNormalizer::Max(n) => n as &dyn Normalizer,
            FittedNormalizer::MinMax(n) => n as &dyn Normalizer,
        }
    }
}

impl Normalizer for FittedNormalizer {
    fn normalize_input(&self, input: &[f64]) -> Vec<f64> {
        self.inner().normalize_input(input)
    }

    fn normalize_output(&self, output: &[f64]) -> Vec<f64> {
        self.inner().normalize_output(output)
    }

    fn denormalize_output(&self, output: &[f64]) -> Vec<f64> {
        self.inner().denormalize_output(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dataset::DataSetRow;

    fn sample() -> DataSet {
        let mut set = DataSet::new(2, 1);
        set.add_row(DataSetRow::new(vec![2.0, 0.0], vec![10.0])).unwrap();
        set.add_row(DataSetRow::new(vec![-4.0, 0.0], vec![40.0])).unwrap();
        set
    }

    #[test]
    fn max_normalizer_uses_absolute_max_and_skips_zero_columns() {
        let mut set = sample();
        let norm = MaxNormalizer::fit(&set);
        assert_eq!(norm.max_in(), &[4.0, 0.0]);
        norm.normalize(&mut set);
        assert_eq!(set.rows()[0].input, vec![0.5, 0.0]);
        assert_eq!(set.rows()[1].input, vec![-1.0, 0.0]);
        assert_eq!(set.rows()[1].desired_output, vec![1.0]);
        assert_eq!(norm.denormalize_output(&[0.25]), vec![10.0]);
    }

    #[test]
    fn fitted_on_train_applied_to_test() {
        let train = sample();
        let norm = MaxNormalizer::fit(&train);
        let mut test = DataSet::new(2, 1);
        test.add_row(DataSetRow::new(vec![8.0, 3.0], vec![20.0])).unwrap();
        norm.normalize(&mut test);
        // Test values may exceed the training max; they are not clipped.
        assert_eq!(test.rows()[0].input, vec![2.0, 3.0]);
        assert_eq!(test.rows()[0].desired_output, vec![0.5]);
    }

    #[test]
    fn min_max_maps_to_unit_interval() {
        let mut set = sample();
        let norm = FittedNormalizer::fit(NormalizerKind::MinMax, &set);
        norm.normalize(&mut set);
        assert_eq!(set.rows()[0].input, vec![1.0, 0.0]);
        assert_eq!(set.rows()[1].input, vec![0.0, 0.0]);
        assert_eq!(set.rows()[0].desired_output, vec![0.0]);
        assert_eq!(norm.denormalize_output(&[1.0]), vec![40.0]);
    }

    #[test]
    fn fitted_normalizer_serializes_with_kind_tag() {
        let norm = FittedNormalizer::fit(NormalizerKind::Max, &sample());
        let json = serde_json::to_string(&norm).unwrap();
        assert!(json.contains("\"kind\":\"max\""));
        let back: FittedNormalizer = serde_json::from_str(&json).unwrap();
        assert_eq!(back, norm);
    }
}
